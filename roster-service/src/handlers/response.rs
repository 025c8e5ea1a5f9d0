//! Response bodies for roster endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::query::PaginationWindow;
use crate::filters::ErrorList;
use crate::models::{Classroom, Student, Supply};

/// List endpoint body
///
/// Serialized as `{count, rows, page, pageCount}`; a rejected request also
/// carries `errors` and is sent with `400 Bad Request`.
///
/// # Example
///
/// ```rust
/// use roster_service::filters::ErrorList;
/// use roster_service::handlers::ListResponse;
///
/// let mut errors = ErrorList::new();
/// errors.push("Lefty should be either true or false");
/// let response: ListResponse<String> = ListResponse::rejected(267, 1, errors);
/// assert!(response.rows.is_empty());
/// assert_eq!(response.page_count, 0);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Rows matching the filters, ignoring the window
    pub count: u64,
    pub rows: Vec<T>,
    /// Always at least 1
    pub page: u64,
    pub page_count: u64,
    #[serde(skip_serializing_if = "ErrorList::is_empty")]
    pub errors: ErrorList,
}

impl<T> ListResponse<T> {
    /// Body for an accepted request
    pub fn accepted(rows: Vec<T>, count: u64, window: &PaginationWindow) -> Self {
        Self {
            count,
            rows,
            page: window.page,
            page_count: window.page_count,
            errors: ErrorList::new(),
        }
    }

    /// Body for a request with validation errors
    pub fn rejected(count: u64, page: u64, errors: ErrorList) -> Self {
        Self {
            count,
            rows: Vec::new(),
            page: page.max(1),
            page_count: 0,
            errors,
        }
    }

    /// Whether validation errors were recorded
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.is_rejected() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::OK
        };
        (status, Json(self)).into_response()
    }
}

/// A classroom with derived counts and its ordered related collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomDetail {
    #[serde(flatten)]
    pub classroom: Classroom,
    pub supply_count: u64,
    pub student_count: u64,
    /// More enrolled students than the classroom's limit
    pub overloaded: bool,
    #[serde(rename = "Supplies")]
    pub supplies: Vec<Supply>,
    #[serde(rename = "Students")]
    pub students: Vec<Student>,
}

impl IntoResponse for ClassroomDetail {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_body_omits_errors() {
        let window = PaginationWindow {
            limit: 10,
            offset: 10,
            page: 2,
            page_count: 3,
        };
        let response = ListResponse::accepted(vec!["a", "b"], 27, &window);
        assert!(!response.is_rejected());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "count": 27, "rows": ["a", "b"], "page": 2, "pageCount": 3 })
        );
    }

    #[test]
    fn test_rejected_body() {
        let mut errors = ErrorList::new();
        errors.push("Requires valid page and size params");
        let response: ListResponse<u8> = ListResponse::rejected(12, 0, errors);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "count": 12,
                "rows": [],
                "page": 1,
                "pageCount": 0,
                "errors": [{ "message": "Requires valid page and size params" }]
            })
        );
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_classroom_detail_shape() {
        let detail = ClassroomDetail {
            classroom: Classroom {
                id: 4,
                name: "Room".to_string(),
                student_limit: 1,
            },
            supply_count: 0,
            student_count: 2,
            overloaded: true,
            supplies: Vec::new(),
            students: vec![Student {
                id: 1,
                first_name: "Cam".to_string(),
                last_name: "Alfonsi".to_string(),
                left_handed: false,
            }],
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["studentLimit"], 1);
        assert_eq!(value["supplyCount"], 0);
        assert_eq!(value["studentCount"], 2);
        assert_eq!(value["overloaded"], true);
        assert_eq!(value["Supplies"], json!([]));
        assert_eq!(value["Students"][0]["leftHanded"], false);
    }
}
