//! HTTP handlers for the roster endpoints
//!
//! Both list endpoints share one flow: page and size are checked, every
//! filter rule is validated without stopping at the first failure, the
//! filtered rows are counted, and only then is the window fetched. A request
//! with validation errors is answered with `400` and the unfiltered total.
//!
//! # Features
//!
//! - **Pagination**: [`PageRequest`] and [`paginate`] with the `page=0&size=0` all-rows case
//! - **Listing**: [`list`] and [`execute`] over any [`ListRepository`](crate::repository::ListRepository)
//! - **Enrichment**: [`enrich`] derives `supplyCount`, `studentCount` and `overloaded`
//! - **Error Handling**: [`ApiError`] with automatic HTTP status code mapping
//!
//! # Integration with Axum
//!
//! ```rust,ignore
//! use roster_service::{config::Config, handlers, repository::InMemoryRoster, state::AppState};
//!
//! let state = AppState::new(Config::default(), InMemoryRoster::sample());
//! let app = handlers::router(state);
//! ```

mod classrooms;
mod enrich;
mod error;
mod list;
mod query;
mod response;
mod students;

use axum::{routing::get, Router};

use crate::health::{health, readiness};
use crate::repository::RosterSource;
use crate::state::AppState;

// Re-export all public types
pub use classrooms::{get_classroom, list_classrooms};
pub use enrich::enrich;
pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use list::{execute, list, ListOutcome};
pub use query::{
    paginate, InvalidPagination, PageRequest, PageShape, PaginationWindow, DEFAULT_PAGE,
    DEFAULT_SIZE, MAX_SIZE,
};
pub use response::{ClassroomDetail, ListResponse};
pub use students::list_students;

/// Build the full route table over a data source
pub fn router<S: RosterSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::<S>))
        .route("/ready", get(readiness::<S>))
        .route("/students", get(list_students::<S>))
        .route("/classrooms", get(list_classrooms::<S>))
        .route("/classrooms/{id}", get(get_classroom::<S>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Classroom, ClassroomWithRelations, Student, Supply};
    use crate::repository::{
        ClassroomRepository, FilterCondition, InMemoryRoster, ListRepository, Pagination,
        RepositoryResult, SortSpec,
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Config::default(), InMemoryRoster::sample()))
    }

    /// Sample roster that records how often related counts are requested
    #[derive(Debug, Clone)]
    struct CountingRoster {
        inner: InMemoryRoster,
        related_counts: Arc<AtomicUsize>,
    }

    impl CountingRoster {
        fn new() -> Self {
            Self {
                inner: InMemoryRoster::sample(),
                related_counts: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ListRepository<Student> for CountingRoster {
        async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
            ListRepository::<Student>::count(&self.inner, filters).await
        }

        async fn find_all(
            &self,
            filters: &[FilterCondition],
            sort: SortSpec,
            pagination: Pagination,
        ) -> RepositoryResult<Vec<Student>> {
            ListRepository::<Student>::find_all(&self.inner, filters, sort, pagination).await
        }
    }

    impl ListRepository<Classroom> for CountingRoster {
        async fn count(&self, filters: &[FilterCondition]) -> RepositoryResult<u64> {
            ListRepository::<Classroom>::count(&self.inner, filters).await
        }

        async fn find_all(
            &self,
            filters: &[FilterCondition],
            sort: SortSpec,
            pagination: Pagination,
        ) -> RepositoryResult<Vec<Classroom>> {
            ListRepository::<Classroom>::find_all(&self.inner, filters, sort, pagination).await
        }
    }

    impl ClassroomRepository for CountingRoster {
        async fn find_with_relations(
            &self,
            id: i32,
        ) -> RepositoryResult<Option<ClassroomWithRelations>> {
            self.inner.find_with_relations(id).await
        }

        async fn supply_count(&self, classroom_id: i32) -> RepositoryResult<u64> {
            self.related_counts.fetch_add(1, Ordering::SeqCst);
            self.inner.supply_count(classroom_id).await
        }

        async fn student_count(&self, classroom_id: i32) -> RepositoryResult<u64> {
            self.related_counts.fetch_add(1, Ordering::SeqCst);
            self.inner.student_count(classroom_id).await
        }
    }

    impl RosterSource for CountingRoster {
        async fn ping(&self) -> RepositoryResult<()> {
            self.inner.ping().await
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn last_names(body: &Value) -> Vec<&str> {
        body["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["lastName"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_students_default_page() {
        let (status, body) = get_json(app(), "/students").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["page"], 1);
        assert_eq!(body["pageCount"], 1);
        assert!(body.get("errors").is_none());
        assert_eq!(last_names(&body), ["Alfonsi", "Lovelace", "Palazzo"]);
    }

    #[tokio::test]
    async fn test_students_window() {
        let (status, body) = get_json(app(), "/students?page=2&size=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["page"], 2);
        assert_eq!(body["pageCount"], 2);
        assert_eq!(last_names(&body), ["Palazzo"]);
    }

    #[tokio::test]
    async fn test_students_all_results() {
        let (status, body) = get_json(app(), "/students?page=0&size=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 1);
        assert_eq!(body["pageCount"], 1);
        assert_eq!(body["rows"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_students_fuzzy_and_bool_filters() {
        let (status, body) = get_json(app(), "/students?lastName=%25a%25&lefty=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(last_names(&body), ["Lovelace", "Palazzo"]);
    }

    #[tokio::test]
    async fn test_students_invalid_params_collect_all_errors() {
        let (status, body) = get_json(app(), "/students?size=201&lefty=yes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["count"], 3);
        assert_eq!(body["pageCount"], 0);
        assert_eq!(body["rows"], serde_json::json!([]));
        assert_eq!(
            body["errors"],
            serde_json::json!([
                { "message": "Requires valid page and size params" },
                { "message": "Lefty should be either true or false" }
            ])
        );
    }

    #[tokio::test]
    async fn test_rejected_list_reports_first_page() {
        for uri in ["/students?page=-3&size=5", "/students?page=0&size=0&lefty=yes"] {
            let (status, body) = get_json(app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["page"], 1, "{uri}");
            assert_eq!(body["pageCount"], 0, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_classrooms_range_filter_is_inclusive() {
        let (status, body) = get_json(app(), "/classrooms?studentLimit=2,20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["rows"][0]["name"], "Mr. Chen's Science Lab");
        assert_eq!(body["rows"][1]["name"], "Ms. Ross's Art Class");
    }

    #[tokio::test]
    async fn test_classrooms_max_filter() {
        let (status, body) = get_json(app(), "/classrooms?studentLimit=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["rows"][0]["studentLimit"], 2);
    }

    #[tokio::test]
    async fn test_classrooms_rejected_range() {
        for (query, message) in [
            ("studentLimit=abc", "Student Limit should be an integer"),
            ("studentLimit=20,2", "Student Limit should be two numbers: min,max"),
            (
                "studentLimit=1,2,3",
                "Student Limit should be two or less numbers: max or min,max",
            ),
        ] {
            let (status, body) = get_json(app(), &format!("/classrooms?{query}")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
            assert_eq!(body["errors"][0]["message"], message);
            assert_eq!(body["count"], 2);
        }
    }

    #[tokio::test]
    async fn test_classroom_detail() {
        let (status, body) = get_json(app(), "/classrooms/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ms. Ross's Art Class");
        assert_eq!(body["studentLimit"], 2);
        assert_eq!(body["supplyCount"], 2);
        assert_eq!(body["studentCount"], 3);
        assert_eq!(body["overloaded"], true);

        let categories: Vec<_> = body["Supplies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, ["Cutting", "Painting"]);

        let students: Vec<_> = body["Students"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["lastName"].as_str().unwrap())
            .collect();
        assert_eq!(students, ["Alfonsi", "Lovelace", "Palazzo"]);
    }

    #[tokio::test]
    async fn test_classroom_at_limit_is_not_overloaded() {
        let source = InMemoryRoster::builder()
            .classroom(Classroom {
                id: 5,
                name: "Full".to_string(),
                student_limit: 1,
            })
            .student(Student {
                id: 1,
                first_name: "Cam".to_string(),
                last_name: "Alfonsi".to_string(),
                left_handed: false,
            })
            .supply(
                5,
                Supply {
                    id: 1,
                    name: "Glue".to_string(),
                    category: "Adhesive".to_string(),
                    handed: "any".to_string(),
                },
            )
            .enroll(1, 5)
            .build();
        let app = router(AppState::new(Config::default(), source));

        let (status, body) = get_json(app, "/classrooms/5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["studentCount"], 1);
        assert_eq!(body["overloaded"], false);
    }

    #[tokio::test]
    async fn test_classroom_not_found() {
        for uri in ["/classrooms/999", "/classrooms/abc"] {
            let (status, body) = get_json(app(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["message"], "Classroom Not Found");
        }
    }

    #[tokio::test]
    async fn test_classroom_miss_skips_related_counts() {
        let source = CountingRoster::new();
        let related_counts = Arc::clone(&source.related_counts);
        let app = router(AppState::new(Config::default(), source.clone()));

        let (status, _) = get_json(app, "/classrooms/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(related_counts.load(Ordering::SeqCst), 0);

        let app = router(AppState::new(Config::default(), source));
        let (status, _) = get_json(app, "/classrooms/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(related_counts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_probes() {
        let (status, _) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = get_json(app(), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
    }
}
