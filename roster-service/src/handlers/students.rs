use std::collections::HashMap;

use axum::extract::{Query, State};

use super::error::ApiError;
use super::list::list;
use super::response::ListResponse;
use crate::filters::STUDENT_FILTERS;
use crate::models::Student;
use crate::repository::RosterSource;
use crate::sort::STUDENT_ORDER;
use crate::state::AppState;

/// `GET /students`
pub async fn list_students<S: RosterSource>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ListResponse<Student>, ApiError> {
    list::<Student, S>(state.source(), &params, STUDENT_FILTERS, STUDENT_ORDER).await
}
