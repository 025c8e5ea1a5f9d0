use std::collections::HashMap;

use axum::extract::{Path, Query, State};

use super::enrich::enrich;
use super::error::ApiError;
use super::list::list;
use super::response::{ClassroomDetail, ListResponse};
use crate::filters::CLASSROOM_FILTERS;
use crate::models::Classroom;
use crate::repository::RosterSource;
use crate::sort::CLASSROOM_ORDER;
use crate::state::AppState;

/// `GET /classrooms`
pub async fn list_classrooms<S: RosterSource>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ListResponse<Classroom>, ApiError> {
    list::<Classroom, S>(state.source(), &params, CLASSROOM_FILTERS, CLASSROOM_ORDER).await
}

/// `GET /classrooms/{id}`
///
/// A miss returns before any related count is requested. The two counts do
/// not depend on each other and run concurrently.
pub async fn get_classroom<S: RosterSource>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<ClassroomDetail, ApiError> {
    let Ok(id) = raw_id.parse::<i32>() else {
        return Err(ApiError::classroom_not_found(raw_id));
    };

    let source = state.source();
    let Some(relations) = source.find_with_relations(id).await? else {
        return Err(ApiError::classroom_not_found(raw_id));
    };

    let (supply_count, student_count) =
        futures::try_join!(source.supply_count(id), source.student_count(id))?;

    let detail = enrich(relations, supply_count, student_count);
    tracing::debug!(
        classroom_id = id,
        supply_count,
        student_count,
        overloaded = detail.overloaded,
        "loaded classroom"
    );

    Ok(detail)
}
