//! Shared flow behind both list endpoints

use std::collections::HashMap;

use super::error::ApiError;
use super::query::{PageRequest, PageShape, PaginationWindow};
use super::response::ListResponse;
use crate::filters::{evaluate, ErrorList, FilterRule};
use crate::repository::{FilterCondition, ListRepository, RepositoryResult, SortSpec};

/// Rows for one window plus the filtered total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutcome<T> {
    pub rows: Vec<T>,
    pub count: u64,
    pub window: PaginationWindow,
}

/// Count the filtered rows, resolve the window, then fetch that window
///
/// The count and the row fetch are separate queries so limit and offset
/// never affect the reported total.
pub async fn execute<T, R>(
    source: &R,
    filters: &[FilterCondition],
    sort: SortSpec,
    shape: PageShape,
) -> RepositoryResult<ListOutcome<T>>
where
    R: ListRepository<T>,
{
    let count = source.count(filters).await?;
    let window = shape.window(count);
    let rows = source
        .find_all(filters, sort, window.as_pagination())
        .await?;

    Ok(ListOutcome {
        rows,
        count,
        window,
    })
}

/// Validate list parameters and answer with exactly one body
///
/// Pagination is checked first, then every rule in registry order. Any
/// rejection yields a `400` body carrying the unfiltered total.
pub async fn list<T, R>(
    source: &R,
    params: &HashMap<String, String>,
    rules: &[FilterRule],
    sort: SortSpec,
) -> Result<ListResponse<T>, ApiError>
where
    R: ListRepository<T>,
{
    let request = PageRequest::from_params(params);
    let mut errors = ErrorList::new();

    let shape = request.shape();
    if let Err(invalid) = &shape {
        errors.push(invalid.to_string());
    }

    let (filters, filter_errors) = evaluate(params, rules);
    errors.append(filter_errors);

    let shape = match shape {
        Ok(shape) if errors.is_empty() => shape,
        _ => {
            let count = source.count(&[]).await?;
            tracing::debug!(
                count,
                page = request.page,
                error_count = errors.len(),
                "rejected list parameters"
            );
            return Ok(ListResponse::rejected(
                count,
                request.reported_page(),
                errors,
            ));
        }
    };

    let outcome = execute(source, &filters, sort, shape).await?;
    tracing::debug!(
        count = outcome.count,
        page = outcome.window.page,
        rows = outcome.rows.len(),
        filters = filters.len(),
        "listed rows"
    );

    Ok(ListResponse::accepted(
        outcome.rows,
        outcome.count,
        &outcome.window,
    ))
}
