use blogdesk::application::error::AppError;
use blogdesk::application::state::QueryResult;

use crate::client::CliError;

pub mod categories;
pub mod dashboard;
pub mod posts;
pub mod tags;

/// Unwrap a finished read; a failed read becomes the command's error.
pub fn query_data<T>(result: QueryResult<T>) -> Result<T, CliError> {
    if let Some(error) = result.error {
        return Err(AppError::query(error).into());
    }
    result
        .data
        .ok_or_else(|| AppError::query("query returned no data").into())
}
