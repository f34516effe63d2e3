use std::fs;
use std::path::PathBuf;

use crate::client::CliError;

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    read_opt_value(val, file)?
        .ok_or_else(|| CliError::InvalidInput("content or content file required".into()))
}

/// Parse `1,2, 3` into ids. Blank input yields an empty list.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, CliError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| CliError::InvalidInput(format!("`{part}` is not a valid id")))
        })
        .collect()
}
