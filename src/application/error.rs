use thiserror::Error;

use super::filters::FilterError;
use crate::api::ApiError;
use crate::domain::error::DomainError;
use crate::infra::error::InfraError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("{0}")]
    Query(String),
}

impl AppError {
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Messages to show the operator, outermost first.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Domain(err) if !err.violations().is_empty() => err
                .violations()
                .iter()
                .map(|violation| violation.message.clone())
                .collect(),
            other => {
                let mut messages = vec![other.to_string()];
                let mut current = std::error::Error::source(other);
                while let Some(inner) = current {
                    let text = inner.to_string();
                    if !messages.contains(&text) {
                        messages.push(text);
                    }
                    current = inner.source();
                }
                messages
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::FieldViolation;

    #[test]
    fn validation_errors_list_each_violation() {
        let err = AppError::from(DomainError::validation(vec![
            FieldViolation::new("name", "Tag name is required"),
            FieldViolation::new("description", "Description is required"),
        ]));
        assert_eq!(
            err.messages(),
            vec!["Tag name is required", "Description is required"]
        );
    }

    #[test]
    fn other_errors_report_display() {
        let err = AppError::query("Post not found");
        assert_eq!(err.messages(), vec!["Post not found"]);
    }
}
