use serde::Serialize;

use crate::cache::{EntrySnapshot, FetchStatus};

/// Outcome of a read as seen by a caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> QueryResult<T> {
    pub fn loaded(data: T) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, data: Option<T>) -> Self {
        Self {
            data,
            is_loading: false,
            error: Some(error.into()),
        }
    }

    pub fn into_state(self) -> QueryState<T>
    where
        T: Emptiness,
    {
        QueryState::from_result(self)
    }
}

impl<T> From<EntrySnapshot<T>> for QueryResult<T> {
    fn from(snapshot: EntrySnapshot<T>) -> Self {
        Self {
            data: snapshot.data,
            is_loading: snapshot.status == FetchStatus::Loading,
            error: snapshot.error.map(|err| err.message),
        }
    }
}

/// Data that can be meaningfully empty.
pub trait Emptiness {
    fn is_empty_data(&self) -> bool;
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_data(&self) -> bool {
        self.is_empty()
    }
}

/// Tagged view of a read for presentation code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum QueryState<T> {
    Loading,
    Loaded(T),
    Empty,
    Failed(String),
}

impl<T: Emptiness> QueryState<T> {
    /// Errors take precedence over data; loading only shows when nothing
    /// is displayable yet.
    pub fn from_result(result: QueryResult<T>) -> Self {
        if let Some(error) = result.error {
            return QueryState::Failed(error);
        }
        match result.data {
            Some(data) if data.is_empty_data() => QueryState::Empty,
            Some(data) => QueryState::Loaded(data),
            None if result.is_loading => QueryState::Loading,
            None => QueryState::Empty,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            QueryState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_result() {
        assert_eq!(
            QueryResult::loaded(vec![1]).into_state(),
            QueryState::Loaded(vec![1])
        );
        assert_eq!(
            QueryResult::<Vec<u8>>::loaded(Vec::new()).into_state(),
            QueryState::Empty
        );
        assert_eq!(
            QueryResult::failed("boom", Some(vec![1])).into_state(),
            QueryState::Failed("boom".to_string())
        );
        let loading = QueryResult::<Vec<u8>> {
            data: None,
            is_loading: true,
            error: None,
        };
        assert!(loading.into_state().is_loading());
    }
}
