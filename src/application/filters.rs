//! Posts list filter state.
//!
//! [`PostFilters`] is plain serializable state; [`PostFilterComposer`] owns
//! it together with the search debouncer and enforces the page reset rule:
//! any effective change other than the page itself moves back to page 1
//! before the next list request is built.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

use super::debounce::{DEFAULT_SEARCH_DEBOUNCE, Debounced};
use super::pagination::TimeRange;
use crate::api::PostListParams;

pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid {field} `{value}`")]
    InvalidSelection { field: &'static str, value: String },
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u8),
    #[error("page size must be at least 1")]
    ZeroLimit,
}

/// A select-box value where `all` (or nothing) means no filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: FromStr> Selection<T> {
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, FilterError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        trimmed
            .parse()
            .map(Selection::Only)
            .map_err(|_| FilterError::InvalidSelection {
                field,
                value: trimmed.to_string(),
            })
    }
}

impl<T> Selection<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// Effective filter state of the posts list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFilters {
    /// Settled search text; never blank.
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub month: Option<u8>,
    pub year: Option<i32>,
    /// Applied client-side, see [`super::pagination::PostPageView`].
    pub time_range: Option<TimeRange>,
    pub page: u32,
    pub limit: u32,
}

impl Default for PostFilters {
    fn default() -> Self {
        Self {
            search: None,
            category_id: None,
            tag_id: None,
            month: None,
            year: None,
            time_range: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PostFilters {
    /// Server-side parameters. The time range is deliberately absent.
    pub fn params(&self) -> PostListParams {
        PostListParams {
            page: Some(self.page.max(1)),
            limit: Some(self.limit.max(1)),
            search: self.search.clone(),
            category_id: self.category_id,
            tag_id: self.tag_id,
            month: self.month,
            year: self.year,
        }
        .normalized()
    }
}

fn normalize_search(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug)]
pub struct PostFilterComposer {
    filters: PostFilters,
    search: Debounced<String>,
}

impl Default for PostFilterComposer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE, DEFAULT_PAGE_SIZE)
    }
}

impl PostFilterComposer {
    pub fn new(search_window: Duration, page_size: u32) -> Self {
        Self::from_filters(
            PostFilters {
                limit: page_size.max(1),
                ..PostFilters::default()
            },
            search_window,
        )
    }

    /// Resume from previously saved state.
    pub fn from_filters(filters: PostFilters, search_window: Duration) -> Self {
        let initial = filters.search.clone().unwrap_or_default();
        Self {
            filters,
            search: Debounced::new(initial, search_window),
        }
    }

    pub fn filters(&self) -> &PostFilters {
        &self.filters
    }

    pub fn params(&self) -> PostListParams {
        self.filters.params()
    }

    /// Raw text currently in the search box, settled or not.
    pub fn search_input(&self) -> &str {
        self.search.latest()
    }

    /// Record a keystroke. Takes effect only after the quiet window.
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.push(text.into(), now);
    }

    /// When the pending search input will settle, if there is one.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Apply the pending search input if its window elapsed by `now`.
    /// Returns `true` when the effective filters changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        self.search.settle(now) && self.apply_search()
    }

    /// Apply a search immediately, bypassing the debounce window.
    pub fn commit_search(&mut self, text: impl Into<String>) -> bool {
        self.search.set_now(text.into());
        self.apply_search()
    }

    fn apply_search(&mut self) -> bool {
        let search = normalize_search(self.search.value());
        self.replace(|filters| &mut filters.search, search)
    }

    pub fn set_category(&mut self, category_id: Option<i64>) -> bool {
        self.replace(|filters| &mut filters.category_id, category_id)
    }

    pub fn set_tag(&mut self, tag_id: Option<i64>) -> bool {
        self.replace(|filters| &mut filters.tag_id, tag_id)
    }

    pub fn set_month(&mut self, month: Option<u8>) -> Result<bool, FilterError> {
        if let Some(month) = month.filter(|m| !(1..=12).contains(m)) {
            return Err(FilterError::MonthOutOfRange(month));
        }
        Ok(self.replace(|filters| &mut filters.month, month))
    }

    pub fn set_year(&mut self, year: Option<i32>) -> bool {
        self.replace(|filters| &mut filters.year, year)
    }

    pub fn set_time_range(&mut self, range: Option<TimeRange>) -> bool {
        self.replace(|filters| &mut filters.time_range, range)
    }

    pub fn set_limit(&mut self, limit: u32) -> Result<bool, FilterError> {
        if limit == 0 {
            return Err(FilterError::ZeroLimit);
        }
        Ok(self.replace(|filters| &mut filters.limit, limit))
    }

    /// Move to `page` (clamped to 1). Leaves every other filter alone.
    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.filters.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.filters.page.saturating_sub(1));
    }

    /// Drop every filter and return to page 1.
    pub fn reset(&mut self) {
        self.search.set_now(String::new());
        self.filters = PostFilters {
            limit: self.filters.limit,
            ..PostFilters::default()
        };
    }

    fn replace<T: PartialEq>(
        &mut self,
        field: impl FnOnce(&mut PostFilters) -> &mut T,
        value: T,
    ) -> bool {
        let slot = field(&mut self.filters);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.filters.page = 1;
        true
    }
}
