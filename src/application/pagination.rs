//! Client-side view over one server page of posts.
//!
//! The server paginates and filters by search, category, tag, month and
//! year. The rolling time range is not understood by the server, so it is
//! applied here to the rows of the current page only. Server pagination
//! metadata is passed through untouched; the [`LocalWindow`] next to it
//! describes only the rows that survived the time range.

use std::fmt;
use std::str::FromStr;

use blogdesk_api_types::{Pagination, Post, PostListResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "3years")]
    ThreeYears,
    #[serde(rename = "5years")]
    FiveYears,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown time range `{0}`")]
pub struct UnknownTimeRange(pub String);

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        Self::Week,
        Self::Month,
        Self::ThreeMonths,
        Self::Year,
        Self::ThreeYears,
        Self::FiveYears,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::ThreeMonths => "3months",
            Self::Year => "year",
            Self::ThreeYears => "3years",
            Self::FiveYears => "5years",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::ThreeMonths => 90,
            Self::Year => 365,
            Self::ThreeYears => 1095,
            Self::FiveYears => 1825,
        }
    }

    /// Whether `created_at` falls within the range ending at `now`.
    pub fn contains(self, created_at: OffsetDateTime, now: OffsetDateTime) -> bool {
        now - created_at <= Duration::days(self.days())
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = UnknownTimeRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTimeRange(trimmed.to_string()))
    }
}

/// Position of the displayed rows within the server's ordering.
///
/// Indexes are 1-based and count every row the server matched, so `first`
/// and `last` stay comparable with the server `total`. Both are 0 when
/// nothing is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalWindow {
    pub visible: usize,
    pub hidden: usize,
    pub first: u64,
    pub last: u64,
    /// The server returned rows, but the time range hid all of them.
    pub emptied_by_range: bool,
}

impl LocalWindow {
    fn from_positions(offset: u64, kept: &[u64], fetched: usize) -> Self {
        let first = kept.first().map_or(0, |pos| offset + pos + 1);
        let last = kept.last().map_or(0, |pos| offset + pos + 1);
        Self {
            visible: kept.len(),
            hidden: fetched - kept.len(),
            first,
            last,
            emptied_by_range: kept.is_empty() && fetched > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPageView {
    pub posts: Vec<Post>,
    /// Exactly as reported by the server.
    pub pagination: Pagination,
    pub time_range: Option<TimeRange>,
    /// Recomputed from the rows left after the time range.
    pub window: LocalWindow,
}

impl PostPageView {
    pub fn new(response: PostListResponse, range: Option<TimeRange>, now: OffsetDateTime) -> Self {
        let PostListResponse { data, pagination } = response;
        let fetched = data.len();
        let offset = u64::from(pagination.page.saturating_sub(1)) * u64::from(pagination.limit);

        let mut kept = Vec::with_capacity(fetched);
        let mut posts = Vec::with_capacity(fetched);
        for (pos, post) in (0u64..).zip(data) {
            if range.is_none_or(|range| range.contains(post.created_at, now)) {
                kept.push(pos);
                posts.push(post);
            }
        }

        Self {
            window: LocalWindow::from_positions(offset, &kept, fetched),
            posts,
            pagination,
            time_range: range,
        }
    }

    /// Index of the first displayed row, 0 when nothing is displayed.
    pub fn first_index(&self) -> u64 {
        self.window.first
    }

    pub fn last_index(&self) -> u64 {
        self.window.last
    }

    pub fn hidden(&self) -> usize {
        self.window.hidden
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
