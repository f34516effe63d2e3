//! Cache key definitions.
//!
//! A key is `(resource, "list", filters)` or `(resource, "detail", id)`.
//! List keys embed the canonical form of every filter that shapes the result
//! set, so two filter combinations never share an entry.

use std::fmt;

use url::form_urlencoded;

use crate::api::PostListParams;

/// The three resource families managed by the admin client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Posts,
    Categories,
    Tags,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Posts, Self::Categories, Self::Tags];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Categories => "categories",
            Self::Tags => "tags",
        }
    }

    /// Singular noun used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Posts => "post",
            Self::Categories => "category",
            Self::Tags => "tag",
        }
    }

    /// Capitalized form for the start of a message.
    pub fn title(self) -> &'static str {
        match self {
            Self::Posts => "Post",
            Self::Categories => "Category",
            Self::Tags => "Tag",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyScope {
    /// Canonical, order-fixed encoding of the filter set.
    List(String),
    Detail(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: ResourceKind,
    pub scope: KeyScope,
}

/// Anything that narrows a list query.
pub trait ListFilter {
    fn canonical(&self) -> String;
}

/// Category and tag lists take no filters.
impl ListFilter for () {
    fn canonical(&self) -> String {
        String::new()
    }
}

impl ListFilter for PostListParams {
    fn canonical(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query())
            .finish()
    }
}

impl CacheKey {
    pub fn list(resource: ResourceKind, filters: &impl ListFilter) -> Self {
        Self {
            resource,
            scope: KeyScope::List(filters.canonical()),
        }
    }

    pub fn detail(resource: ResourceKind, id: impl ToString) -> Self {
        Self {
            resource,
            scope: KeyScope::Detail(id.to_string()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.scope, KeyScope::List(_))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            KeyScope::List(filters) => write!(f, "{}/list?{filters}", self.resource),
            KeyScope::Detail(id) => write!(f, "{}/detail/{id}", self.resource),
        }
    }
}
