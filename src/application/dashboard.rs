use blogdesk_api_types::Post;
use serde::Serialize;
use time::OffsetDateTime;

use super::query::Queries;
use super::state::{Emptiness, QueryResult, QueryState};
use crate::api::PostListParams;

const RECENT_POSTS_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentPost {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub read_time: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Post> for RecentPost {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            category: post.category.as_ref().map(|category| category.name.clone()),
            read_time: post.read_time,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Server-reported total across all pages.
    pub total_posts: u64,
    pub total_categories: usize,
    pub total_tags: usize,
    pub recent_posts: Vec<RecentPost>,
}

impl Emptiness for DashboardStats {
    fn is_empty_data(&self) -> bool {
        self.total_posts == 0 && self.total_categories == 0 && self.total_tags == 0
    }
}

/// Load the landing page numbers. The three reads run concurrently.
pub async fn load_dashboard(queries: &Queries) -> QueryState<DashboardStats> {
    let recent = PostListParams {
        page: Some(1),
        limit: Some(RECENT_POSTS_LIMIT),
        ..Default::default()
    };
    let (posts, categories, tags) =
        tokio::join!(queries.posts(&recent), queries.categories(), queries.tags());

    let error = [&posts.error, &categories.error, &tags.error]
        .into_iter()
        .flatten()
        .next()
        .cloned();
    if let Some(error) = error {
        return QueryState::Failed(error);
    }

    let stats = match (posts.data, categories.data, tags.data) {
        (Some(posts), Some(categories), Some(tags)) => Some(DashboardStats {
            total_posts: posts.pagination.total,
            total_categories: categories.len(),
            total_tags: tags.len(),
            recent_posts: posts.data.iter().map(RecentPost::from).collect(),
        }),
        _ => None,
    };

    QueryResult {
        is_loading: stats.is_none(),
        data: stats,
        error: None,
    }
    .into_state()
}
