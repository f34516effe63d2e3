use blogdesk::application::error::AppError;
use blogdesk::application::filters::{PostFilterComposer, Selection};
use blogdesk::application::pagination::{PostPageView, TimeRange};
use blogdesk::application::session::post_filters;
use blogdesk::domain::validation::{validate_create_post, validate_update_post};
use blogdesk_api_types::{CreatePostRequest, UpdatePostRequest};
use time::OffsetDateTime;

use super::query_data;
use crate::args::PostsCmd;
use crate::client::{CliError, Ctx};
use crate::io::{parse_id_list, read_opt_value, read_value};
use crate::print::print_json;

/// Filter flags exactly as typed; `None` means the flag was not given.
#[derive(Debug, Default)]
pub struct ListFlags {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub time_range: Option<String>,
    pub page: u32,
    pub limit: Option<u32>,
}

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List {
            search,
            category,
            tag,
            month,
            year,
            time_range,
            page,
            limit,
        } => {
            let flags = ListFlags {
                search,
                category,
                tag,
                month,
                year,
                time_range,
                page,
                limit,
            };
            list(ctx, flags).await
        }
        PostsCmd::Get { id } => get(ctx, id).await,
        PostsCmd::Create {
            title,
            content,
            content_file,
            excerpt,
            category_id,
            tags,
        } => {
            let request = CreatePostRequest {
                title,
                content: read_value(content, content_file)?,
                excerpt,
                category_id,
                tags: parse_id_list(&tags)?,
            };
            create(ctx, request).await
        }
        PostsCmd::Update {
            id,
            title,
            content,
            content_file,
            excerpt,
            category_id,
            tags,
        } => {
            let request = UpdatePostRequest {
                title,
                content: read_opt_value(content, content_file)?,
                excerpt,
                category_id,
                tags: tags.as_deref().map(parse_id_list).transpose()?,
            };
            update(ctx, id, request).await
        }
        PostsCmd::Delete { id } => delete(ctx, id).await,
    }
}

/// Build the composer state a list request is issued from. Filters are
/// applied first and the page last, since every filter change resets it.
pub fn compose_filters(
    mut composer: PostFilterComposer,
    flags: &ListFlags,
) -> Result<PostFilterComposer, CliError> {
    if let Some(limit) = flags.limit {
        composer.set_limit(limit).map_err(AppError::from)?;
    }
    if let Some(search) = flags.search.as_deref() {
        composer.commit_search(search);
    }
    if let Some(raw) = flags.category.as_deref() {
        composer.set_category(selection("category", raw)?);
    }
    if let Some(raw) = flags.tag.as_deref() {
        composer.set_tag(selection("tag", raw)?);
    }
    if let Some(raw) = flags.month.as_deref() {
        composer
            .set_month(selection("month", raw)?)
            .map_err(AppError::from)?;
    }
    if let Some(raw) = flags.year.as_deref() {
        composer.set_year(selection("year", raw)?);
    }
    if let Some(raw) = flags.time_range.as_deref() {
        composer.set_time_range(selection::<TimeRange>("time range", raw)?);
    }
    composer.set_page(flags.page);
    Ok(composer)
}

fn selection<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<Option<T>, CliError> {
    Ok(Selection::parse(field, raw)
        .map_err(AppError::from)?
        .into_option())
}

async fn list(ctx: &Ctx, flags: ListFlags) -> Result<(), CliError> {
    let composer = compose_filters(post_filters(&ctx.settings), &flags)?;
    let response = query_data(ctx.admin.queries.posts(&composer.params()).await)?;
    let view = PostPageView::new(
        response,
        composer.filters().time_range,
        OffsetDateTime::now_utc(),
    );
    print_json(&view)
}

async fn get(ctx: &Ctx, id: String) -> Result<(), CliError> {
    let post = query_data(ctx.admin.queries.post(&id).await)?;
    print_json(&post)
}

async fn create(ctx: &Ctx, request: CreatePostRequest) -> Result<(), CliError> {
    let payload = validate_create_post(request).map_err(AppError::from)?;
    let post = ctx.admin.mutations.create_post(payload).await?;
    print_json(&post)
}

async fn update(ctx: &Ctx, id: String, request: UpdatePostRequest) -> Result<(), CliError> {
    if request.is_empty() {
        return Err(CliError::InvalidInput("nothing to update".into()));
    }
    let payload = validate_update_post(request).map_err(AppError::from)?;
    let post = ctx.admin.mutations.update_post(&id, payload).await?;
    print_json(&post)
}

async fn delete(ctx: &Ctx, id: String) -> Result<(), CliError> {
    let message = ctx.admin.mutations.delete_post(&id).await?;
    print_json(&serde_json::json!({ "message": message }))
}
