use blogdesk::application::error::AppError;
use blogdesk::domain::validation::{validate_create_tag, validate_update_tag};
use blogdesk_api_types::{CreateTagRequest, UpdateTagRequest};

use super::query_data;
use crate::args::TagsCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: TagsCmd) -> Result<(), CliError> {
    match cmd {
        TagsCmd::List => {
            let tags = query_data(ctx.admin.queries.tags().await)?;
            print_json(&tags)
        }
        TagsCmd::Get { id } => {
            let tag = query_data(ctx.admin.queries.tag(id).await)?;
            print_json(&tag)
        }
        TagsCmd::Create { name } => {
            let payload =
                validate_create_tag(CreateTagRequest { name }).map_err(AppError::from)?;
            let tag = ctx.admin.mutations.create_tag(payload).await?;
            print_json(&tag)
        }
        TagsCmd::Update { id, name } => {
            let payload =
                validate_update_tag(UpdateTagRequest { name }).map_err(AppError::from)?;
            let tag = ctx.admin.mutations.update_tag(id, payload).await?;
            print_json(&tag)
        }
        TagsCmd::Delete { id } => {
            let message = ctx.admin.mutations.delete_tag(id).await?;
            print_json(&serde_json::json!({ "message": message }))
        }
    }
}
