use blogdesk::application::error::AppError;
use blogdesk::domain::validation::{validate_create_category, validate_update_category};
use blogdesk_api_types::{CreateCategoryRequest, UpdateCategoryRequest};

use super::query_data;
use crate::args::CategoriesCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: CategoriesCmd) -> Result<(), CliError> {
    match cmd {
        CategoriesCmd::List => {
            let categories = query_data(ctx.admin.queries.categories().await)?;
            print_json(&categories)
        }
        CategoriesCmd::Get { id } => {
            let category = query_data(ctx.admin.queries.category(id).await)?;
            print_json(&category)
        }
        CategoriesCmd::Create { name, description } => {
            let payload = validate_create_category(CreateCategoryRequest { name, description })
                .map_err(AppError::from)?;
            let category = ctx.admin.mutations.create_category(payload).await?;
            print_json(&category)
        }
        CategoriesCmd::Update {
            id,
            name,
            description,
        } => {
            let payload = validate_update_category(UpdateCategoryRequest { name, description })
                .map_err(AppError::from)?;
            let category = ctx.admin.mutations.update_category(id, payload).await?;
            print_json(&category)
        }
        CategoriesCmd::Delete { id } => {
            let message = ctx.admin.mutations.delete_category(id).await?;
            print_json(&serde_json::json!({ "message": message }))
        }
    }
}
