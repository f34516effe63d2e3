use blogdesk::application::dashboard::load_dashboard;
use blogdesk::application::error::AppError;
use blogdesk::application::state::QueryState;

use crate::client::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx) -> Result<(), CliError> {
    match load_dashboard(&ctx.admin.queries).await {
        QueryState::Failed(error) => Err(AppError::query(error).into()),
        state => print_json(&state),
    }
}
