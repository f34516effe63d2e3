//! blogdesk: operator CLI over the admin client core.

mod args;
mod client;
mod handlers;
mod io;
mod print;


use std::process::ExitCode;

use blogdesk::infra::telemetry;
use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, Ctx, load_settings};
use handlers::{categories, dashboard, posts, tags};
use print::print_toasts;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.messages() {
                eprintln!("error: {line}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(&cli)?;
    telemetry::init(&settings.logging)?;
    let ctx = Ctx::new(settings)?;

    let result = dispatch(&ctx, cli.command).await;
    print_toasts(&ctx.admin.toasts().drain());
    result
}

async fn dispatch(ctx: &Ctx, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Posts(cmd) => posts::handle(ctx, cmd.action).await,
        Commands::Categories(cmd) => categories::handle(ctx, cmd.action).await,
        Commands::Tags(cmd) => tags::handle(ctx, cmd.action).await,
        Commands::Dashboard => dashboard::handle(ctx).await,
    }
}
