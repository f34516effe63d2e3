use blogdesk::api::ApiError;
use blogdesk::application::AdminClient;
use blogdesk::application::error::AppError;
use blogdesk::config::{self, LoadError, Settings};
use blogdesk::infra::error::InfraError;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn messages(&self) -> Vec<String> {
        match self {
            CliError::App(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// Everything a command handler needs.
#[derive(Clone)]
pub struct Ctx {
    pub admin: AdminClient,
    pub settings: Settings,
}

impl Ctx {
    pub fn new(settings: Settings) -> Result<Self, CliError> {
        let admin = AdminClient::from_settings(&settings)?;
        Ok(Self { admin, settings })
    }
}

pub fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    Ok(config::load(cli.config_file.as_deref(), &cli.overrides)?)
}
