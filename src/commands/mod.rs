//! CLI command handlers.

mod comment;
mod config;
mod create;
mod edit;
mod ls;
mod show;

pub use comment::cmd_comment;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use edit::{EditOptions, cmd_edit};
pub use ls::cmd_ls;
pub use show::cmd_show;

use crate::config::Config;
use crate::error::Result;

use crate::api::HttpApi;

/// Build the backend client from the on-disk config.
pub(crate) fn api_from_config() -> Result<HttpApi> {
    let config = Config::load()?;
    HttpApi::from_config(&config)
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
