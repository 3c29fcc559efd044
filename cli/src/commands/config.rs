//! `webhost config` — inspect configuration.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::output::{HumanRenderer, json};

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Path => {
            let path = app.config_store.path()?;
            if app.is_json() {
                json::print(&serde_json::json!({ "path": path }))
            } else {
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    if app.is_json() {
        return json::print(&config);
    }
    let path = app.config_store.path()?;
    HumanRenderer::new(&app.output).render_config(&config, &path);
    Ok(())
}
