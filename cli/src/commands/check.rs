//! `webhost check` — declare and synthesize without writing anything.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::{config_service, web_stack};
use crate::commands::StackArgs;
use crate::infra::fs::LocalScriptSource;
use crate::output::{HumanRenderer, json};

/// Run the check command.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or provisioning fails.
pub fn run(app: &AppContext, args: &StackArgs) -> Result<()> {
    let settings = config_service::resolve_settings(&app.config_store, &args.overrides())?;
    let web = web_stack::build_web_stack(&settings, LocalScriptSource::new(args.project_dir.clone()))?;
    let template = web.synthesize();
    let summary = web_stack::summarize(&web, &template)?;

    if app.is_json() {
        json::print(&summary)
    } else {
        HumanRenderer::new(&app.output).render_summary(&summary);
        Ok(())
    }
}
