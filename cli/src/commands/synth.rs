//! `webhost synth` — render the web server stack as a CloudFormation template.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::app::AppContext;
use crate::application::ports::TemplateWriter;
use crate::application::services::{config_service, web_stack};
use crate::commands::StackArgs;
use crate::domain::template::TemplateFormat;
use crate::infra::fs::LocalScriptSource;
use crate::output::json;

/// Template serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for TemplateFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

/// Arguments for the synth command.
#[derive(Args, Debug)]
pub struct SynthArgs {
    #[command(flatten)]
    pub stack: StackArgs,

    /// Template format
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    pub format: FormatArg,

    /// Write the template to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run the synth command.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, provisioning fails or
/// the template cannot be written.
pub fn run(app: &AppContext, args: &SynthArgs, writer: &impl TemplateWriter) -> Result<()> {
    let settings = config_service::resolve_settings(&app.config_store, &args.stack.overrides())?;
    let web = web_stack::build_web_stack(
        &settings,
        LocalScriptSource::new(args.stack.project_dir.clone()),
    )?;
    let format = TemplateFormat::from(args.format);
    let rendered = web.synthesize().render(format)?;

    let Some(path) = &args.output else {
        print!("{rendered}");
        return Ok(());
    };

    writer.write(path, &rendered)?;
    tracing::info!(path = %path.display(), %format, "wrote template");
    if app.is_json() {
        json::print(&serde_json::json!({
            "stack": web.stack.name(),
            "format": format.to_string(),
            "path": path,
        }))?;
    } else {
        app.output.success(&format!(
            "Wrote {format} template for {} to {}",
            web.stack.name(),
            path.display()
        ));
    }
    Ok(())
}
