//! Human-readable terminal renderer.

use std::path::Path;

use crate::application::services::web_stack::StackSummary;
use crate::domain::config::WebhostConfig;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the result of `webhost check`.
    pub fn render_summary(&self, summary: &StackSummary) {
        self.ctx.header(&format!("Stack {}", summary.stack_name));
        self.ctx.kv("Instance:", &format!("{} ({})", summary.instance, summary.instance_type));
        self.ctx.kv("Subnet:", &summary.subnet);
        self.ctx.kv("Key pair:", &summary.key_name);
        let ports: Vec<String> = summary.ingress_ports.iter().map(u16::to_string).collect();
        self.ctx.kv("Ingress:", &format!("TCP {}", ports.join(", ")));
        self.ctx.kv("Policies:", &summary.managed_policies.join(", "));
        for (key, value) in &summary.tags {
            self.ctx.kv("Tag:", &format!("{key} = {value}"));
        }
        self.ctx.success(&format!(
            "{} resources, {} parameters, {} outputs",
            summary.resources, summary.parameters, summary.outputs
        ));
    }

    /// Render the effective configuration and where it came from.
    pub fn render_config(&self, config: &WebhostConfig, path: &Path) {
        self.ctx.kv("Config:", &path.display().to_string());
        let unset = "(unset)";
        self.ctx
            .kv("stack_name:", config.stack_name.as_deref().unwrap_or(unset));
        self.ctx
            .kv("identifier:", config.identifier.as_deref().unwrap_or(unset));
        self.ctx
            .kv("key_name:", config.key_name.as_deref().unwrap_or(unset));
        match &config.network {
            Some(network) => {
                self.ctx.kv("vpc_id:", &network.vpc_id);
                for subnet in &network.subnets {
                    self.ctx.kv(
                        "subnet:",
                        &format!("{} ({}, {})", subnet.id, subnet.availability_zone, subnet.kind),
                    );
                }
            }
            None => self.ctx.kv("network:", unset),
        }
    }
}
