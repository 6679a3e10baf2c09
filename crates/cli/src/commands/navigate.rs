//! erp nav / routes / open

use crate::context::Context;
use crate::output::{emit, heading, notice};
use clap::Args;
use console::style;
use portal::RouteDecision;
use rbac::{RouteKind, ROUTES};
use serde_json::json;

#[derive(Debug, Args)]
pub struct NavCommand {}

impl NavCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if ctx.portal.state().is_authenticated() {
            ctx.profile().await?;
        }
        let entries = ctx.portal.navigation();
        emit(ctx.json, &entries, |entries| {
            heading("Navigation");
            for entry in entries {
                println!("  {:<22} {}", entry.label, style(entry.path).dim());
            }
        })
    }
}

#[derive(Debug, Args)]
pub struct RoutesCommand {
    /// Only public or only protected routes
    #[arg(long, value_parser = ["public", "protected"])]
    pub kind: Option<String>,
}

impl RoutesCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let wanted = self.kind.as_deref().map(|k| match k {
            "public" => RouteKind::Public,
            _ => RouteKind::Protected,
        });
        let routes: Vec<_> = ROUTES
            .iter()
            .filter(|r| wanted.map_or(true, |k| r.kind == k))
            .collect();

        emit(ctx.json, &routes, |routes| {
            for route in routes.iter() {
                let kind = match route.kind {
                    RouteKind::Public => style("public   ").green(),
                    RouteKind::Protected => style("protected").yellow(),
                };
                println!("  {} {:<40} {}", kind, route.pattern, route.title);
            }
        })
    }
}

#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Path to open, e.g. /my-result
    pub path: String,
}

impl OpenCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if ctx.portal.state().is_authenticated() {
            ctx.profile().await?;
        }
        let decision = ctx.portal.open(&self.path);
        let value = match &decision {
            RouteDecision::Render(route) => json!({ "render": route }),
            RouteDecision::Redirect(to) => json!({ "redirect": to }),
            RouteDecision::Forbidden(e) => json!({ "forbidden": e.to_string() }),
            RouteDecision::NotFound(path) => json!({ "notFound": path }),
        };

        emit(ctx.json, &value, |_| match &decision {
            RouteDecision::Render(route) => {
                println!("{} {}", style("render").green(), route.route.title);
                for (name, value) in &route.params {
                    println!("  {} = {}", name, value);
                }
            }
            RouteDecision::Redirect(to) => println!("{} {}", style("redirect").cyan(), to),
            RouteDecision::Forbidden(e) => notice(&e.to_string()),
            RouteDecision::NotFound(path) => notice(&format!("No screen at '{}'", path)),
        })
    }
}
