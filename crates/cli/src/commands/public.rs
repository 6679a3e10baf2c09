//! Public admissions: catalog, application and tracking

use crate::context::Context;
use crate::output::{emit, field, heading, notice, or_dash, reply};
use clap::Args;
use dialoguer::Confirm;
use shared::{AdmissionForm, EntityId};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CatalogCommand {
    /// Show the brochure (subjects) of one class
    #[arg(long)]
    pub class: Option<String>,
}

impl CatalogCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.class {
            Some(class) => {
                ctx.enter(&format!("/admissions/brochure/{}", class)).await?;
                let id = EntityId::parse(class);
                let class = ctx.call("Loading brochure", |c| async move { c.class(&id).await }).await?;
                emit(ctx.json, &class, |class| {
                    heading(&class.label());
                    if let Some(seats) = class.section_capacity {
                        field("Seats", seats);
                    }
                    for subject in &class.subjects {
                        println!("  {:<28} {}", subject.name, or_dash(subject.code.as_deref()));
                    }
                })
            }
            None => {
                ctx.enter("/admissions").await?;
                let classes = ctx.call("Loading programmes", |c| async move { c.classes().await }).await?;
                emit(ctx.json, &classes, |classes| {
                    heading("Programmes");
                    for class in classes {
                        println!("  {:<6} {}", class.class_id, class.label());
                    }
                })
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Application form as YAML or JSON
    #[arg(short, long)]
    pub file: PathBuf,
}

impl ApplyCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/apply").await?;
        let form = read_form(&self.file)?;
        form.validate()?;
        let message = ctx.call("Submitting application", |c| async move { c.apply(&form).await }).await?;
        reply(&message, "Application submitted");
        Ok(())
    }
}

fn read_form(path: &Path) -> anyhow::Result<AdmissionForm> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    Ok(if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    })
}

#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Email used on the application
    pub email: String,
    /// Accept an approved offer without asking
    #[arg(long)]
    pub accept: bool,
}

impl TrackCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/track-application").await?;
        let email = self.email.trim().to_string();
        if email.is_empty() {
            anyhow::bail!("Email is required");
        }
        let application = ctx
            .call("Looking up application", |c| async move { c.application_status(&email).await })
            .await?;

        emit(ctx.json, &application, |a| {
            heading(&a.applicant_name);
            field("Programme", or_dash(a.program_name.as_deref()));
            field("Applied", or_dash(a.applied_at.as_deref()));
            field("Status", a.status);
        })?;

        if !application.can_finalize() {
            return Ok(());
        }
        let accept = if self.accept {
            true
        } else if ctx.json {
            false
        } else {
            Confirm::new()
                .with_prompt("Your application was approved. Accept the offer now?")
                .default(false)
                .interact()?
        };
        if accept {
            let id = application.application_id.clone();
            let message = ctx.call("Finalizing", |c| async move { c.finalize_application(&id).await }).await?;
            reply(&message, "Admission finalized");
        } else if !ctx.json {
            notice("You can accept later with `erp track --accept`.");
        }
        Ok(())
    }
}
