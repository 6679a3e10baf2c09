//! Staff screens: admissions queue and the admin dashboard

use crate::context::Context;
use crate::output::{emit, field, heading, notice, or_dash, reply, success};
use clap::{Args, Subcommand};
use dialoguer::Select;
use shared::EntityId;

#[derive(Debug, Args)]
pub struct AdmissionsCommand {
    #[command(subcommand)]
    pub command: AdmissionsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AdmissionsSubcommand {
    /// Applications waiting for review
    Pending,
    /// Approve an application
    Approve {
        /// Application id
        id: String,
    },
    /// Create the student account for a finalized application
    Register {
        /// Application id
        id: String,
        /// Mentor (teacher) id; chosen from a list when omitted
        #[arg(long)]
        mentor: Option<String>,
    },
}

impl AdmissionsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/manage-admissions").await?;
        match &self.command {
            AdmissionsSubcommand::Pending => {
                let applications = ctx
                    .call("Loading applications", |c| async move { c.pending_admissions().await })
                    .await?;
                emit(ctx.json, &applications, |applications| {
                    heading("Pending Admissions");
                    if applications.is_empty() {
                        notice("No applications waiting.");
                    }
                    for a in applications {
                        println!(
                            "  {:<8} {:<24} {:<28} {:<20} {}",
                            a.application_id,
                            a.applicant_name,
                            a.applicant_email,
                            or_dash(a.program_name.as_deref()),
                            a.status
                        );
                    }
                })
            }
            AdmissionsSubcommand::Approve { id } => {
                let id = EntityId::parse(id);
                let message = ctx.call("Approving", |c| async move { c.approve_admission(&id).await }).await?;
                reply(&message, "Application approved");
                Ok(())
            }
            AdmissionsSubcommand::Register { id, mentor } => {
                let mentor = match mentor {
                    Some(mentor) => EntityId::parse(mentor),
                    None => pick_mentor(ctx).await?,
                };
                let id = EntityId::parse(id);
                let student = ctx
                    .call("Registering student", |c| async move { c.register_student(&id, &mentor).await })
                    .await?;
                emit(ctx.json, &student, |s| {
                    success(&format!("Registered {}", s.full_name));
                    field("Roll number", or_dash(s.roll_number.as_deref()));
                    if let Some(password) = &s.password {
                        field("Temporary password", password);
                        notice("The temporary password is shown only once.");
                    }
                })
            }
        }
    }
}

async fn pick_mentor(ctx: &mut Context) -> anyhow::Result<EntityId> {
    let teachers = ctx.call("Loading teachers", |c| async move { c.teachers().await }).await?;
    if teachers.is_empty() {
        anyhow::bail!("No teachers available to mentor the student");
    }
    let names: Vec<&str> = teachers.iter().map(|t| t.full_name.as_str()).collect();
    let choice = Select::new().with_prompt("Mentor").items(&names).default(0).interact()?;
    Ok(teachers[choice].user_id.clone())
}

#[derive(Debug, Args)]
pub struct AnalyticsCommand {}

impl AnalyticsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/admin-dashboard").await?;
        let analytics = ctx.call("Loading analytics", |c| async move { c.analytics().await }).await?;

        emit(ctx.json, &analytics, |a| {
            heading("Dashboard");
            field("Students", a.total_students);
            field("Teachers", a.total_teachers);
            field("Hostel residents", a.hostel_residents);
            if a.class_count() > 0 {
                println!();
                heading("Students per class");
                for (class, count) in &a.students_per_class {
                    println!("  {:<28} {}", class, count);
                }
            }
        })
    }
}
