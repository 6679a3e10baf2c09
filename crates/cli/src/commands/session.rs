//! erp login / face-login / logout / whoami / password

use crate::context::{interruptible, Context};
use crate::output::{emit, field, heading, notice, or_dash, reply, success};
use clap::Args;
use dialoguer::{Confirm, Input, Password};
use portal::FaceImage;
use shared::{format_role, PasswordChange, RoleDetails};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Account email; prompted when omitted
    #[arg(short, long)]
    pub email: Option<String>,
}

impl LoginCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if ctx.portal.state().is_authenticated() {
            notice("Already logged in. Run `erp logout` to switch accounts.");
            return Ok(());
        }
        ctx.enter("/login").await?;

        let email = match &self.email {
            Some(email) => email.clone(),
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = Password::new().with_prompt("Password").interact()?;

        let handle = ctx.portal.renew_scope("login");
        interruptible(&ctx.interrupts, "Signing in", handle, ctx.portal.login(&email, &password)).await?;
        welcome(ctx).await
    }
}

#[derive(Debug, Args)]
pub struct FaceLoginCommand {
    /// JPEG image of the face to sign in with
    #[arg(short, long)]
    pub image: PathBuf,
}

impl FaceLoginCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/face-login").await?;
        let image = read_face_image(&self.image)?;

        let handle = ctx.portal.renew_scope("face-login");
        interruptible(&ctx.interrupts, "Verifying face", handle, ctx.portal.face_login(image)).await?;
        welcome(ctx).await
    }
}

/// Face capture from a file on disk
pub(crate) fn read_face_image(path: &Path) -> anyhow::Result<FaceImage> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "capture.jpg".to_string());
    Ok(FaceImage { bytes, file_name })
}

async fn welcome(ctx: &mut Context) -> anyhow::Result<()> {
    let profile = ctx.profile().await?;
    success(&format!("Welcome, {} ({})", profile.full_name, format_role(&profile.role)));
    Ok(())
}

#[derive(Debug, Args)]
pub struct LogoutCommand {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl LogoutCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if !ctx.portal.state().is_authenticated() {
            notice("Not logged in.");
            return Ok(());
        }
        if !self.yes && !Confirm::new().with_prompt("Log out?").default(true).interact()? {
            return Ok(());
        }
        ctx.portal.logout().await?;
        success("Logged out");
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/profile").await?;
        let profile = ctx.profile().await?;

        emit(ctx.json, &profile, |p| {
            heading(&format!("{}  [{}]", p.full_name, p.initials()));
            field("Email", &p.email);
            field("Role", format_role(&p.role));
            field("Contact", or_dash(p.contact_number.as_deref()));
            match p.details() {
                RoleDetails::Teacher { classes, subjects } => {
                    let classes: Vec<String> = classes.iter().map(|c| c.label()).collect();
                    let subjects: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
                    field("Classes", classes.join(", "));
                    field("Subjects", subjects.join(", "));
                }
                RoleDetails::Student { roll_number, mentor_name, fee_paid, academic_status } => {
                    field("Roll number", or_dash(roll_number));
                    field("Mentor", or_dash(mentor_name));
                    field("Fees", if fee_paid { "Paid" } else { "Due" });
                    field("Status", or_dash(academic_status));
                }
                RoleDetails::Staff => {}
            }
        })
    }
}

#[derive(Debug, Args)]
pub struct PasswordCommand {}

impl PasswordCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/profile").await?;
        let old = Password::new().with_prompt("Current password").interact()?;
        let new = Password::new().with_prompt("New password").interact()?;
        let confirm = Password::new().with_prompt("Confirm new password").interact()?;
        let change = PasswordChange::new(&old, &new, &confirm)?;

        let message = ctx
            .call("Changing password", |client| async move { client.change_password(&change).await })
            .await?;
        reply(&message, "Password changed");
        Ok(())
    }
}
