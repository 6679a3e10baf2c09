//! Account administration: registering users and the staff list

use crate::commands::session::read_face_image;
use crate::context::{Context, NOT_LOGGED_IN};
use crate::output::{confirmed, emit, field, heading, notice, or_dash, reply, success};
use academics::{check_registration, registrable_roles};
use anyhow::{anyhow, bail};
use clap::{Args, Subcommand};
use dialoguer::Password;
use shared::{format_role, EntityId, Role, UserRegistration};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersSubcommand {
    /// Create an account
    Register(RegisterArgs),
    /// Enrol a face image for an existing account
    FaceRegister {
        /// Account id
        user: String,
        #[arg(short, long)]
        image: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Prompted when omitted
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    /// Defaults to the first role you may register
    #[arg(long)]
    pub role: Option<Role>,
    /// Subjects a teacher takes (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub subjects: Vec<String>,
    /// Classes a teacher takes, or the one class a student joins
    #[arg(long, value_delimiter = ',')]
    pub classes: Vec<String>,
    /// Face image to enrol for the new account
    #[arg(long)]
    pub face: Option<PathBuf>,
}

impl RegisterArgs {
    /// Registration body; subject and class lists only travel for the
    /// roles that use them
    pub fn registration(&self, role: Role, password: String) -> UserRegistration {
        let ids = |values: &[String]| values.iter().map(|v| EntityId::parse(v)).collect::<Vec<_>>();
        let (subject_ids, class_ids) = match role {
            Role::Teacher => (ids(&self.subjects), ids(&self.classes)),
            Role::Student => (Vec::new(), ids(&self.classes)),
            _ => (Vec::new(), Vec::new()),
        };
        UserRegistration {
            full_name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password,
            contact_number: self.contact.clone().filter(|c| !c.trim().is_empty()),
            role,
            subject_ids,
            class_ids,
        }
    }
}

impl UsersCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/user-management").await?;
        match &self.command {
            UsersSubcommand::Register(args) => register(ctx, args).await,
            UsersSubcommand::FaceRegister { user, image } => {
                let image = read_face_image(image)?;
                let user = EntityId::parse(user);
                let message = ctx
                    .call("Registering face", |c| async move { c.face_register(&user, image).await })
                    .await?;
                reply(&message, "Face registered");
                Ok(())
            }
        }
    }
}

async fn register(ctx: &mut Context, args: &RegisterArgs) -> anyhow::Result<()> {
    let registrar = ctx.role().await?.ok_or_else(|| anyhow!(NOT_LOGGED_IN))?;
    let role = match args.role {
        Some(role) => role,
        None => *registrable_roles(registrar)
            .first()
            .ok_or_else(|| anyhow!("{} cannot register accounts", format_role(registrar.as_str())))?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt("Temporary password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let registration = args.registration(role, password);
    check_registration(registrar, &registration)?;

    let user = if registrar == Role::SuperStaff {
        ctx.call("Registering staff", |c| async move { c.register_staff(&registration).await })
            .await?
    } else {
        ctx.call("Registering user", |c| async move { c.register_user(&registration).await })
            .await?
    };

    if let Some(face) = &args.face {
        let Some(user_id) = user.user_id.clone() else {
            bail!("Registered {}, but no account id came back to enrol the face with", user.full_name);
        };
        let image = read_face_image(face)?;
        let message = ctx
            .call("Registering face", |c| async move { c.face_register(&user_id, image).await })
            .await?;
        reply(&message, "Face registered");
    }

    emit(ctx.json, &user, |u| {
        success("User registered successfully!");
        field("Name", &u.full_name);
        field("Email", or_dash(u.email.as_deref()));
        field("Role", format_role(u.role.as_deref().unwrap_or(role.as_str())));
        if let Some(id) = &u.user_id {
            field("Id", id);
        }
    })
}

#[derive(Debug, Args)]
pub struct StaffCommand {
    #[command(subcommand)]
    pub command: StaffSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum StaffSubcommand {
    /// Staff accounts
    List,
    /// Remove a staff account
    Remove {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

impl StaffCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/staff-list").await?;
        match &self.command {
            StaffSubcommand::List => {
                let staff = ctx.call("Loading staff", |c| async move { c.staff().await }).await?;
                emit(ctx.json, &staff, |staff| {
                    heading("Staff");
                    if staff.is_empty() {
                        notice("No staff accounts.");
                    }
                    for s in staff {
                        println!(
                            "  {:<38} {:<24} {:<28} {:<20} {}",
                            s.user_id,
                            s.full_name,
                            s.email,
                            format_role(&s.role),
                            or_dash(s.contact_number.as_deref())
                        );
                    }
                })
            }
            StaffSubcommand::Remove { id, yes } => {
                let id = EntityId::parse(id);
                let lookup = id.clone();
                let staff = ctx.call("Loading staff", |c| async move { c.staff().await }).await?;
                let name = staff
                    .iter()
                    .find(|s| s.user_id == lookup)
                    .map(|s| s.full_name.clone())
                    .ok_or_else(|| anyhow!("Unknown staff member {}", lookup))?;
                let prompt = format!("Are you sure you want to remove {}? This action cannot be undone.", name);
                if !confirmed(*yes, &prompt)? {
                    return Ok(());
                }
                let message = ctx.call("Removing staff", |c| async move { c.delete_staff(&id).await }).await?;
                reply(&message, &format!("{} removed", name));
                Ok(())
            }
        }
    }
}
