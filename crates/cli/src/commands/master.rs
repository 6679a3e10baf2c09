//! Master data screens: classes, subjects and classrooms

use crate::context::Context;
use crate::output::{confirmed, emit, heading, notice, or_dash, reply, success};
use anyhow::bail;
use clap::{Args, Subcommand};
use shared::{ClassForm, ClassroomForm, EntityId, SubjectForm};

fn required(label: &str, value: &str) -> anyhow::Result<String> {
    let value = value.trim();
    if value.is_empty() {
        bail!("{} is required", label);
    }
    Ok(value.to_string())
}

#[derive(Debug, Args)]
pub struct ClassesCommand {
    #[command(subcommand)]
    pub command: ClassesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ClassesSubcommand {
    /// List classes
    List,
    /// Create a class section
    Add {
        /// e.g. "BSc CS Year 1"
        #[arg(long)]
        grade: String,
        #[arg(long)]
        section: String,
        #[arg(long, default_value_t = 60)]
        capacity: u32,
    },
    /// Change a class section
    Update {
        id: String,
        #[arg(long)]
        grade: String,
        #[arg(long)]
        section: String,
        #[arg(long, default_value_t = 60)]
        capacity: u32,
    },
    /// Delete a class with no enrolled students
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

impl ClassesCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/manage-classes").await?;
        match &self.command {
            ClassesSubcommand::List => {
                let classes = ctx.call("Loading classes", |c| async move { c.classes().await }).await?;
                emit(ctx.json, &classes, |classes| {
                    heading("Classes");
                    if classes.is_empty() {
                        notice("No classes yet.");
                    }
                    for class in classes {
                        let capacity = class.section_capacity.map(|c| c.to_string());
                        println!("  {:<8} {:<32} {:>4} seats", class.class_id, class.label(), or_dash(capacity.as_deref()));
                    }
                })
            }
            ClassesSubcommand::Add { grade, section, capacity } => {
                let form = ClassForm {
                    grade_level: required("Grade level", grade)?,
                    section: required("Section", section)?,
                    section_capacity: *capacity,
                };
                let class = ctx.call("Creating class", |c| async move { c.create_class(&form).await }).await?;
                success(&format!("Class {} created (id {})", class.label(), class.class_id));
                Ok(())
            }
            ClassesSubcommand::Update { id, grade, section, capacity } => {
                let form = ClassForm {
                    grade_level: required("Grade level", grade)?,
                    section: required("Section", section)?,
                    section_capacity: *capacity,
                };
                let id = EntityId::parse(id);
                let class = ctx.call("Updating class", |c| async move { c.update_class(&id, &form).await }).await?;
                success(&format!("Class {} updated", class.label()));
                Ok(())
            }
            ClassesSubcommand::Delete { id, yes } => {
                let prompt = "Are you sure you want to delete this class? This can only be done if no students are enrolled.";
                if !confirmed(*yes, prompt)? {
                    return Ok(());
                }
                let id = EntityId::parse(id);
                let message = ctx.call("Deleting class", |c| async move { c.delete_class(&id).await }).await?;
                reply(&message, "Class deleted");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct SubjectsCommand {
    #[command(subcommand)]
    pub command: SubjectsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum SubjectsSubcommand {
    /// List subjects
    List,
    /// Create a subject
    Add {
        #[arg(long)]
        name: String,
        /// Course code, e.g. CS201
        #[arg(long)]
        code: Option<String>,
    },
    /// Rename a subject or change its code
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: Option<String>,
    },
    /// Delete a subject
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

impl SubjectsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/manage-subjects").await?;
        match &self.command {
            SubjectsSubcommand::List => {
                let subjects = ctx.call("Loading subjects", |c| async move { c.subjects().await }).await?;
                emit(ctx.json, &subjects, |subjects| {
                    heading("Subjects");
                    for s in subjects {
                        println!("  {:<8} {:<10} {}", s.subject_id, or_dash(s.code.as_deref()), s.name);
                    }
                })
            }
            SubjectsSubcommand::Add { name, code } => {
                let form = SubjectForm { name: required("Subject name", name)?, code: code.clone() };
                let subject = ctx.call("Creating subject", |c| async move { c.create_subject(&form).await }).await?;
                success(&format!("Subject {} created (id {})", subject.name, subject.subject_id));
                Ok(())
            }
            SubjectsSubcommand::Update { id, name, code } => {
                let form = SubjectForm { name: required("Subject name", name)?, code: code.clone() };
                let id = EntityId::parse(id);
                let subject = ctx
                    .call("Updating subject", |c| async move { c.update_subject(&id, &form).await })
                    .await?;
                success(&format!("Subject {} updated", subject.name));
                Ok(())
            }
            SubjectsSubcommand::Delete { id, yes } => {
                if !confirmed(*yes, "Are you sure you want to delete this subject?")? {
                    return Ok(());
                }
                let id = EntityId::parse(id);
                let message = ctx.call("Deleting subject", |c| async move { c.delete_subject(&id).await }).await?;
                reply(&message, "Subject deleted");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct ClassroomsCommand {
    #[command(subcommand)]
    pub command: ClassroomsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ClassroomsSubcommand {
    /// List classrooms
    List,
    /// Add a classroom
    Add {
        /// e.g. LH-101
        #[arg(long)]
        room: String,
        #[arg(long, default_value_t = 60)]
        capacity: u32,
    },
    /// Change a classroom
    Update {
        id: String,
        #[arg(long)]
        room: String,
        #[arg(long, default_value_t = 60)]
        capacity: u32,
    },
    /// Delete a classroom
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

impl ClassroomsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/manage-classrooms").await?;
        match &self.command {
            ClassroomsSubcommand::List => {
                let rooms = ctx.call("Loading classrooms", |c| async move { c.classrooms().await }).await?;
                emit(ctx.json, &rooms, |rooms| {
                    heading("Classrooms");
                    for r in rooms {
                        let capacity = r.capacity.map(|c| c.to_string());
                        println!("  {:<8} {:<12} {:>4} seats", r.classroom_id, r.room_number, or_dash(capacity.as_deref()));
                    }
                })
            }
            ClassroomsSubcommand::Add { room, capacity } => {
                let form = ClassroomForm { room_number: required("Room number", room)?, capacity: *capacity };
                let created = ctx
                    .call("Creating classroom", |c| async move { c.create_classroom(&form).await })
                    .await?;
                success(&format!("Classroom {} created (id {})", created.room_number, created.classroom_id));
                Ok(())
            }
            ClassroomsSubcommand::Update { id, room, capacity } => {
                let form = ClassroomForm { room_number: required("Room number", room)?, capacity: *capacity };
                let id = EntityId::parse(id);
                let updated = ctx
                    .call("Updating classroom", |c| async move { c.update_classroom(&id, &form).await })
                    .await?;
                success(&format!("Classroom {} updated", updated.room_number));
                Ok(())
            }
            ClassroomsSubcommand::Delete { id, yes } => {
                if !confirmed(*yes, "Are you sure you want to delete this classroom?")? {
                    return Ok(());
                }
                let id = EntityId::parse(id);
                let message = ctx
                    .call("Deleting classroom", |c| async move { c.delete_classroom(&id).await })
                    .await?;
                reply(&message, "Classroom deleted");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Section", "  A ").unwrap(), "A");
        assert_eq!(required("Section", " ").unwrap_err().to_string(), "Section is required");
    }
}
