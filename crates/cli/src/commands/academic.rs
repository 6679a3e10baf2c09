//! Academic admin screens: timetables, progression, curricula, mentors and
//! the teacher and student directories

use crate::commands::student::{print_grid, print_list};
use crate::context::Context;
use crate::output::{confirmed, emit, field, heading, notice, or_dash, reply, success};
use academics::{curriculum, plan_slot, select_students, SlotRequest, TimetableGrid};
use anyhow::{anyhow, bail};
use chrono::NaiveTime;
use clap::{ArgAction, Args, Subcommand};
use shared::{DayOfWeek, EntityId, MentorAssignment, Promotion, StudentStatusUpdate, StudentSummary};

/// "14:00" or "14:00:00"
pub fn parse_time(text: &str) -> Result<NaiveTime, String> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| format!("'{}' is not a time (HH:MM)", text))
}

/// "subject:teacher" pairing for a curriculum
pub fn parse_pair(text: &str) -> Result<(EntityId, EntityId), String> {
    match text.split_once(':') {
        Some((subject, teacher)) if !subject.trim().is_empty() && !teacher.trim().is_empty() => {
            Ok((EntityId::parse(subject), EntityId::parse(teacher)))
        }
        _ => Err(format!("'{}' is not SUBJECT:TEACHER", text)),
    }
}

fn ids(values: &[String]) -> Vec<EntityId> {
    values.iter().filter(|v| !v.trim().is_empty()).map(|v| EntityId::parse(v)).collect()
}

async fn roster(ctx: &mut Context, class_id: &EntityId) -> anyhow::Result<Vec<StudentSummary>> {
    let class_id = class_id.clone();
    ctx.call("Loading students", |c| async move { c.class_students(&class_id).await }).await
}

fn print_students(students: &[StudentSummary]) {
    if students.is_empty() {
        notice("No students found.");
    }
    for s in students {
        let fees = match s.fee_paid {
            Some(true) => "Paid",
            Some(false) => "Pending",
            None => "-",
        };
        println!(
            "  {:<38} {:<24} {:<10} {:<20} {:<8} {}",
            s.user_id,
            s.full_name,
            or_dash(s.roll_number.as_deref()),
            or_dash(s.mentor_name.as_deref()),
            fees,
            s.academic_status.as_deref().unwrap_or("PENDING")
        );
    }
}

#[derive(Debug, Args)]
pub struct TimetablesCommand {
    #[command(subcommand)]
    pub command: TimetablesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum TimetablesSubcommand {
    /// Weekly timetable of a class
    Show {
        class: String,
        /// List slots instead of drawing the grid
        #[arg(long)]
        list: bool,
    },
    /// Put a subject into a free period
    Schedule {
        class: String,
        /// MONDAY..FRIDAY (or MON..FRI)
        #[arg(long)]
        day: DayOfWeek,
        /// Period start, e.g. 09:00
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        classroom: Option<String>,
    },
}

impl TimetablesCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/manage-timetables").await?;
        match &self.command {
            TimetablesSubcommand::Show { class, list } => {
                let grid = load_grid(ctx, &EntityId::parse(class)).await?;
                emit(ctx.json, &grid.slots(), |_| {
                    if grid.slots().is_empty() {
                        notice("No classes scheduled.");
                    } else if *list {
                        print_list(&grid);
                    } else {
                        print_grid(&grid);
                    }
                })
            }
            TimetablesSubcommand::Schedule { class, day, start, subject, teacher, classroom } => {
                let class_id = EntityId::parse(class);
                let mut grid = load_grid(ctx, &class_id).await?;
                let teachers = ctx
                    .call("Loading teachers", |c| async move { c.registered_teachers().await })
                    .await?;
                let teacher_id = EntityId::parse(teacher);
                let teacher = teachers
                    .iter()
                    .find(|t| t.user_id == teacher_id)
                    .ok_or_else(|| anyhow!("Unknown teacher {}", teacher_id))?;

                let slot = plan_slot(
                    &grid,
                    SlotRequest {
                        class_id,
                        day: *day,
                        start: *start,
                        subject_id: EntityId::parse(subject),
                        teacher,
                        classroom_id: classroom.as_deref().map(EntityId::parse),
                    },
                )?;
                let created = ctx
                    .call("Scheduling class", |c| async move { c.create_timetable_slot(&slot).await })
                    .await?;
                grid.insert(created.clone());

                emit(ctx.json, &created, |_| {
                    success("Class scheduled successfully!");
                    print_grid(&grid);
                })
            }
        }
    }
}

async fn load_grid(ctx: &mut Context, class_id: &EntityId) -> anyhow::Result<TimetableGrid> {
    let class_id = class_id.clone();
    let slots = ctx
        .call("Loading timetable", |c| async move { c.class_timetable(&class_id).await })
        .await?;
    Ok(TimetableGrid::new(slots))
}

#[derive(Debug, Args)]
pub struct ProgressionCommand {
    #[command(subcommand)]
    pub command: ProgressionSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProgressionSubcommand {
    /// Students of a class with fee and academic status
    Students { class: String },
    /// Move selected students of a class into another class
    Promote {
        class: String,
        /// Class to promote into
        #[arg(long)]
        to: String,
        /// Comma-separated student ids
        #[arg(long, value_delimiter = ',', required = true)]
        students: Vec<String>,
    },
    /// Record a student's fee and academic status
    Status {
        student: String,
        #[arg(long, action = ArgAction::Set)]
        fee_paid: bool,
        #[arg(long, default_value = "PENDING", value_parser = ["PENDING", "PASS", "FAIL"])]
        academic_status: String,
    },
}

impl ProgressionCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/student-progression").await?;
        match &self.command {
            ProgressionSubcommand::Students { class } => {
                let students = roster(ctx, &EntityId::parse(class)).await?;
                emit(ctx.json, &students, |students| {
                    heading(&format!("Students of class {}", class));
                    print_students(students);
                })
            }
            ProgressionSubcommand::Promote { class, to, students } => {
                let class_id = EntityId::parse(class);
                let next_class_id = EntityId::parse(to);
                if next_class_id == class_id {
                    bail!("Students are already in class {}", class_id);
                }
                let roster = roster(ctx, &class_id).await?;
                let student_ids = select_students(&roster, &ids(students), &class_id)?;
                let count = student_ids.len();
                let promotion = Promotion { student_ids, next_class_id };
                let message = ctx
                    .call("Promoting students", |c| async move { c.promote_students(&promotion).await })
                    .await?;
                reply(&message, &format!("Students promoted successfully! ({})", count));
                Ok(())
            }
            ProgressionSubcommand::Status { student, fee_paid, academic_status } => {
                let id = EntityId::parse(student);
                let update = StudentStatusUpdate { fee_paid: *fee_paid, academic_status: academic_status.clone() };
                let updated = ctx
                    .call("Updating status", |c| async move { c.update_student_status(&id, &update).await })
                    .await?;
                emit(ctx.json, &updated, |s| {
                    success("Student status updated successfully!");
                    print_students(std::slice::from_ref(s));
                })
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct DesignCommand {
    #[command(subcommand)]
    pub command: DesignSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum DesignSubcommand {
    /// Subjects and teachers of a class
    Show { class: String },
    /// Replace a class curriculum
    Set {
        class: String,
        /// SUBJECT:TEACHER, repeatable
        #[arg(long = "pair", value_parser = parse_pair, required = true)]
        pairs: Vec<(EntityId, EntityId)>,
    },
}

impl DesignCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/class-designer").await?;
        match &self.command {
            DesignSubcommand::Show { class } => {
                let class_id = EntityId::parse(class);
                let design = ctx
                    .call("Loading curriculum", |c| async move { c.class_design(&class_id).await })
                    .await?;
                emit(ctx.json, &design, |design| {
                    heading(&format!("Curriculum of class {}", class));
                    if design.is_empty() {
                        notice("No subjects assigned.");
                    }
                    for entry in design {
                        println!("  subject {:<8} teacher {}", entry.subject_id, entry.teacher_id);
                    }
                })
            }
            DesignSubcommand::Set { class, pairs } => {
                let teachers = ctx
                    .call("Loading teachers", |c| async move { c.registered_teachers().await })
                    .await?;
                let entries = curriculum(pairs, &teachers)?;
                let class_id = EntityId::parse(class);
                let message = ctx
                    .call("Saving curriculum", |c| async move { c.save_class_design(&class_id, &entries).await })
                    .await?;
                reply(&message, "Curriculum saved successfully!");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct MentorsCommand {
    /// Class whose students get the mentor
    pub class: String,
    /// Mentor (teacher) id
    #[arg(long)]
    pub mentor: String,
    /// Comma-separated student ids
    #[arg(long, value_delimiter = ',', required = true)]
    pub students: Vec<String>,
}

impl MentorsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/mentor-assignment").await?;
        let mentor_id = EntityId::parse(&self.mentor);
        let teachers = ctx.call("Loading teachers", |c| async move { c.teachers().await }).await?;
        let mentor = teachers
            .iter()
            .find(|t| t.user_id == mentor_id)
            .ok_or_else(|| anyhow!("Unknown teacher {}", mentor_id))?;
        let mentor_name = mentor.full_name.clone();

        let class_id = EntityId::parse(&self.class);
        let roster = roster(ctx, &class_id).await?;
        let student_ids = select_students(&roster, &ids(&self.students), &class_id)?;
        let assignment = MentorAssignment { student_ids, mentor_id };
        let message = ctx
            .call("Assigning mentor", |c| async move { c.assign_mentor(&assignment).await })
            .await?;
        reply(&message, &format!("Mentor assigned successfully! ({})", mentor_name));
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct TeachersCommand {
    #[command(subcommand)]
    pub command: TeachersSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum TeachersSubcommand {
    /// Registered teachers
    List {
        /// Only teachers of this class
        #[arg(long)]
        class: Option<String>,
    },
    /// Remove a teacher account
    Remove {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

impl TeachersCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/view-teachers").await?;
        match &self.command {
            TeachersSubcommand::List { class } => {
                let teachers = match class {
                    Some(class) => {
                        let class_id = EntityId::parse(class);
                        ctx.call("Loading teachers", |c| async move { c.teachers_by_class(&class_id).await })
                            .await?
                    }
                    None => {
                        ctx.call("Loading teachers", |c| async move { c.registered_teachers().await })
                            .await?
                    }
                };
                emit(ctx.json, &teachers, |teachers| {
                    heading("Teachers");
                    if teachers.is_empty() {
                        notice("No teachers found.");
                    }
                    for t in teachers {
                        let subjects: Vec<&str> = t.taught_subjects.iter().map(|s| s.name.as_str()).collect();
                        println!("  {:<38} {:<24} {:<28} {}", t.user_id, t.full_name, or_dash(t.email.as_deref()), subjects.join(", "));
                    }
                })
            }
            TeachersSubcommand::Remove { id, yes } => {
                let id = EntityId::parse(id);
                let lookup = id.clone();
                let teachers = ctx
                    .call("Loading teachers", |c| async move { c.registered_teachers().await })
                    .await?;
                let name = teachers
                    .iter()
                    .find(|t| t.user_id == lookup)
                    .map(|t| t.full_name.clone())
                    .ok_or_else(|| anyhow!("Unknown teacher {}", lookup))?;
                if !confirmed(*yes, &format!("Are you sure you want to remove {}?", name))? {
                    return Ok(());
                }
                let message = ctx.call("Removing teacher", |c| async move { c.delete_user(&id).await }).await?;
                reply(&message, &format!("{} removed", name));
                Ok(())
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct StudentsCommand {
    /// Show one student's record
    pub id: Option<String>,
}

impl StudentsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/view-students").await?;
        match &self.id {
            Some(id) => {
                let id = EntityId::parse(id);
                let student = ctx.call("Loading student", |c| async move { c.user(&id).await }).await?;
                emit(ctx.json, &student, |s| {
                    heading(&s.full_name);
                    field("Id", &s.user_id);
                    field("Email", or_dash(s.email.as_deref()));
                    field("Roll number", or_dash(s.roll_number.as_deref()));
                    field("Mentor", or_dash(s.mentor_name.as_deref()));
                    field("Fees", if s.fee_paid.unwrap_or(false) { "Paid" } else { "Pending" });
                    field("Status", s.academic_status.as_deref().unwrap_or("PENDING"));
                })
            }
            None => {
                let students = ctx
                    .call("Loading students", |c| async move { c.registered_students().await })
                    .await?;
                emit(ctx.json, &students, |students| {
                    heading("Students");
                    print_students(students);
                })
            }
        }
    }
}
