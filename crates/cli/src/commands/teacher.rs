//! Teacher screens: risk dashboard, marks upload, attendance taking and
//! course material

use crate::context::Context;
use crate::output::{confirmed, emit, field, heading, notice, reply, success};
use academics::{filter_by_level, AttendanceRoster, MarkSheet, RiskCounts, RiskIndicator, RiskLevel};
use anyhow::{anyhow, bail};
use clap::{Args, Subcommand};
use console::style;
use portal::MaterialUpload;
use shared::{AttendanceStatus, EntityId, ExamType, Role};
use std::path::Path;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RiskCommand {
    /// Only show one bucket: high, medium or low
    #[arg(long)]
    pub level: Option<RiskLevel>,
}

impl RiskCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/risk-dashboard").await?;
        let profiles = ctx.call("Loading risk dashboard", |c| async move { c.risk_dashboard().await }).await?;
        let counts = RiskCounts::tally(&profiles);
        let shown = filter_by_level(&profiles, self.level);

        emit(ctx.json, &serde_json::json!({ "counts": counts, "students": shown }), |_| {
            heading("Student Risk");
            println!(
                "  {} high   {} medium   {} low",
                style(counts.high).red().bold(),
                style(counts.medium).yellow().bold(),
                style(counts.low).green().bold()
            );
            println!();
            for profile in &shown {
                let level = RiskLevel::of(profile);
                let label = match level {
                    RiskLevel::High => style(level.to_string()).red(),
                    RiskLevel::Medium => style(level.to_string()).yellow(),
                    RiskLevel::Low => style(level.to_string()).green(),
                };
                println!(
                    "  {:<10} {:<28} {:>5.1}%  {}",
                    profile.student_id,
                    profile.student_name,
                    profile.risk_probability * 100.0,
                    label
                );
            }
        })
    }
}

#[derive(Debug, Args)]
pub struct RiskProfileCommand {
    /// Student id
    pub student: String,
}

impl RiskProfileCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/risk-dashboard").await?;
        let id = EntityId::parse(&self.student);
        let detail = ctx.call("Loading risk profile", |c| async move { c.risk_profile(&id).await }).await?;
        let (attendance, exam) = RiskIndicator::of(&detail);

        emit(ctx.json, &detail, |d| {
            heading(&d.student_name);
            field("Risk", format!("{:.1}% ({})", d.risk_probability * 100.0, RiskLevel::from_probability(d.risk_probability)));
            field("Attendance", format!("{:.1}% ({})", d.attendance_percentage, attendance));
            field("Last exam", format!("{:.1} ({})", d.last_exam_score, exam));
        })
    }
}

#[derive(Debug, Args)]
pub struct MarksCommand {
    #[command(subcommand)]
    pub command: MarksSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum MarksSubcommand {
    /// Upload marks for one class and subject
    Upload {
        /// Class id
        #[arg(long)]
        class: String,
        /// Subject id
        #[arg(long)]
        subject: String,
        /// FINAL_EXAM, MID_TERM or UNIT_TEST
        #[arg(long, default_value = "FINAL_EXAM")]
        exam: ExamType,
        /// File with one `studentId,mark` line per student
        #[arg(long)]
        file: PathBuf,
    },
}

impl MarksCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.command {
            MarksSubcommand::Upload { class, subject, exam, file } => {
                ctx.enter("/upload-marks").await?;
                let lines = parse_mark_lines(&std::fs::read_to_string(file)?)?;

                let class_id = EntityId::parse(class);
                let roster = ctx
                    .call("Loading class", |c| async move { c.teacher_class_students(&class_id).await })
                    .await?;
                let enrolled: BTreeSet<&EntityId> = roster.iter().map(|s| &s.user_id).collect();

                let mut sheet = MarkSheet::new(EntityId::parse(subject), *exam);
                for (student, raw) in lines {
                    let student = EntityId::parse(&student);
                    if !enrolled.contains(&student) {
                        bail!("Student {} is not in class {}", student, class);
                    }
                    if let Err(e) = sheet.enter(student.clone(), raw) {
                        notice(&format!("{}: {}", student, e));
                    }
                }

                let upload = sheet.to_upload()?;
                if let Some(stats) = sheet.statistics() {
                    field("Students", stats.total_entered);
                    field("Average", stats.average);
                    field("Highest", stats.highest);
                    field("Lowest", stats.lowest);
                    field("Passed", stats.pass_count);
                }
                let message = ctx.call("Uploading marks", |c| async move { c.upload_marks(&upload).await }).await?;
                reply(&message, "Marks uploaded successfully!");
                Ok(())
            }
        }
    }
}

/// `studentId,mark` pairs; blank lines and `#` comments are skipped
fn parse_mark_lines(text: &str) -> anyhow::Result<Vec<(String, String)>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| match line.split_once(',') {
            Some((id, mark)) if !id.trim().is_empty() => Ok((id.trim().to_string(), mark.trim().to_string())),
            _ => bail!("line {}: expected `studentId,mark`", n),
        })
        .collect()
}

#[derive(Debug, Args)]
pub struct TakeAttendanceCommand {
    /// Timetable slot id
    #[arg(long)]
    pub slot: String,
    /// Class id
    #[arg(long)]
    pub class: String,
    /// Students to mark absent
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub absent: Vec<String>,
    /// Students to mark late
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub late: Vec<String>,
}

impl TakeAttendanceCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter(&format!("/take-attendance/{}/{}", self.slot, self.class)).await?;
        let class_id = EntityId::parse(&self.class);
        let students = ctx
            .call("Loading class", |c| async move { c.teacher_class_students(&class_id).await })
            .await?;
        if students.is_empty() {
            bail!("No students in class {}", self.class);
        }

        let mut roster = AttendanceRoster::new(EntityId::parse(&self.slot), &students);
        let marks = self
            .absent
            .iter()
            .map(|id| (id, AttendanceStatus::Absent))
            .chain(self.late.iter().map(|id| (id, AttendanceStatus::Late)));
        for (id, status) in marks {
            if !roster.mark(&EntityId::parse(id), status) {
                bail!("Student {} is not in class {}", id, self.class);
            }
        }

        field("Present", roster.present_count());
        field("Absent", self.absent.len());
        field("Late", self.late.len());
        let submission = roster.into_submission();
        let message = ctx
            .call("Submitting attendance", |c| async move { c.submit_attendance(&submission).await })
            .await?;
        reply(&message, "Attendance submitted");
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct CourseworkCommand {
    /// Class id
    pub class: String,
    /// Subject id
    pub subject: String,
    #[command(subcommand)]
    pub command: CourseworkSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum CourseworkSubcommand {
    /// Publish a lecture module
    AddModule(MaterialArgs),
    /// Publish an assignment
    AddAssignment(MaterialArgs),
    /// Delete a module
    DeleteModule {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct MaterialArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Attachment
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl MaterialArgs {
    pub fn upload(&self) -> anyhow::Result<MaterialUpload> {
        let title = self.title.trim();
        if title.is_empty() {
            bail!("Title is required");
        }
        let file = match &self.file {
            Some(path) => Some(attachment(path)?),
            None => None,
        };
        Ok(MaterialUpload { title: title.to_string(), description: self.description.clone(), file })
    }
}

fn attachment(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("'{}' is not a file", path.display()))?;
    Ok((name, std::fs::read(path)?))
}

impl CourseworkCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let class = EntityId::parse(&self.class);
        let subject = EntityId::parse(&self.subject);
        ctx.enter(&format!("/course-details/{}/{}", class, subject)).await?;
        if ctx.role().await? != Some(Role::Teacher) {
            bail!("Only teachers publish course material");
        }

        match &self.command {
            CourseworkSubcommand::AddModule(args) => {
                let upload = args.upload()?;
                let module = ctx
                    .call("Uploading module", |c| async move { c.create_module(&class, &subject, upload).await })
                    .await?;
                emit(ctx.json, &module, |m| {
                    success("Module created successfully!");
                    field("Id", &m.module_id);
                    field("Title", &m.title);
                })
            }
            CourseworkSubcommand::AddAssignment(args) => {
                let upload = args.upload()?;
                let assignment = ctx
                    .call("Uploading assignment", |c| async move {
                        c.create_assignment(&class, &subject, upload).await
                    })
                    .await?;
                emit(ctx.json, &assignment, |a| {
                    success("Assignment created successfully!");
                    field("Id", &a.assignment_id);
                    field("Title", &a.title);
                })
            }
            CourseworkSubcommand::DeleteModule { id, yes } => {
                let id = EntityId::parse(id);
                let modules = ctx
                    .call("Loading modules", |c| async move { c.course_modules(&class, &subject).await })
                    .await?;
                let title = modules
                    .iter()
                    .find(|m| m.module_id == id)
                    .map(|m| m.title.clone())
                    .ok_or_else(|| anyhow!("No module {} in this course", id))?;
                let prompt = format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", title);
                if !confirmed(*yes, &prompt)? {
                    return Ok(());
                }
                let message = ctx.call("Deleting module", |c| async move { c.delete_module(&id).await }).await?;
                reply(&message, "Module deleted");
                Ok(())
            }
        }
    }
}
