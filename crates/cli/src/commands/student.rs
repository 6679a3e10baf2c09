//! Student screens: timetable, attendance, results, courses and fees

use crate::context::Context;
use crate::output::{emit, field, heading, notice, or_dash, reply, success};
use academics::{format_amount, is_today, tuition_payment, AttendanceSummary, ResultSummary, TimetableGrid};
use anyhow::bail;
use chrono::Timelike;
use clap::Args;
use console::style;
use dialoguer::Confirm;
use shared::{total_paid, EntityId, ExamType, Role};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TimetableCommand {
    /// List slots instead of drawing the weekly grid
    #[arg(long)]
    pub list: bool,
}

impl TimetableCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/time-table").await?;
        let slots = match ctx.role().await? {
            Some(Role::Teacher) => ctx.call("Loading timetable", |c| async move { c.teacher_timetable().await }).await?,
            Some(Role::Student) => ctx.call("Loading timetable", |c| async move { c.student_timetable().await }).await?,
            _ => bail!("Timetables are shown to teachers and students"),
        };
        let grid = TimetableGrid::new(slots);

        emit(ctx.json, &grid.slots(), |_| {
            if grid.slots().is_empty() {
                notice("No classes scheduled.");
            } else if self.list {
                print_list(&grid);
            } else {
                print_grid(&grid);
            }
        })
    }
}

pub(crate) fn print_list(grid: &TimetableGrid) {
    let today = chrono::Local::now().date_naive();
    for slot in grid.slots() {
        let marker = if is_today(slot.day_of_week, today) { "*" } else { " " };
        println!(
            "{} {:<10} {}-{}  {:<24} {:<20} {}",
            marker,
            slot.day_of_week.as_str(),
            slot.start_time.format("%H:%M"),
            slot.end_time.format("%H:%M"),
            slot.subject.name,
            slot.school_class.label(),
            slot.classroom.as_ref().map(|r| r.room_number.as_str()).unwrap_or("-"),
        );
    }
}

pub(crate) fn print_grid(grid: &TimetableGrid) {
    let today = chrono::Local::now().date_naive();
    let mut header = format!("{:<15}", "");
    for day in academics::WEEKDAYS {
        let name = format!("{:<16}", day.short());
        header.push_str(&if is_today(day, today) { style(name).bold().to_string() } else { name });
    }
    println!("{}", header);

    for (period, cells) in grid.rows() {
        let mut line = format!("{:<15}", period.label());
        for cell in cells {
            let text = cell.map(|s| s.subject.name.as_str()).unwrap_or("·");
            line.push_str(&format!("{:<16.15}", text));
        }
        println!("{}", line);
        if period.end.hour() == 13 {
            println!("{:<15}{}", "13:00 - 14:00", style("Lunch").dim());
        }
    }

    let extra = grid.off_grid();
    if !extra.is_empty() {
        notice(&format!("{} slot(s) outside the weekday grid; use --list to see them", extra.len()));
    }
}

#[derive(Debug, Args)]
pub struct AttendanceCommand {}

impl AttendanceCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/my-attendance").await?;
        let records = ctx.call("Loading attendance", |c| async move { c.my_attendance().await }).await?;
        let summary = AttendanceSummary::from_records(&records);

        emit(ctx.json, &serde_json::json!({ "summary": summary, "records": records }), |_| {
            heading("My Attendance");
            field("Total classes", summary.total);
            field("Present", summary.present);
            field("Absent", summary.absent);
            field("Percentage", format!("{}%", summary.percentage));
            println!();
            for record in &records {
                println!("  {}  {:<28} {}", record.date, record.subject_name, record.status);
            }
        })
    }
}

#[derive(Debug, Args)]
pub struct ResultCommand {
    /// FINAL_EXAM, MID_TERM or UNIT_TEST
    #[arg(long, default_value = "FINAL_EXAM")]
    pub exam: ExamType,
}

impl ResultCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/my-result").await?;
        let exam = self.exam;
        let sheet = ctx.call("Loading result", |c| async move { c.my_result(exam).await }).await?;
        let summary = ResultSummary::from_sheet(&sheet);

        emit(ctx.json, &summary, |summary| {
            heading(&format!("Result - {}", exam.label()));
            if let Some(name) = &sheet.student_name {
                field("Student", name);
            }
            if summary.subjects.is_empty() {
                notice("No results published yet.");
                return;
            }
            for subject in &summary.subjects {
                let grade = if subject.passed {
                    style(subject.grade.as_str()).green()
                } else {
                    style(subject.grade.as_str()).red()
                };
                println!("  {:<28} {:>6.1}%  {}", subject.subject_name, subject.percentage, grade);
            }
            println!();
            field("Total", format!("{} / {}", summary.total_obtained, summary.total_marks));
            field("Percentage", format!("{:.2}%", summary.percentage));
            field("Grade", summary.grade);
            field("Status", summary.status);
        })
    }
}

#[derive(Debug, Args)]
pub struct CoursesCommand {
    /// Show modules and assignments for one class
    #[arg(long, requires = "subject")]
    pub class: Option<String>,
    /// Subject within --class
    #[arg(long, requires = "class")]
    pub subject: Option<String>,
}

impl CoursesCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if let (Some(class), Some(subject)) = (&self.class, &self.subject) {
            return self.details(ctx, EntityId::parse(class), EntityId::parse(subject)).await;
        }

        ctx.enter("/my-courses").await?;
        match ctx.role().await? {
            Some(Role::Student) => {
                let courses = ctx.call("Loading courses", |c| async move { c.my_courses().await }).await?;
                emit(ctx.json, &courses, |courses| {
                    for course in courses {
                        heading(&format!("{} - {}", course.grade_level, course.section));
                        for subject in &course.subjects {
                            println!("  {:<28} {}  (class {} / subject {})", subject.name, or_dash(subject.code.as_deref()), course.class_id, subject.subject_id);
                        }
                    }
                })
            }
            Some(Role::Teacher) => {
                let profile = ctx.profile().await?;
                let classes = profile.taught_classes.unwrap_or_default();
                let subjects = profile.taught_subjects.unwrap_or_default();
                emit(ctx.json, &serde_json::json!({ "classes": classes, "subjects": subjects }), |_| {
                    heading("Classes");
                    for class in &classes {
                        println!("  {:<8} {}", class.class_id, class.label());
                    }
                    heading("Subjects");
                    for subject in &subjects {
                        println!("  {:<8} {} {}", subject.subject_id, subject.name, or_dash(subject.code.as_deref()));
                    }
                })
            }
            _ => bail!("Courses are shown to teachers and students"),
        }
    }

    async fn details(&self, ctx: &mut Context, class: EntityId, subject: EntityId) -> anyhow::Result<()> {
        ctx.enter(&format!("/course-details/{}/{}", class, subject)).await?;
        let (c, s) = (class.clone(), subject.clone());
        let modules = ctx.call("Loading modules", |client| async move { client.course_modules(&c, &s).await }).await?;
        let assignments = ctx
            .call("Loading assignments", |client| async move { client.course_assignments(&class, &subject).await })
            .await?;

        emit(ctx.json, &serde_json::json!({ "modules": modules, "assignments": assignments }), |_| {
            heading("Modules");
            for module in &modules {
                println!("  {:<6} {}", module.module_id, module.title);
                if let Some(url) = &module.file_url {
                    println!("         {}", style(url).dim());
                }
            }
            heading("Assignments");
            for assignment in &assignments {
                println!("  {:<6} {:<32} due {}", assignment.assignment_id, assignment.title, or_dash(assignment.due_date.as_deref()));
            }
        })
    }
}

#[derive(Debug, Args)]
pub struct PaymentsCommand {}

impl PaymentsCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/payment-history").await?;
        let payments = ctx.call("Loading payments", |c| async move { c.payments().await }).await?;

        emit(ctx.json, &payments, |payments| {
            heading("Payment History");
            if payments.is_empty() {
                notice("No payments recorded.");
                return;
            }
            for p in payments {
                println!("  {:<8} {:<12} {:<28} {:>14}", p.id, p.payment_date, p.purpose, format_amount(p.amount));
            }
            field("Total paid", format_amount(total_paid(payments)));
        })
    }
}

#[derive(Debug, Args)]
pub struct ReceiptCommand {
    /// Transaction id
    pub id: String,
    /// Where to save the PDF (default receipt-<id>.pdf)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl ReceiptCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/payment-history").await?;
        let id = EntityId::parse(&self.id);
        let bytes = ctx.call("Downloading receipt", |c| async move { c.receipt(&id).await }).await?;

        let out = self.out.clone().unwrap_or_else(|| PathBuf::from(format!("receipt-{}.pdf", self.id)));
        std::fs::write(&out, &bytes)?;
        success(&format!("Saved {} ({} bytes)", out.display(), bytes.len()));
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct PayFeeCommand {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl PayFeeCommand {
    pub async fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.enter("/fee-payment").await?;
        let profile = ctx.profile().await?;
        let payment = match tuition_payment(&profile) {
            Ok(payment) => payment,
            Err(e) => {
                success(&e.to_string());
                return Ok(());
            }
        };

        let prompt = format!("Pay tuition fee of {}?", format_amount(payment.amount));
        if !self.yes && !Confirm::new().with_prompt(prompt).default(false).interact()? {
            return Ok(());
        }
        let message = ctx.call("Processing payment", |c| async move { c.pay_tuition(&payment).await }).await?;
        reply(&message, "Payment successful");
        Ok(())
    }
}
