//! Campus ERP CLI - Command-line interface for the ERP portal
//!
//! Usage:
//!   erp                          - Start interactive mode
//!   erp login [--email <email>]  - Sign in
//!   erp nav                      - Navigation for your role
//!   erp open <path>              - Route decision for a path
//!   erp result --exam MID_TERM   - Your result for one exam
//!   erp risk --level high        - Students at high risk
//!   erp timetables schedule 2 --day MON --start 09:00 --subject 1 --teacher t-1

use clap::{Parser, Subcommand};
use cli::commands::{
    AdmissionsCommand, AnalyticsCommand, ApplyCommand, AttendanceCommand, CatalogCommand, ClassesCommand,
    ClassroomsCommand, CoursesCommand, CourseworkCommand, DesignCommand, FaceLoginCommand, HostelCommand,
    LoginCommand, LogoutCommand, MarksCommand, MentorsCommand, NavCommand, OpenCommand, PasswordCommand,
    PayFeeCommand, PaymentsCommand, ProgressionCommand, ReceiptCommand, ResultCommand, RiskCommand,
    RiskProfileCommand, RoutesCommand, StaffCommand, StudentsCommand, SubjectsCommand, TakeAttendanceCommand,
    TeachersCommand, TimetableCommand, TimetablesCommand, TrackCommand, UsersCommand, WhoamiCommand,
};
use cli::context::{load_config, Interrupts};
use cli::interactive::InteractiveCli;
use cli::Context;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "erp")]
#[command(about = "Campus ERP - command-line client for the college ERP portal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding config and ERP_API_BASE_URL
    #[arg(long, global = true)]
    api: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login(LoginCommand),
    /// Sign in with a face image
    FaceLogin(FaceLoginCommand),
    /// Sign out
    Logout(LogoutCommand),
    /// Show your profile
    Whoami(WhoamiCommand),
    /// Change your password
    Password(PasswordCommand),
    /// Navigation entries for your role
    Nav(NavCommand),
    /// List every known route
    Routes(RoutesCommand),
    /// Show what opening a path does
    Open(OpenCommand),
    /// Weekly timetable
    Timetable(TimetableCommand),
    /// Your attendance
    Attendance(AttendanceCommand),
    /// Your exam result
    Result(ResultCommand),
    /// Courses, or one course's modules and assignments
    Courses(CoursesCommand),
    /// Payment history
    Payments(PaymentsCommand),
    /// Download a payment receipt
    Receipt(ReceiptCommand),
    /// Pay the tuition fee
    PayFee(PayFeeCommand),
    /// Student risk dashboard
    Risk(RiskCommand),
    /// One student's risk details
    RiskProfile(RiskProfileCommand),
    /// Marks entry
    Marks(MarksCommand),
    /// Record attendance for a class session
    TakeAttendance(TakeAttendanceCommand),
    /// Publish or delete course modules and assignments
    Coursework(CourseworkCommand),
    /// Admissions queue
    Admissions(AdmissionsCommand),
    /// Admin dashboard figures
    Analytics(AnalyticsCommand),
    /// Register accounts
    Users(UsersCommand),
    /// Staff accounts
    Staff(StaffCommand),
    /// Manage classes
    Classes(ClassesCommand),
    /// Manage subjects
    Subjects(SubjectsCommand),
    /// Manage classrooms
    Classrooms(ClassroomsCommand),
    /// Class timetables and scheduling
    Timetables(TimetablesCommand),
    /// Promotions and student status
    Progression(ProgressionCommand),
    /// Class curricula
    Design(DesignCommand),
    /// Assign a mentor to students of a class
    Mentors(MentorsCommand),
    /// Teacher directory
    Teachers(TeachersCommand),
    /// Student directory
    Students(StudentsCommand),
    /// Hostel rooms and registrations
    Hostel(HostelCommand),
    /// Submit an admission application
    Apply(ApplyCommand),
    /// Track an admission application
    Track(TrackCommand),
    /// Programmes open for admission
    Catalog(CatalogCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.api.as_deref())?;
    // One Ctrl-C handler for the whole process; it cancels the request in
    // flight or exits when nothing is running
    let mut ctx = Context::from_config(&config, cli.json)?.with_interrupts(Interrupts::install());

    match cli.command {
        Some(Commands::Login(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::FaceLogin(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Logout(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Whoami(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Password(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Nav(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Routes(cmd)) => cmd.run(&ctx),
        Some(Commands::Open(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Timetable(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Attendance(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Result(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Courses(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Payments(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Receipt(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::PayFee(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Risk(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::RiskProfile(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Marks(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::TakeAttendance(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Coursework(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Admissions(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Analytics(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Users(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Staff(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Classes(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Subjects(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Classrooms(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Timetables(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Progression(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Design(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Mentors(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Teachers(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Students(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Hostel(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Apply(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Track(cmd)) => cmd.run(&mut ctx).await,
        Some(Commands::Catalog(cmd)) => cmd.run(&mut ctx).await,
        None => {
            // No subcommand - start interactive mode
            let mut interactive = InteractiveCli::new(ctx);
            interactive.run().await
        }
    }
}
