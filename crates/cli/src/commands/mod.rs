//! CLI Commands

pub mod academic;
pub mod hostel;
pub mod master;
pub mod navigate;
pub mod public;
pub mod session;
pub mod staff;
pub mod student;
pub mod teacher;
pub mod users;

pub use academic::{DesignCommand, MentorsCommand, ProgressionCommand, StudentsCommand, TeachersCommand, TimetablesCommand};
pub use hostel::HostelCommand;
pub use master::{ClassesCommand, ClassroomsCommand, SubjectsCommand};
pub use navigate::{NavCommand, OpenCommand, RoutesCommand};
pub use public::{ApplyCommand, CatalogCommand, TrackCommand};
pub use session::{FaceLoginCommand, LoginCommand, LogoutCommand, PasswordCommand, WhoamiCommand};
pub use staff::{AdmissionsCommand, AnalyticsCommand};
pub use student::{
    AttendanceCommand, CoursesCommand, PayFeeCommand, PaymentsCommand, ReceiptCommand, ResultCommand, TimetableCommand,
};
pub use teacher::{CourseworkCommand, MarksCommand, RiskCommand, RiskProfileCommand, TakeAttendanceCommand};
pub use users::{StaffCommand, UsersCommand};
