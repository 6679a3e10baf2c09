//! Records mirrored from API responses and request bodies

pub mod academic;
pub mod admissions;
pub mod attendance;
pub mod finance;
pub mod hostel;
pub mod id;
pub mod marks;
pub mod profile;
pub mod risk;
pub mod staff;

pub use academic::*;
pub use admissions::*;
pub use attendance::*;
pub use finance::*;
pub use hostel::*;
pub use id::EntityId;
pub use marks::*;
pub use profile::*;
pub use risk::*;
pub use staff::*;
