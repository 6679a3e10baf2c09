//! Endpoint groups, one module per server area

pub mod academic;
pub mod admin;
pub mod auth;
pub mod courses;
pub mod hostel;
pub mod master;
pub mod public;
pub mod staff;
pub mod student;
pub mod teacher;
pub mod users;
