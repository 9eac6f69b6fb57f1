//! Wire-level calls against the grade-management REST service.
//!
//! Each method issues exactly one HTTP request and either decodes the 2xx
//! body or turns the failure into a [`ConsoleError`] through
//! [`extract_error_message`]. Input validation and role checks live in
//! [`crate::console`]; nothing here refuses a call locally.

mod auth;
mod client;
mod grades;
mod message;
mod models;
mod statistics;
mod students;

pub use client::ApiClient;
pub use message::extract_error_message;
pub use models::{
    Grade, GradeReport, GradeTotal, LoginRequest, LoginResponse, NewGrade, NewStudent,
    RankedStudent, Statistics, Student, StudentUpdate,
};
pub use students::ConnectionStatus;
