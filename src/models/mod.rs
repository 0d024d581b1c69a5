//! Backend schemas
//!
//! Explicit request and response shapes for every endpoint. Wire names
//! follow the backend (Dutch field names, `_id` keys); Rust names are
//! English. Anything that does not match its schema fails to decode with
//! [`crate::client::ApiError::Decode`] instead of being passed through.

pub mod date;

mod assignment;
mod course;
mod diary;
mod user;

pub use assignment::{Assignment, AssignmentStatus, Submission};
pub use course::{ClassGroup, Course, Enrollment, NewCohort, NewCourse, NewSubject, Subject};
pub use diary::{sort_newest_first, DiaryDraft, DiaryEntry, DiaryPayload};
pub use user::{students, LoginForm, LoginRequest, RegisterForm, RegisterRequest, TokenResponse, User};
