//! Views
//!
//! Screen-level state built from API responses. Each view owns the data it
//! shows and the edits it allows, independent of how it is rendered.

pub mod dashboard;
pub mod detail;
pub mod diary;
pub mod teacher;

pub use dashboard::{Landing, StudentDashboard};
pub use detail::AssignmentDetail;
pub use diary::Diary;
pub use teacher::{BoardError, CourseBoard};
