//! Backend Endpoints
//!
//! One module per REST resource. Every function takes the shared
//! [`ApiClient`], validates its input before touching the network, and
//! returns typed models.
//!
//! | Module | Resource |
//! |---|---|
//! | [`users`] | `/api/users` (login, register, profile, listing) |
//! | [`assignments`] | `/api/assignments` |
//! | [`stagedays`] | `/api/stagedays` (internship diary) |
//! | [`courses`] | `/api/courses` (subjects, enrollment) |
//! | [`classes`] | `/api/classes` (cohorts) |

pub mod assignments;
pub mod classes;
pub mod courses;
pub mod stagedays;
pub mod users;

/// Build `/base/<encoded id>[/suffix]`
pub(crate) fn resource_path(base: &str, id: &str, suffix: Option<&str>) -> String {
    let mut path = format!("{}/{}", base, urlencoding::encode(id));
    if let Some(suffix) = suffix {
        path.push('/');
        path.push_str(suffix);
    }
    path
}
