//! Auth flow and routing
//!
//! Decides where a user belongs: the login screen when no token is stored,
//! the teacher board or the student dashboard once the profile is known,
//! and back to login whenever the backend rejects the session.

use std::fmt;

use crate::client::ApiError;
use crate::models::User;
use crate::session::SessionStore;

/// Screens of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    StudentDashboard,
    TeacherDashboard,
    AssignmentDetail(String),
    Diary,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::StudentDashboard => "/dashboard".to_string(),
            Route::TeacherDashboard => "/teacher".to_string(),
            Route::AssignmentDetail(id) => format!("/assignments/{}", id),
            Route::Diary => "/diary".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Stored token, or the login route when there is none
///
/// A session that cannot be read counts as logged out.
pub fn require_token(session: &dyn SessionStore) -> Result<String, Route> {
    match session.get() {
        Ok(Some(token)) => Ok(token),
        Ok(None) => Err(Route::Login),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read session");
            Err(Route::Login)
        }
    }
}

/// Where a freshly authenticated user lands
pub fn landing_route(user: &User) -> Route {
    if user.is_teacher {
        Route::TeacherDashboard
    } else {
        Route::StudentDashboard
    }
}

/// React to a failed request
///
/// A 401 discards the stored token and sends the user back to login.
/// Every other error is left for the caller to display.
pub fn handle_error(session: &dyn SessionStore, err: &ApiError) -> Option<Route> {
    if !err.is_unauthorized() {
        return None;
    }

    tracing::info!("Session rejected by backend, clearing token");
    if let Err(e) = session.clear() {
        tracing::warn!(error = %e, "Failed to clear session");
    }
    Some(Route::Login)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use reqwest::StatusCode;

    fn user(is_teacher: bool) -> User {
        User {
            id: "u1".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Peeters".to_string(),
            email: "sam@example.com".to_string(),
            is_teacher,
            class_group_id: None,
            phone: None,
        }
    }

    #[test]
    fn test_require_token() {
        let session = MemorySession::new();
        assert_eq!(require_token(&session), Err(Route::Login));

        session.set("abc").unwrap();
        assert_eq!(require_token(&session), Ok("abc".to_string()));
    }

    #[test]
    fn test_landing_route() {
        assert_eq!(landing_route(&user(true)), Route::TeacherDashboard);
        assert_eq!(landing_route(&user(false)), Route::StudentDashboard);
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let session = MemorySession::with_token("abc");
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, String::new());

        assert_eq!(handle_error(&session, &err), Some(Route::Login));
        assert_eq!(session.get().unwrap(), None);
    }

    #[test]
    fn test_other_errors_keep_session() {
        let session = MemorySession::with_token("abc");
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());

        assert_eq!(handle_error(&session, &err), None);
        assert_eq!(session.get().unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::AssignmentDetail("42".into()).path(), "/assignments/42");
        assert_eq!(Route::Login.to_string(), "/login");
    }
}
