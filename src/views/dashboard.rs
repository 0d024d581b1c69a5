//! Student dashboard and post-login landing

use crate::api::{assignments, users};
use crate::auth::{self, Route};
use crate::client::{ApiClient, ApiResult};
use crate::models::{Assignment, User};

/// Assignments split by status, each list in backend order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDashboard {
    pub upcoming: Vec<Assignment>,
    pub completed: Vec<Assignment>,
}

impl StudentDashboard {
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        let (completed, upcoming): (Vec<_>, Vec<_>) =
            assignments.into_iter().partition(Assignment::is_completed);
        Self {
            upcoming,
            completed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.completed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.completed.len()
    }
}

/// What the user sees right after authenticating
#[derive(Debug, Clone, PartialEq)]
pub enum Landing {
    Teacher(User),
    Student {
        user: User,
        dashboard: StudentDashboard,
    },
}

impl Landing {
    pub fn user(&self) -> &User {
        match self {
            Landing::Teacher(user) => user,
            Landing::Student { user, .. } => user,
        }
    }

    pub fn route(&self) -> Route {
        auth::landing_route(self.user())
    }
}

/// Fetch the profile, then the assignments when the user is a student
pub async fn load(client: &ApiClient) -> ApiResult<Landing> {
    let user = users::me(client).await?;
    if user.is_teacher {
        tracing::debug!(user = %user.id, "Teacher landing");
        return Ok(Landing::Teacher(user));
    }

    let dashboard = StudentDashboard::from_assignments(assignments::list(client).await?);
    tracing::debug!(
        user = %user.id,
        upcoming = dashboard.upcoming.len(),
        completed = dashboard.completed.len(),
        "Student landing"
    );
    Ok(Landing::Student { user, dashboard })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: &str, result: Option<f64>) -> Assignment {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "naam": format!("Assignment {}", id),
            "resultaat": result,
        }))
        .unwrap()
    }

    #[test]
    fn test_split_preserves_order() {
        let dashboard = StudentDashboard::from_assignments(vec![
            assignment("1", None),
            assignment("2", Some(85.0)),
            assignment("3", None),
            assignment("4", Some(0.0)),
        ]);

        let ids = |list: &[Assignment]| list.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&dashboard.upcoming), vec!["1", "3"]);
        assert_eq!(ids(&dashboard.completed), vec!["2", "4"]);
        assert_eq!(dashboard.len(), 4);
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = StudentDashboard::from_assignments(Vec::new());
        assert!(dashboard.is_empty());
    }
}
