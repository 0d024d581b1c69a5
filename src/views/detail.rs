//! Single assignment view

use crate::api::assignments;
use crate::client::{ApiClient, ApiResult};
use crate::models::{Assignment, Submission};
use crate::validation::ValidationErrors;

/// A graded assignment is read-only; an open one carries an editable submission
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentDetail {
    Graded(Assignment),
    Open {
        assignment: Assignment,
        submission: Submission,
    },
}

impl AssignmentDetail {
    pub fn from_assignment(assignment: Assignment) -> Self {
        if assignment.is_completed() {
            AssignmentDetail::Graded(assignment)
        } else {
            let submission = Submission::prefilled(&assignment);
            AssignmentDetail::Open {
                assignment,
                submission,
            }
        }
    }

    pub async fn load(client: &ApiClient, id: &str) -> ApiResult<Self> {
        Ok(Self::from_assignment(assignments::get(client, id).await?))
    }

    pub fn assignment(&self) -> &Assignment {
        match self {
            AssignmentDetail::Graded(assignment) => assignment,
            AssignmentDetail::Open { assignment, .. } => assignment,
        }
    }

    /// Editable links, only while the assignment is open
    pub fn submission_mut(&mut self) -> Option<&mut Submission> {
        match self {
            AssignmentDetail::Graded(_) => None,
            AssignmentDetail::Open { submission, .. } => Some(submission),
        }
    }

    /// Send the current links and refresh from the stored assignment
    pub async fn submit(&mut self, client: &ApiClient) -> ApiResult<()> {
        let (id, submission) = match self {
            AssignmentDetail::Graded(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("result", "This assignment has already been graded");
                return Err(errors.into());
            }
            AssignmentDetail::Open {
                assignment,
                submission,
            } => (assignment.id.clone(), submission.clone()),
        };

        let updated = assignments::submit(client, &id, &submission).await?;
        *self = Self::from_assignment(updated);
        Ok(())
    }
}
