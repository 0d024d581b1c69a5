use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{self, Validate, ValidationErrors};

/// A gradable unit of coursework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    #[serde(rename = "naam")]
    pub name: String,

    #[serde(rename = "beschrijving", default)]
    pub description: String,

    /// Percentage score; `None` until graded
    #[serde(rename = "resultaat", default)]
    pub result: Option<f64>,

    #[serde(default)]
    pub feedback: Option<String>,

    #[serde(rename = "githubURL", default)]
    pub github_url: Option<String>,

    #[serde(rename = "publicatieURL", default)]
    pub publication_url: Option<String>,

    #[serde(default, with = "super::date::option")]
    pub deadline: Option<NaiveDate>,

    #[serde(rename = "weging", default)]
    pub weight: f64,
}

/// Where an assignment stands for the student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    /// No result yet
    Upcoming,
    /// Result recorded
    Completed,
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Upcoming => write!(f, "Upcoming"),
            AssignmentStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl Assignment {
    pub fn status(&self) -> AssignmentStatus {
        match self.result {
            Some(_) => AssignmentStatus::Completed,
            None => AssignmentStatus::Upcoming,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == AssignmentStatus::Completed
    }

    /// Result as shown to the student, e.g. "85%" or "—"
    pub fn result_label(&self) -> String {
        match self.result {
            Some(score) => format!("{}%", score),
            None => "—".to_string(),
        }
    }

    pub fn deadline_label(&self) -> String {
        self.deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Submission links sent with `PUT /api/assignments/:id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "githubURL")]
    pub github_url: String,

    #[serde(rename = "publicatieURL")]
    pub publication_url: String,
}

impl Submission {
    /// Start from the links already stored on the assignment
    pub fn prefilled(assignment: &Assignment) -> Self {
        Self {
            github_url: assignment.github_url.clone().unwrap_or_default(),
            publication_url: assignment.publication_url.clone().unwrap_or_default(),
        }
    }

    /// The links as they go on the wire, surrounding whitespace removed
    pub fn trimmed(&self) -> Self {
        Self {
            github_url: self.github_url.trim().to_string(),
            publication_url: self.publication_url.trim().to_string(),
        }
    }
}

impl Validate for Submission {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::url_or_empty(&mut errors, "github_url", &self.github_url);
        validation::url_or_empty(&mut errors, "publication_url", &self.publication_url);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(result: serde_json::Value) -> Assignment {
        serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "course": "Web Development",
            "naam": "Portfolio",
            "beschrijving": "Build a portfolio site",
            "resultaat": result,
            "feedback": "",
            "githubURL": "https://github.com/student/portfolio",
            "publicatieURL": null,
            "deadline": "2024-06-01T00:00:00.000Z",
            "weging": 0.4
        }))
        .unwrap()
    }

    #[test]
    fn test_graded_assignment_is_completed() {
        let assignment = sample(serde_json::json!(85));
        assert_eq!(assignment.status(), AssignmentStatus::Completed);
        assert_eq!(assignment.result_label(), "85%");
    }

    #[test]
    fn test_ungraded_assignment_is_upcoming() {
        let assignment = sample(serde_json::Value::Null);
        assert_eq!(assignment.status(), AssignmentStatus::Upcoming);
        assert!(!assignment.is_completed());
        assert_eq!(assignment.result_label(), "—");
    }

    #[test]
    fn test_wire_fields() {
        let assignment = sample(serde_json::json!(72.5));
        assert_eq!(assignment.id, "a1");
        assert_eq!(assignment.name, "Portfolio");
        assert_eq!(assignment.deadline_label(), "2024-06-01");
        assert_eq!(assignment.publication_url, None);
        assert_eq!(assignment.result_label(), "72.5%");
        assert_eq!(assignment.weight, 0.4);
    }

    #[test]
    fn test_plain_id_alias_and_defaults() {
        let assignment: Assignment =
            serde_json::from_str(r#"{"id":"1","naam":"Essay","resultaat":null}"#).unwrap();
        assert_eq!(assignment.id, "1");
        assert_eq!(assignment.deadline, None);
        assert_eq!(assignment.status(), AssignmentStatus::Upcoming);
    }

    #[test]
    fn test_missing_name_is_a_decode_error() {
        let result: Result<Assignment, _> = serde_json::from_str(r#"{"_id":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_submission_prefill_and_wire_names() {
        let assignment = sample(serde_json::Value::Null);
        let submission = Submission::prefilled(&assignment);
        assert_eq!(submission.github_url, "https://github.com/student/portfolio");
        assert_eq!(submission.publication_url, "");

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["githubURL"], "https://github.com/student/portfolio");
        assert_eq!(json["publicatieURL"], "");
    }

    #[test]
    fn test_submission_validation() {
        let submission = Submission {
            github_url: "not a url".to_string(),
            publication_url: String::new(),
        };
        let errors = submission.validate().unwrap_err();
        assert!(errors.field("github_url").is_some());
        assert!(errors.field("publication_url").is_none());
    }

    #[test]
    fn test_submission_is_sent_trimmed() {
        let submission = Submission {
            github_url: "  https://github.com/student/portfolio ".to_string(),
            publication_url: "\t".to_string(),
        };
        assert!(submission.validate().is_ok());

        let json = serde_json::to_value(submission.trimmed()).unwrap();
        assert_eq!(json["githubURL"], "https://github.com/student/portfolio");
        assert_eq!(json["publicatieURL"], "");
    }
}
