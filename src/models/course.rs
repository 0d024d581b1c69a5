use serde::{Deserialize, Serialize};

use super::User;
use crate::validation::{self, Validate, ValidationErrors};

/// A subject taught within a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// A course with its subjects and enrolled students
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub students: Vec<User>,
}

impl Course {
    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.students.iter().any(|s| s.id == student_id)
    }
}

/// A cohort ("class group") tied to a course and study program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "naam")]
    pub name: String,
    #[serde(rename = "opleiding", default)]
    pub program: String,
    #[serde(rename = "courseId", default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

/// Body of `POST /api/courses`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCourse {
    pub name: String,
}

impl NewCourse {
    /// Body as sent, name trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

impl Validate for NewCourse {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::min_chars(&mut errors, "name", &self.name, 2);
        errors.into_result()
    }
}

/// Body of `POST /api/courses/:id/subjects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubject {
    pub name: String,
}

impl NewSubject {
    /// Body as sent, name trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

impl Validate for NewSubject {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::min_chars(&mut errors, "name", &self.name, 2);
        errors.into_result()
    }
}

/// Body of `POST /api/classes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCohort {
    #[serde(rename = "naam")]
    pub name: String,
    #[serde(rename = "opleiding")]
    pub program: String,
    #[serde(rename = "courseId")]
    pub course_id: String,
}

impl NewCohort {
    /// Body as sent, name and program trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            program: self.program.trim().to_string(),
            course_id: self.course_id.clone(),
        }
    }
}

impl Validate for NewCohort {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::min_chars(&mut errors, "name", &self.name, 2);
        validation::min_chars(&mut errors, "program", &self.program, 2);
        validation::required(&mut errors, "course_id", &self.course_id);
        errors.into_result()
    }
}

/// Body of `PATCH /api/courses/:id/students`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    #[serde(rename = "studentId")]
    pub student_id: String,
}
