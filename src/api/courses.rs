//! `/api/courses` — courses, their subjects and enrolled students

use serde::de::IgnoredAny;

use super::resource_path;
use crate::client::{ApiClient, ApiResult};
use crate::models::{Course, Enrollment, NewCourse, NewSubject, Subject};
use crate::validation::Validate;

const BASE: &str = "/api/courses";

/// Courses of the logged-in teacher
pub async fn list(client: &ApiClient) -> ApiResult<Vec<Course>> {
    client.get(BASE).await
}

pub async fn create(client: &ApiClient, course: &NewCourse) -> ApiResult<Course> {
    course.validate()?;

    let created: Course = client.post(BASE, &course.trimmed()).await?;
    tracing::info!(course = %created.id, name = %created.name, "Course created");
    Ok(created)
}

pub async fn add_subject(
    client: &ApiClient,
    course_id: &str,
    subject: &NewSubject,
) -> ApiResult<Subject> {
    subject.validate()?;

    let created: Subject = client
        .post(
            &resource_path(BASE, course_id, Some("subjects")),
            &subject.trimmed(),
        )
        .await?;
    tracing::info!(course = %course_id, subject = %created.id, "Subject added");
    Ok(created)
}

/// Enroll a student; the response body is ignored
pub async fn enroll(client: &ApiClient, course_id: &str, student_id: &str) -> ApiResult<()> {
    let body = Enrollment {
        student_id: student_id.to_string(),
    };

    let _: IgnoredAny = client
        .patch(&resource_path(BASE, course_id, Some("students")), &body)
        .await?;
    tracing::info!(course = %course_id, student = %student_id, "Student enrolled");
    Ok(())
}
