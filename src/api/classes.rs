//! `/api/classes` — cohorts

use crate::client::{ApiClient, ApiResult};
use crate::models::{ClassGroup, NewCohort};
use crate::validation::Validate;

const BASE: &str = "/api/classes";

/// Cohorts, optionally limited to one course
pub async fn list(client: &ApiClient, course_id: Option<&str>) -> ApiResult<Vec<ClassGroup>> {
    let path = match course_id {
        Some(id) => format!("{}?courseId={}", BASE, urlencoding::encode(id)),
        None => BASE.to_string(),
    };
    client.get(&path).await
}

pub async fn create(client: &ApiClient, cohort: &NewCohort) -> ApiResult<ClassGroup> {
    cohort.validate()?;

    let created: ClassGroup = client.post(BASE, &cohort.trimmed()).await?;
    tracing::info!(cohort = %created.id, course = %cohort.course_id, "Cohort created");
    Ok(created)
}
