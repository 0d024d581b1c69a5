//! `/api/assignments` — the current student's coursework

use super::resource_path;
use crate::client::{ApiClient, ApiResult};
use crate::models::{Assignment, Submission};
use crate::validation::Validate;

const BASE: &str = "/api/assignments";

/// Assignments of the logged-in student
pub async fn list(client: &ApiClient) -> ApiResult<Vec<Assignment>> {
    client.get(BASE).await
}

/// One assignment by id
pub async fn get(client: &ApiClient, id: &str) -> ApiResult<Assignment> {
    client.get(&resource_path(BASE, id, None)).await
}

/// Store submission links; returns the updated assignment
pub async fn submit(
    client: &ApiClient,
    id: &str,
    submission: &Submission,
) -> ApiResult<Assignment> {
    submission.validate()?;

    let updated: Assignment = client
        .put(&resource_path(BASE, id, None), &submission.trimmed())
        .await?;
    tracing::info!(assignment = %id, "Submission saved");
    Ok(updated)
}
