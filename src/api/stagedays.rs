//! `/api/stagedays` — internship diary entries

use serde::de::IgnoredAny;

use super::resource_path;
use crate::client::{ApiClient, ApiResult};
use crate::models::{sort_newest_first, DiaryDraft, DiaryEntry};
use crate::validation::{Validate, ValidationErrors};

const BASE: &str = "/api/stagedays";

/// All entries, newest first
pub async fn list(client: &ApiClient) -> ApiResult<Vec<DiaryEntry>> {
    let mut entries: Vec<DiaryEntry> = client.get(BASE).await?;
    sort_newest_first(&mut entries);
    Ok(entries)
}

/// Log a new day
pub async fn create(client: &ApiClient, draft: &DiaryDraft) -> ApiResult<DiaryEntry> {
    draft.validate()?;
    let payload = draft.to_payload().ok_or_else(missing_date)?;

    let entry: DiaryEntry = client.post(BASE, &payload).await?;
    tracing::info!(entry = %entry.id, date = %entry.date, "Diary entry created");
    Ok(entry)
}

/// Replace an existing day
pub async fn update(client: &ApiClient, id: &str, draft: &DiaryDraft) -> ApiResult<DiaryEntry> {
    draft.validate()?;
    let payload = draft.to_payload().ok_or_else(missing_date)?;

    let entry: DiaryEntry = client.put(&resource_path(BASE, id, None), &payload).await?;
    tracing::info!(entry = %id, "Diary entry updated");
    Ok(entry)
}

/// Remove a day; the response body is ignored
pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    let _: IgnoredAny = client.delete(&resource_path(BASE, id, None)).await?;
    tracing::info!(entry = %id, "Diary entry deleted");
    Ok(())
}

fn missing_date() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("date", "Pick a date");
    errors
}
