use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{self, Validate, ValidationErrors};

/// One logged internship day ("stage day")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(rename = "datum", with = "super::date")]
    pub date: NaiveDate,

    #[serde(rename = "beschrijving", default)]
    pub description: String,

    #[serde(
        rename = "afbeelding",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Order entries newest first; entries on the same day keep their order
///
/// Dates carry no time of day, so same-day entries stay in the order the
/// backend returned them.
pub fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Input for creating or editing a diary entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaryDraft {
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Image URL, or empty for none
    pub image: String,
}

impl DiaryDraft {
    /// Start an edit from an existing entry
    pub fn from_entry(entry: &DiaryEntry) -> Self {
        Self {
            date: Some(entry.date),
            description: entry.description.clone(),
            image: entry.image.clone().unwrap_or_default(),
        }
    }

    /// Request body; `None` when the draft has no date
    pub fn to_payload(&self) -> Option<DiaryPayload> {
        Some(DiaryPayload {
            date: self.date?,
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
        })
    }
}

impl Validate for DiaryDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.date.is_none() {
            errors.add("date", "Pick a date");
        }
        if self.description.trim().chars().count() < 10 {
            errors.add(
                "description",
                "Describe what you did today in at least 10 characters",
            );
        }
        validation::url_or_empty(&mut errors, "image", &self.image);
        errors.into_result()
    }
}

/// Body of `POST /api/stagedays` and `PUT /api/stagedays/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryPayload {
    #[serde(rename = "datum", with = "super::date")]
    pub date: NaiveDate,
    #[serde(rename = "beschrijving")]
    pub description: String,
    #[serde(rename = "afbeelding")]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_entry_wire_fields() {
        let entry: DiaryEntry = serde_json::from_str(
            r#"{"_id":"d1","datum":"2024-01-02T00:00:00.000Z","beschrijving":"Fixed the login bug","afbeelding":""}"#,
        )
        .unwrap();
        assert_eq!(entry.date, day(2024, 1, 2));
        assert_eq!(entry.image, None);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries: Vec<DiaryEntry> = serde_json::from_str(
            r#"[
                {"_id":"a","datum":"2024-01-01","beschrijving":"first"},
                {"_id":"b","datum":"2024-01-03","beschrijving":"third"},
                {"_id":"c","datum":"2024-01-02","beschrijving":"second"}
            ]"#,
        )
        .unwrap();
        sort_newest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_same_day_keeps_backend_order() {
        let mut entries: Vec<DiaryEntry> = serde_json::from_str(
            r#"[
                {"_id":"morning","datum":"2024-01-02T08:00:00.000Z","beschrijving":"standup"},
                {"_id":"older","datum":"2024-01-01","beschrijving":"kickoff"},
                {"_id":"evening","datum":"2024-01-02T17:00:00.000Z","beschrijving":"demo"}
            ]"#,
        )
        .unwrap();
        sort_newest_first(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["morning", "evening", "older"]);
    }

    #[test]
    fn test_draft_validation() {
        let draft = DiaryDraft {
            date: None,
            description: "too short".to_string(),
            image: "not-a-url".to_string(),
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 3);

        let draft = DiaryDraft {
            date: Some(day(2024, 1, 2)),
            description: "Wrote integration tests".to_string(),
            image: String::new(),
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_payload_wire_names() {
        let draft = DiaryDraft {
            date: Some(day(2024, 1, 2)),
            description: "  Wrote integration tests ".to_string(),
            image: "https://img.example.org/day.png".to_string(),
        };
        let json = serde_json::to_value(draft.to_payload().unwrap()).unwrap();
        assert_eq!(json["datum"], "2024-01-02");
        assert_eq!(json["beschrijving"], "Wrote integration tests");
        assert_eq!(json["afbeelding"], "https://img.example.org/day.png");
    }

    #[test]
    fn test_draft_from_entry_round_trips_fields() {
        let entry = DiaryEntry {
            id: "d1".to_string(),
            date: day(2024, 3, 4),
            description: "Deployed to staging".to_string(),
            image: None,
        };
        let draft = DiaryDraft::from_entry(&entry);
        assert_eq!(draft.date, Some(day(2024, 3, 4)));
        assert_eq!(draft.image, "");
    }
}
