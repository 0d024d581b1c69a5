//! Internship diary view

use crate::api::stagedays;
use crate::client::{ApiClient, ApiResult};
use crate::models::{sort_newest_first, DiaryDraft, DiaryEntry};

/// Diary entries, always newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diary {
    entries: Vec<DiaryEntry>,
}

impl Diary {
    pub fn new(mut entries: Vec<DiaryEntry>) -> Self {
        sort_newest_first(&mut entries);
        Self { entries }
    }

    pub async fn load(client: &ApiClient) -> ApiResult<Self> {
        Ok(Self::new(stagedays::list(client).await?))
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a newly created entry at its place in the order
    pub fn insert(&mut self, entry: DiaryEntry) {
        // Ahead of any entry on the same day, as the newest write
        let at = self.entries.partition_point(|e| e.date > entry.date);
        self.entries.insert(at, entry);
    }

    /// Swap in an edited entry; returns false if the id is unknown
    pub fn replace(&mut self, entry: DiaryEntry) -> bool {
        match self.entries.iter().position(|e| e.id == entry.id) {
            Some(index) => {
                self.entries.remove(index);
                self.insert(entry);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<DiaryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Create on the backend, then show the stored entry
    pub async fn add(&mut self, client: &ApiClient, draft: &DiaryDraft) -> ApiResult<DiaryEntry> {
        let entry = stagedays::create(client, draft).await?;
        self.insert(entry.clone());
        Ok(entry)
    }

    pub async fn edit(
        &mut self,
        client: &ApiClient,
        id: &str,
        draft: &DiaryDraft,
    ) -> ApiResult<DiaryEntry> {
        let entry = stagedays::update(client, id, draft).await?;
        if !self.replace(entry.clone()) {
            self.insert(entry.clone());
        }
        Ok(entry)
    }

    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> ApiResult<()> {
        stagedays::delete(client, id).await?;
        self.remove(id);
        Ok(())
    }
}
