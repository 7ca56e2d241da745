//! Source of flashcard sets for study rounds.

use crate::error::GameError;
use crate::types::FlashcardSet;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors reported by a flashcard set source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("flashcard set not found: {0}")]
    NotFound(String),

    #[error("flashcard store unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for GameError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => GameError::NotFound(id),
            RepositoryError::Unavailable(msg) => GameError::Fetch(msg),
        }
    }
}

/// Read access to stored flashcard sets.
pub trait FlashcardRepository {
    /// Fetch one set by id.
    fn fetch_flashcard_set(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<FlashcardSet, RepositoryError>> + Send;
}

/// In-process set store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    sets: Arc<RwLock<HashMap<String, FlashcardSet>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a set.
    pub fn save(&self, set: FlashcardSet) -> Result<(), RepositoryError> {
        let mut sets = self.write()?;
        sets.insert(set.id.clone(), set);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<FlashcardSet, RepositoryError> {
        let sets = self.read()?;
        sets.get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    /// All sets, optionally restricted to one owner, ordered by id.
    pub fn list(&self, owner_id: Option<&str>) -> Result<Vec<FlashcardSet>, RepositoryError> {
        let sets = self.read()?;
        let mut result: Vec<FlashcardSet> = sets
            .values()
            .filter(|s| owner_id.map_or(true, |o| s.owner_id.as_deref() == Some(o)))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    /// Remove a set. Returns false if it did not exist.
    pub fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut sets = self.write()?;
        Ok(sets.remove(id).is_some())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, FlashcardSet>>, RepositoryError>
    {
        self.sets
            .read()
            .map_err(|_| RepositoryError::Unavailable("set store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, FlashcardSet>>, RepositoryError>
    {
        self.sets
            .write()
            .map_err(|_| RepositoryError::Unavailable("set store lock poisoned".to_string()))
    }
}

impl FlashcardRepository for MemoryRepository {
    async fn fetch_flashcard_set(&self, id: &str) -> Result<FlashcardSet, RepositoryError> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlashcardRecord;

    fn set(id: &str, owner: Option<&str>) -> FlashcardSet {
        let mut set = FlashcardSet::new(id, vec![FlashcardRecord::new("a", "b")]);
        set.owner_id = owner.map(str::to_string);
        set
    }

    #[tokio::test]
    async fn fetch_saved_set() {
        let repo = MemoryRepository::new();
        repo.save(set("s1", None)).unwrap();

        let fetched = repo.fetch_flashcard_set("s1").await.unwrap();
        assert_eq!(fetched.id, "s1");
    }

    #[tokio::test]
    async fn fetch_missing_set() {
        let repo = MemoryRepository::new();
        let err = repo.fetch_flashcard_set("nope").await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound("nope".to_string()));
        assert_eq!(GameError::from(err), GameError::NotFound("nope".to_string()));
    }

    #[test]
    fn list_filters_by_owner() {
        let repo = MemoryRepository::new();
        repo.save(set("b", Some("u1"))).unwrap();
        repo.save(set("a", Some("u1"))).unwrap();
        repo.save(set("c", Some("u2"))).unwrap();

        let ids: Vec<_> = repo.list(Some("u1")).unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(repo.list(None).unwrap().len(), 3);
    }

    #[test]
    fn delete_reports_existence() {
        let repo = MemoryRepository::new();
        repo.save(set("s1", None)).unwrap();
        assert!(repo.delete("s1").unwrap());
        assert!(!repo.delete("s1").unwrap());
    }

    #[test]
    fn unavailable_maps_to_fetch_error() {
        let err = RepositoryError::Unavailable("connection reset".to_string());
        assert_eq!(GameError::from(err), GameError::Fetch("connection reset".to_string()));
    }
}
