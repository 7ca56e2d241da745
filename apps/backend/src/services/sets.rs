//! Flashcard set storage and validation.

use std::sync::Arc;

use flashcard_core::types::{DEFAULT_DESCRIPTION, DEFAULT_ICON_COLOR, DEFAULT_TITLE};
use flashcard_core::{FlashcardRepository, MemoryRepository, RepositoryError};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{FlashcardRecord, FlashcardSet, SaveSetRequest};

/// Where flashcard sets live.
#[derive(Clone)]
pub enum SetStore {
    Postgres(Arc<Database>),
    Memory(MemoryRepository),
}

impl SetStore {
    pub fn memory() -> Self {
        Self::Memory(MemoryRepository::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn save(&self, set: FlashcardSet) -> Result<FlashcardSet> {
        match self {
            Self::Postgres(db) => db.upsert_set(&set).await,
            Self::Memory(repo) => {
                repo.save(set.clone())?;
                Ok(set)
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<FlashcardSet> {
        let set = match self {
            Self::Postgres(db) => db.get_set(id).await?,
            Self::Memory(repo) => match repo.get(id) {
                Ok(set) => Some(set),
                Err(RepositoryError::NotFound(_)) => None,
                Err(e) => return Err(e.into()),
            },
        };
        set.ok_or_else(|| ApiError::NotFound(format!("Flashcard set {}", id)))
    }

    pub async fn list(&self, owner_id: Option<&str>) -> Result<Vec<FlashcardSet>> {
        match self {
            Self::Postgres(db) => db.list_sets(owner_id).await,
            Self::Memory(repo) => Ok(repo.list(owner_id)?),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let deleted = match self {
            Self::Postgres(db) => db.delete_set(id).await?,
            Self::Memory(repo) => repo.delete(id)?,
        };
        if deleted {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("Flashcard set {}", id)))
        }
    }
}

impl FlashcardRepository for SetStore {
    async fn fetch_flashcard_set(
        &self,
        id: &str,
    ) -> std::result::Result<FlashcardSet, RepositoryError> {
        match self {
            Self::Postgres(db) => match db.get_set(id).await {
                Ok(Some(set)) => Ok(set),
                Ok(None) => Err(RepositoryError::NotFound(id.to_string())),
                Err(e) => Err(RepositoryError::Unavailable(e.to_string())),
            },
            Self::Memory(repo) => repo.fetch_flashcard_set(id).await,
        }
    }
}

/// Validate a save request and fill in defaults.
///
/// Every term and definition is trimmed and must be non-empty, and the set
/// must hold at least one card.
pub fn prepare_set(request: SaveSetRequest) -> Result<FlashcardSet> {
    let terms: Vec<FlashcardRecord> = request
        .terms
        .iter()
        .map(|card| FlashcardRecord::new(card.term.trim(), card.definition.trim()))
        .collect();

    if terms.is_empty() {
        return Err(ApiError::BadRequest("Terms list cannot be empty".to_string()));
    }
    if let Some(pos) = terms
        .iter()
        .position(|c| c.term.is_empty() || c.definition.is_empty())
    {
        return Err(ApiError::BadRequest(format!(
            "Term {} is missing a term or definition",
            pos + 1
        )));
    }

    Ok(FlashcardSet {
        id: non_blank(request.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: non_blank(request.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: non_blank(request.description)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        owner_id: non_blank(request.owner_id),
        owner_name: non_blank(request.owner_name),
        icon_color: non_blank(request.icon_color).unwrap_or_else(|| DEFAULT_ICON_COLOR.to_string()),
        terms,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(terms: &[(&str, &str)]) -> SaveSetRequest {
        SaveSetRequest {
            terms: terms
                .iter()
                .map(|(t, d)| FlashcardRecord::new(*t, *d))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_filled_in() {
        let set = prepare_set(request(&[("France", "Paris")])).unwrap();
        assert_eq!(set.title, "Untitled Set");
        assert_eq!(set.description, "No description provided.");
        assert_eq!(set.icon_color, "#cccccc");
        assert!(Uuid::parse_str(&set.id).is_ok());
    }

    #[test]
    fn test_fields_trimmed() {
        let mut req = request(&[("  France ", " Paris  ")]);
        req.title = Some("  Capitals ".to_string());
        req.id = Some("geo".to_string());
        let set = prepare_set(req).unwrap();
        assert_eq!(set.id, "geo");
        assert_eq!(set.title, "Capitals");
        assert_eq!(set.terms, vec![FlashcardRecord::new("France", "Paris")]);
    }

    #[test]
    fn test_empty_terms_rejected() {
        let err = prepare_set(request(&[])).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Terms list cannot be empty");
    }

    #[test]
    fn test_blank_definition_rejected() {
        let err = prepare_set(request(&[("France", "Paris"), ("Italy", "   ")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad request: Term 2 is missing a term or definition"
        );
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = SetStore::memory();
        let set = prepare_set(request(&[("France", "Paris")])).unwrap();
        let id = set.id.clone();

        store.save(set).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().terms.len(), 1);
        assert_eq!(store.fetch_flashcard_set(&id).await.unwrap().id, id);

        store.delete(&id).await.unwrap();
        assert!(matches!(store.get(&id).await, Err(ApiError::NotFound(_))));
        assert!(matches!(store.delete(&id).await, Err(ApiError::NotFound(_))));
    }
}
