//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    // === Flashcard Set Repository ===

    /// Insert a set or replace the stored one with the same id
    pub async fn upsert_set(&self, set: &FlashcardSet) -> Result<FlashcardSet> {
        let row = sqlx::query_as::<_, DbFlashcardSet>(
            r#"
            INSERT INTO flashcard_sets (id, title, description, owner_id, owner_name, icon_color, terms)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                owner_id = EXCLUDED.owner_id,
                owner_name = EXCLUDED.owner_name,
                icon_color = EXCLUDED.icon_color,
                terms = EXCLUDED.terms,
                updated_at = NOW()
            RETURNING id, title, description, owner_id, owner_name, icon_color, terms,
                      created_at, updated_at
            "#,
        )
        .bind(&set.id)
        .bind(&set.title)
        .bind(&set.description)
        .bind(&set.owner_id)
        .bind(&set.owner_name)
        .bind(&set.icon_color)
        .bind(Json(&set.terms))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.to_core_set())
    }

    /// Get set by ID
    pub async fn get_set(&self, id: &str) -> Result<Option<FlashcardSet>> {
        let row = sqlx::query_as::<_, DbFlashcardSet>(
            r#"
            SELECT id, title, description, owner_id, owner_name, icon_color, terms,
                   created_at, updated_at
            FROM flashcard_sets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.to_core_set()))
    }

    /// List sets, optionally only those of one owner
    pub async fn list_sets(&self, owner_id: Option<&str>) -> Result<Vec<FlashcardSet>> {
        let rows = match owner_id {
            Some(owner) => {
                sqlx::query_as::<_, DbFlashcardSet>(
                    r#"
                    SELECT id, title, description, owner_id, owner_name, icon_color, terms,
                           created_at, updated_at
                    FROM flashcard_sets
                    WHERE owner_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbFlashcardSet>(
                    r#"
                    SELECT id, title, description, owner_id, owner_name, icon_color, terms,
                           created_at, updated_at
                    FROM flashcard_sets
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.iter().map(DbFlashcardSet::to_core_set).collect())
    }

    /// Delete a set. Returns false if no row matched.
    pub async fn delete_set(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM flashcard_sets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
