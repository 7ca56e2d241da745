//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory set store and a manual clock
//! - Helper functions for creating test data
//!
//! # Requirements
//! Tests built with `TestContext::with_database` need a PostgreSQL database
//! (set DATABASE_URL env var) and are ignored by default.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;

use flashcard_core::StudyTimings;
use flashcard_study_backend::app_router;
use flashcard_study_backend::clock::ManualClock;
use flashcard_study_backend::db::Database;
use flashcard_study_backend::models::{FlashcardRecord, FlashcardSet};
use flashcard_study_backend::services::sets::SetStore;
use flashcard_study_backend::AppState;

/// Test context containing the app state, its clock and the router.
pub struct TestContext {
    pub state: AppState,
    pub clock: ManualClock,
    app: Router,
}

impl TestContext {
    /// Create a context backed by an in-memory set store.
    pub fn new() -> Self {
        Self::with_store(SetStore::memory())
    }

    /// Create a context backed by PostgreSQL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn with_database() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::with_store(SetStore::Postgres(Arc::new(db)))
    }

    fn with_store(store: SetStore) -> Self {
        let clock = ManualClock::new();
        let state = AppState::new(store, Arc::new(clock.clone()), StudyTimings::default());
        let app = app_router(state.clone());
        Self { state, clock, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Move the session clock forward.
    pub fn advance(&self, millis: u64) {
        self.clock.advance(Duration::from_millis(millis));
    }

    /// Store a set directly, bypassing the API.
    pub async fn seed_set(&self, id: &str, terms: &[(&str, &str)]) -> FlashcardSet {
        let set = FlashcardSet::new(
            id,
            terms
                .iter()
                .map(|(t, d)| FlashcardRecord::new(*t, *d))
                .collect(),
        );
        self.state
            .store
            .save(set)
            .await
            .expect("Failed to seed flashcard set")
    }

    /// Remove a seeded set, ignoring missing ones.
    pub async fn cleanup_set(&self, id: &str) {
        let _ = self.state.store.delete(id).await;
    }
}
