//! In-memory study sessions.
//!
//! Each session owns one engine from flashcard-core. Wall time is applied
//! lazily: before any read or input, the session is advanced by the time
//! elapsed since it was last touched, which fires its due clears in order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use flashcard_core::{FlipDeck, MatchGame, QuizResult, QuizSession};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{ApiError, Result};

/// Study mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Match,
    Quiz,
    Flip,
}

impl StudyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Quiz => "quiz",
            Self::Flip => "flip",
        }
    }
}

/// Engine state of one session.
#[derive(Debug)]
pub enum StudySession {
    Match(MatchGame),
    Quiz(QuizSession),
    Flip(FlipDeck),
}

impl StudySession {
    pub fn mode(&self) -> StudyMode {
        match self {
            Self::Match(_) => StudyMode::Match,
            Self::Quiz(_) => StudyMode::Quiz,
            Self::Flip(_) => StudyMode::Flip,
        }
    }

    pub fn as_match_mut(&mut self) -> Result<&mut MatchGame> {
        let found = self.mode();
        match self {
            Self::Match(game) => Ok(game),
            _ => Err(mode_mismatch(StudyMode::Match, found)),
        }
    }

    pub fn as_quiz_mut(&mut self) -> Result<&mut QuizSession> {
        let found = self.mode();
        match self {
            Self::Quiz(quiz) => Ok(quiz),
            _ => Err(mode_mismatch(StudyMode::Quiz, found)),
        }
    }

    pub fn as_flip_mut(&mut self) -> Result<&mut FlipDeck> {
        let found = self.mode();
        match self {
            Self::Flip(deck) => Ok(deck),
            _ => Err(mode_mismatch(StudyMode::Flip, found)),
        }
    }

    /// Apply elapsed time. Returns the quiz result when the quiz finished
    /// during this step.
    fn advance(&mut self, delta: Duration) -> Option<QuizResult> {
        match self {
            Self::Match(game) => {
                game.advance(delta);
                None
            }
            Self::Quiz(quiz) => {
                let was_completed = quiz.is_completed();
                quiz.advance(delta);
                if was_completed {
                    None
                } else {
                    quiz.result()
                }
            }
            Self::Flip(_) => None,
        }
    }

    fn cancel_pending(&mut self) {
        match self {
            Self::Match(game) => game.cancel_pending(),
            Self::Quiz(quiz) => quiz.cancel_pending(),
            Self::Flip(_) => {}
        }
    }
}

fn mode_mismatch(expected: StudyMode, found: StudyMode) -> ApiError {
    ApiError::NotFound(format!(
        "{} session (found a {} session)",
        expected.as_str(),
        found.as_str()
    ))
}

struct SessionEntry {
    set_id: String,
    session: StudySession,
    synced_at: Duration,
}

/// All live sessions, keyed by id.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Register a freshly started session and return its id.
    pub async fn insert(&self, set_id: &str, session: StudySession) -> Uuid {
        let id = Uuid::new_v4();
        let mode = session.mode();
        let mut sessions = self.sessions.write().await;
        let entry = SessionEntry {
            set_id: set_id.to_string(),
            session,
            synced_at: self.clock.now(),
        };
        sessions.insert(id, entry);
        drop(sessions);
        tracing::info!("Started {} session {} for set {}", mode.as_str(), id, set_id);
        id
    }

    /// Bring a session up to the current time and run `f` on it.
    ///
    /// `f` receives the set id and the session. Sessions of another mode are
    /// reported as missing.
    pub async fn with_session<T, F>(&self, id: Uuid, mode: StudyMode, f: F) -> Result<T>
    where
        F: FnOnce(&str, &mut StudySession) -> Result<T>,
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .filter(|e| e.session.mode() == mode)
            .ok_or_else(|| ApiError::NotFound(format!("{} session {}", mode.as_str(), id)))?;

        // Read under the lock; synced_at never moves backwards.
        let now = self.clock.now();
        if now > entry.synced_at {
            let finished = entry.session.advance(now - entry.synced_at);
            entry.synced_at = now;
            if let Some(result) = finished {
                tracing::info!(
                    "Quiz session {} finished: {}/{}",
                    id,
                    result.score,
                    result.total
                );
            }
        }
        f(&entry.set_id, &mut entry.session)
    }

    /// End a session, cancelling its pending timers.
    pub async fn remove(&self, id: Uuid, mode: StudyMode) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(entry) if entry.session.mode() == mode => {}
            _ => {
                return Err(ApiError::NotFound(format!(
                    "{} session {}",
                    mode.as_str(),
                    id
                )))
            }
        }
        if let Some(mut entry) = sessions.remove(&id) {
            entry.session.cancel_pending();
            tracing::info!("Ended {} session {}", mode.as_str(), id);
        }
        Ok(())
    }

    /// Drop sessions untouched for longer than `ttl`. Returns how many were dropped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = self.clock.now();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            let keep = now.saturating_sub(entry.synced_at) <= ttl;
            if !keep {
                entry.session.cancel_pending();
            }
            keep
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Periodically evict idle sessions.
pub fn spawn_sweeper(store: Arc<SessionStore>, ttl: Duration, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let evicted = store.evict_idle(ttl).await;
            if evicted > 0 {
                tracing::info!("Evicted {} idle study sessions", evicted);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use flashcard_core::{FaceItem, FaceKind, FlashcardRecord, StudyTimings};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn match_session() -> StudySession {
        let face = |text: &str, kind, pair: &str| FaceItem {
            text: text.to_string(),
            kind,
            pair_id: pair.to_string(),
        };
        StudySession::Match(MatchGame::from_deck(
            vec![
                face("A", FaceKind::Term, "A"),
                face("a", FaceKind::Definition, "A"),
                face("B", FaceKind::Term, "B"),
                face("b", FaceKind::Definition, "B"),
            ],
            StudyTimings::default(),
        ))
    }

    fn store() -> (SessionStore, ManualClock) {
        let clock = ManualClock::new();
        (SessionStore::new(Arc::new(clock.clone())), clock)
    }

    #[tokio::test]
    async fn test_elapsed_time_applied_before_input() {
        let (store, clock) = store();
        let id = store.insert("set", match_session()).await;

        store
            .with_session(id, StudyMode::Match, |_, session| {
                let game = session.as_match_mut()?;
                game.click(0)?;
                game.click(2)?;
                Ok(())
            })
            .await
            .unwrap();

        clock.advance(ms(600));
        let board = store
            .with_session(id, StudyMode::Match, |_, session| {
                Ok(session.as_match_mut()?.board())
            })
            .await
            .unwrap();

        assert!(board.selected.is_empty());
        assert!(board.incorrect.is_empty());
        assert_eq!(board.elapsed_ms, 600);
    }

    #[tokio::test]
    async fn test_wrong_mode_is_not_found() {
        let (store, _clock) = store();
        let id = store.insert("set", match_session()).await;

        let result = store.with_session(id, StudyMode::Quiz, |_, _| Ok(())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert!(store.remove(id, StudyMode::Flip).await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_ends_session() {
        let (store, _clock) = store();
        let id = store.insert("set", match_session()).await;

        store.remove(id, StudyMode::Match).await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.remove(id, StudyMode::Match).await.is_err());
    }

    #[tokio::test]
    async fn test_evict_idle_sessions() {
        let (store, clock) = store();
        let stale = store.insert("set", match_session()).await;
        clock.advance(Duration::from_secs(50));
        let deck = FlipDeck::new(vec![FlashcardRecord::new("a", "b")]).unwrap();
        let fresh = store.insert("set", StudySession::Flip(deck)).await;
        clock.advance(Duration::from_secs(20));

        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 1);
        assert!(store
            .with_session(stale, StudyMode::Match, |_, _| Ok(()))
            .await
            .is_err());
        assert!(store
            .with_session(fresh, StudyMode::Flip, |_, _| Ok(()))
            .await
            .is_ok());
    }

    /// Clock that replays a fixed list of readings, then repeats the last.
    struct ScriptedClock {
        readings: std::sync::Mutex<std::collections::VecDeque<Duration>>,
        last: std::sync::Mutex<Duration>,
    }

    impl ScriptedClock {
        fn new(readings: &[u64]) -> Self {
            Self {
                readings: std::sync::Mutex::new(readings.iter().map(|n| ms(*n)).collect()),
                last: std::sync::Mutex::new(Duration::ZERO),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> Duration {
            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.readings.lock().unwrap().pop_front() {
                *last = next;
            }
            *last
        }
    }

    #[tokio::test]
    async fn test_stale_clock_reading_does_not_replay_time() {
        // Two requests racing for the lock can observe 110 then 100.
        let store = SessionStore::new(Arc::new(ScriptedClock::new(&[0, 110, 100, 120])));
        let id = store.insert("set", match_session()).await;

        for _ in 0..3 {
            store
                .with_session(id, StudyMode::Match, |_, _| Ok(()))
                .await
                .unwrap();
        }

        let board = store
            .with_session(id, StudyMode::Match, |_, session| {
                Ok(session.as_match_mut()?.board())
            })
            .await
            .unwrap();
        assert_eq!(board.elapsed_ms, 120);
    }

    #[test]
    fn test_quiz_finish_reported_once() {
        let quiz = QuizSession::new(
            vec![FlashcardRecord::new("France", "Paris")],
            &StudyTimings::default(),
        )
        .unwrap();
        let mut session = StudySession::Quiz(quiz);
        session.as_quiz_mut().unwrap().submit("paris");

        assert_eq!(session.advance(ms(1000)), None);
        let result = session.advance(ms(500)).unwrap();
        assert_eq!((result.score, result.total), (1, 1));
        assert_eq!(session.advance(ms(5000)), None);
    }

    #[test]
    fn test_wrong_engine_access_is_not_found() {
        let mut session = match_session();
        assert!(matches!(session.as_quiz_mut(), Err(ApiError::NotFound(_))));
        assert!(matches!(session.as_flip_mut(), Err(ApiError::NotFound(_))));
        assert!(session.as_match_mut().is_ok());
    }
}
