//! Persistence contract - session and best-score storage collaborator
//!
//! The core calls these at session boundaries but never implements real
//! storage. `MemoryStore` backs tests and embedders that keep everything
//! in-process.

use anyhow::Result;

use crate::core::session::GameSession;
use crate::core::snapshot::SessionSnapshot;

/// Storage collaborator for the best score and the current session image
pub trait SessionStore {
    fn load_best_score(&self) -> Result<u32>;
    fn save_best_score(&mut self, score: u32) -> Result<()>;
    fn load_session(&self) -> Result<Option<SessionSnapshot>>;
    fn save_session(&mut self, snapshot: &SessionSnapshot) -> Result<()>;
    fn clear_session(&mut self) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    best_score: u32,
    session: Option<SessionSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load_best_score(&self) -> Result<u32> {
        Ok(self.best_score)
    }

    fn save_best_score(&mut self, score: u32) -> Result<()> {
        self.best_score = score;
        Ok(())
    }

    fn load_session(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.session.clone())
    }

    fn save_session(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.session = Some(snapshot.clone());
        Ok(())
    }

    fn clear_session(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}

/// Resume the stored session if one exists, otherwise start fresh with the
/// stored best score carried over.
pub fn resume_or_new(store: &impl SessionStore, seed: u32) -> Result<GameSession> {
    if let Some(snapshot) = store.load_session()? {
        return Ok(GameSession::restore(&snapshot));
    }

    let mut snapshot = GameSession::new(seed).snapshot();
    snapshot.best_score = snapshot.best_score.max(store.load_best_score()?);
    Ok(GameSession::restore(&snapshot))
}

/// Persist the session image and its best score
pub fn checkpoint(session: &GameSession, store: &mut impl SessionStore) -> Result<()> {
    store.save_session(&session.snapshot())?;
    store.save_best_score(session.best_score())?;
    Ok(())
}

/// Drop the stored session (after a leaderboard submission or a restart)
pub fn clear(store: &mut impl SessionStore) -> Result<()> {
    store.clear_session()
}
