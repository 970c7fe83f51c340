use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use twostars_core::{BoardLayout, Coord2, Game, GameError, GameStatus, ToggleOutcome};
use web_time::{Duration, Instant};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period before a change is written to storage.
    pub persist_delay_ms: u64,
}

impl SessionConfig {
    pub const DEFAULT_PERSIST_DELAY_MS: u64 = 300;

    pub const fn persist_delay(&self) -> Duration {
        Duration::from_millis(self.persist_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_delay_ms: Self::DEFAULT_PERSIST_DELAY_MS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
}

/// Non-fatal problem shown next to the board while play goes on.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("Storage full - game progress cannot be saved")]
    StorageFull,
    #[error("Storage unavailable - game progress cannot be saved")]
    StorageUnavailable,
    #[error("Failed to save game progress")]
    SaveFailed,
    #[error("Failed to load saved game")]
    LoadFailed,
    #[error("Saved game data is incompatible with current board")]
    IncompatibleSave,
}

impl From<&StorageError> for Diagnostic {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded => Self::StorageFull,
            StorageError::Unavailable => Self::StorageUnavailable,
            StorageError::Failed(_) => Self::SaveFailed,
        }
    }
}

/// One board being played, with its saved copy kept in step.
///
/// Starts in [`SessionPhase::Loading`]; [`finish_loading`](Self::finish_loading)
/// seeds the game from storage and switches to [`SessionPhase::Ready`], after
/// which changes are persisted once they settle for the configured delay.
/// The owner calls [`poll`](Self::poll) to let pending writes happen.
#[derive(Debug)]
pub struct Session<S> {
    board_id: String,
    game: Game,
    store: GameStateStore<S>,
    phase: SessionPhase,
    persist: Debouncer,
    diagnostic: Option<Diagnostic>,
}

impl<S: Storage> Session<S> {
    pub fn new(
        board_id: impl Into<String>,
        layout: BoardLayout,
        storage: S,
        config: &SessionConfig,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            game: Game::new(layout),
            store: GameStateStore::new(storage),
            phase: SessionPhase::Loading,
            persist: Debouncer::new(config.persist_delay()),
            diagnostic: None,
        }
    }

    /// [`new`](Self::new) followed by [`finish_loading`](Self::finish_loading).
    pub fn open(
        board_id: impl Into<String>,
        layout: BoardLayout,
        storage: S,
        config: &SessionConfig,
    ) -> Self {
        let mut session = Self::new(board_id, layout, storage, config);
        session.finish_loading();
        session
    }

    /// Seeds the game from a compatible saved record, if any. Runs once.
    pub fn finish_loading(&mut self) {
        if self.phase == SessionPhase::Ready {
            return;
        }
        self.diagnostic = None;
        match self.store.try_load(&self.board_id, Some(self.game.layout())) {
            Ok(Some(snapshot)) => {
                if !self.apply(snapshot) {
                    self.diagnostic = Some(Diagnostic::LoadFailed);
                }
            }
            Ok(None) => log::debug!("{}: starting fresh", self.board_id),
            Err(err) => log::debug!("{}: starting fresh, saved game unusable: {err}", self.board_id),
        }
        self.phase = SessionPhase::Ready;
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn store(&self) -> &GameStateStore<S> {
        &self.store
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn stars(&self) -> &Array2<bool> {
        self.game.stars()
    }

    pub fn shading(&self) -> &Array2<bool> {
        self.game.shading()
    }

    pub fn diagnostic(&self) -> Option<Diagnostic> {
        self.diagnostic
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            stars: self.game.stars().clone(),
            status: self.game.status(),
        }
    }

    /// Flips the star at `coords` unless the game is over or the empty cell
    /// is shaded; any change schedules a write.
    pub fn toggle(&mut self, coords: Coord2) -> twostars_core::Result<ToggleOutcome> {
        self.toggle_at(coords, Instant::now())
    }

    pub fn toggle_at(
        &mut self,
        coords: Coord2,
        now: Instant,
    ) -> twostars_core::Result<ToggleOutcome> {
        if self.phase != SessionPhase::Ready {
            return Err(GameError::NotReady);
        }
        let outcome = match self.game.toggle(coords) {
            Err(GameError::AlreadyEnded) => {
                log::trace!("{}: game over, ignoring {coords:?}", self.board_id);
                ToggleOutcome::NoChange
            }
            result => result?,
        };
        if outcome.has_update() {
            self.persist.schedule(now);
        }
        Ok(outcome)
    }

    /// Empties the board from any status and forgets the saved copy.
    pub fn reset(&mut self) {
        self.game.reset();
        self.persist.cancel();
        self.diagnostic = None;
        if let Err(err) = self.store.clear(&self.board_id) {
            log::warn!("{}: could not clear saved game: {err}", self.board_id);
        }
    }

    /// Writes the current state right away. On failure the reason is kept as
    /// the diagnostic and `false` is returned. Nothing is written before the
    /// saved copy has been loaded.
    pub fn save(&mut self) -> bool {
        if self.phase != SessionPhase::Ready {
            log::debug!("{}: not loaded yet, skipping save", self.board_id);
            return false;
        }
        self.persist.cancel();
        match self.store.save(&self.board_id, &self.snapshot()) {
            Ok(()) => {
                self.diagnostic = None;
                true
            }
            Err(err) => {
                log::error!("{}: could not save game: {err}", self.board_id);
                self.diagnostic = Some(Diagnostic::from(&err));
                false
            }
        }
    }

    /// Replaces the current state with the saved one, if it fits this board.
    pub fn load(&mut self) -> bool {
        match self.store.try_load(&self.board_id, Some(self.game.layout())) {
            Ok(Some(snapshot)) => {
                self.persist.cancel();
                if self.apply(snapshot) {
                    self.diagnostic = None;
                    true
                } else {
                    self.diagnostic = Some(Diagnostic::LoadFailed);
                    false
                }
            }
            Ok(None) => false,
            Err(StoreError::DimensionMismatch) => {
                self.diagnostic = Some(Diagnostic::IncompatibleSave);
                false
            }
            Err(err) => {
                log::warn!("{}: could not load game: {err}", self.board_id);
                self.diagnostic = Some(Diagnostic::LoadFailed);
                false
            }
        }
    }

    /// Runs the pending write once its quiet period has passed. Returns
    /// whether a write was attempted.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.phase == SessionPhase::Ready && self.persist.fire_if_due(now) {
            self.save();
            true
        } else {
            false
        }
    }

    /// Writes a pending change immediately, e.g. before shutting down.
    pub fn flush(&mut self) -> bool {
        if self.phase == SessionPhase::Ready && self.persist.is_pending() {
            self.save();
            true
        } else {
            false
        }
    }

    pub fn next_persist_deadline(&self) -> Option<Instant> {
        self.persist.deadline()
    }

    /// Reacts to another writer touching storage. `None` stands for "all
    /// keys". A change to this board's record reloads it, dropping local
    /// unsaved changes. Returns whether the state was reloaded.
    pub fn handle_external_change(&mut self, key: Option<&str>) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        if key.is_some_and(|key| key != board_state_key(&self.board_id)) {
            return false;
        }

        log::debug!("{}: reloading after external change", self.board_id);
        self.persist.cancel();
        match self.store.try_load(&self.board_id, Some(self.game.layout())) {
            Ok(Some(snapshot)) => {
                if !self.apply(snapshot) {
                    self.game.reset();
                }
            }
            Ok(None) | Err(_) => self.game.reset(),
        }
        true
    }

    fn apply(&mut self, snapshot: GameSnapshot) -> bool {
        let stored_status = snapshot.status;
        if let Err(err) = self.game.restore(snapshot.stars) {
            log::warn!("{}: saved stars rejected: {err}", self.board_id);
            return false;
        }
        if self.game.status() != stored_status {
            log::debug!(
                "{}: saved status {stored_status} re-derived as {}",
                self.board_id,
                self.game.status()
            );
        }
        true
    }
}
