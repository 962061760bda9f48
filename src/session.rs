use crate::models::{GameState, NewEvent, Sport, StatError, StatEvent, StatKind};
use crate::persistence::PersistenceBridge;
use crate::timer::{SessionTimer, TimerSnapshot};
use crate::view::View;
use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::{error, info};

/// Owner of the active session: the event log, the timer and the current
/// view. Every observable change bumps `revision` and is written through the
/// persistence bridge while a game exists.
pub struct Tracker {
    view: View,
    game: Option<GameState>,
    timer: SessionTimer,
    revision: u64,
    bridge: PersistenceBridge,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub view: View,
    pub sport: Option<Sport>,
    pub score: u32,
    pub events: Vec<StatEvent>,
    pub timer: TimerSnapshot,
    pub can_resume: bool,
    pub revision: u64,
}

impl Tracker {
    /// Builds the tracker from whatever the bridge has saved. A restored game
    /// opens straight into the game view with the timer stopped.
    pub fn restore(bridge: PersistenceBridge) -> Self {
        let restored = bridge.load();
        let view = if restored.game.is_some() {
            View::Game
        } else {
            View::Setup
        };
        Self {
            view,
            game: restored.game,
            timer: SessionTimer::restore(restored.elapsed),
            revision: 0,
            bridge,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn score(&self) -> u32 {
        self.game.as_ref().map_or(0, GameState::score)
    }

    pub fn find_count(&self, kind: StatKind) -> usize {
        self.game.as_ref().map_or(0, |game| game.find_count(kind))
    }

    pub fn start(&mut self, sport: Sport) {
        self.timer.reset();
        self.game = Some(GameState::new(sport));
        self.view = View::Game;
        info!(%sport, "session started");
        self.changed();
    }

    pub fn resume(&mut self) -> bool {
        if self.game.is_none() {
            return false;
        }
        self.view = View::Game;
        self.bump();
        true
    }

    pub fn go_to_setup(&mut self) {
        self.view = View::Setup;
        self.bump();
    }

    /// Records an event. Without an active game nothing happens.
    pub fn add_event(&mut self, event: NewEvent) -> Result<bool, StatError> {
        let Some(game) = self.game.as_mut() else {
            return Ok(false);
        };
        game.append(event)?;
        self.changed();
        Ok(true)
    }

    pub fn adjust(&mut self, kind: StatKind, delta: i32, value: Option<u32>) -> Result<bool, StatError> {
        let Some(game) = self.game.as_mut() else {
            return Ok(false);
        };
        let value = value.or_else(|| kind.points());
        if !game.adjust(kind, delta, value)? {
            return Ok(false);
        }
        self.changed();
        Ok(true)
    }

    pub fn undo(&mut self) -> bool {
        let removed = self.game.as_mut().and_then(GameState::undo_last);
        if removed.is_none() {
            return false;
        }
        self.changed();
        true
    }

    /// Discards the session and its saved entries. Requires confirmation.
    pub fn end_session(&mut self, confirmed: bool) -> bool {
        if !confirmed || self.game.is_none() {
            return false;
        }
        if let Err(err) = self.bridge.clear() {
            error!("failed to clear saved session: {err}");
        }
        self.game = None;
        self.view = View::Setup;
        self.timer.reset();
        info!("session ended");
        self.bump();
        true
    }

    /// Flips the timer. Returns the generation a new ticker must carry when
    /// the timer started; the caller spawns it and hands it back through
    /// [`Tracker::attach_ticker`].
    pub fn toggle_timer(&mut self) -> Option<u64> {
        if self.game.is_none() {
            return None;
        }
        let started = self.timer.toggle();
        self.bump();
        started
    }

    pub fn attach_ticker(&mut self, ticker: AbortHandle) {
        self.timer.attach(ticker);
    }

    pub fn reset_timer(&mut self, confirmed: bool) -> bool {
        if !confirmed || self.game.is_none() {
            return false;
        }
        self.timer.reset();
        self.changed();
        true
    }

    /// Applies one scheduled second. Returns `false` once the ticker that
    /// carries `generation` is no longer current.
    pub fn tick(&mut self, generation: u64) -> bool {
        if !self.timer.tick(generation) {
            return false;
        }
        self.changed();
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view,
            sport: self.game.as_ref().map(GameState::sport),
            score: self.score(),
            events: self
                .game
                .as_ref()
                .map(|game| game.events.clone())
                .unwrap_or_default(),
            timer: self.timer.snapshot(),
            can_resume: self.game.is_some(),
            revision: self.revision,
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn changed(&mut self) {
        self.bump();
        let Some(game) = self.game.as_ref() else {
            return;
        };
        if let Err(err) = self.bridge.save(game, self.timer.elapsed()) {
            error!("failed to persist session: {err}");
        }
    }
}
