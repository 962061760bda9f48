use crate::models::GameState;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};

pub const GAME_KEY: &str = "courtside_last_game";
pub const TIMER_KEY: &str = "courtside_timer";

/// String key-value storage shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Restored {
    pub game: Option<GameState>,
    pub elapsed: u64,
}

/// Reads and writes the saved session: one entry for the game state and one
/// for the elapsed timer seconds.
#[derive(Clone)]
pub struct PersistenceBridge {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceBridge {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Loads the saved session. Unreadable entries are logged and treated as
    /// absent; the timer is only restored together with a game.
    pub fn load(&self) -> Restored {
        let Some(game) = self.load_game() else {
            return Restored::default();
        };
        let elapsed = self.load_elapsed();
        info!(
            sport = %game.metadata.sport,
            events = game.events.len(),
            elapsed,
            "restored saved session"
        );
        Restored {
            game: Some(game),
            elapsed,
        }
    }

    pub fn save(&self, game: &GameState, elapsed: u64) -> io::Result<()> {
        let payload = serde_json::to_string(game).map_err(io::Error::other)?;
        self.store.set(GAME_KEY, &payload)?;
        self.store.set(TIMER_KEY, &elapsed.to_string())
    }

    pub fn clear(&self) -> io::Result<()> {
        self.store.remove(GAME_KEY)?;
        self.store.remove(TIMER_KEY)
    }

    fn load_game(&self) -> Option<GameState> {
        let raw = match self.store.get(GAME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                error!("failed to read saved game: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(game) => Some(game),
            Err(err) => {
                error!("failed to parse saved game: {err}");
                if let Err(err) = self.store.remove(GAME_KEY) {
                    error!("failed to discard saved game: {err}");
                }
                None
            }
        }
    }

    fn load_elapsed(&self) -> u64 {
        match self.store.get(TIMER_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<u64>().unwrap_or_else(|err| {
                warn!("ignoring saved timer '{raw}': {err}");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                error!("failed to read saved timer: {err}");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewEvent, Sport, StatKind};

    fn sample_game() -> GameState {
        let mut game = GameState::new(Sport::Basketball);
        game.append(NewEvent::new(StatKind::TwoPointMake)).unwrap();
        game.append(NewEvent::new(StatKind::Rebound)).unwrap();
        game.append(NewEvent::new(StatKind::FreeThrowMiss)).unwrap();
        game
    }

    #[test]
    fn empty_store_restores_nothing() {
        let bridge = PersistenceBridge::in_memory();
        assert_eq!(bridge.load(), Restored::default());
    }

    #[test]
    fn reload_reproduces_events_and_timer() {
        let bridge = PersistenceBridge::in_memory();
        let game = sample_game();
        bridge.save(&game, 97).unwrap();

        let first = bridge.load();
        let second = bridge.load();
        assert_eq!(first.game.as_ref(), Some(&game));
        assert_eq!(first.elapsed, 97);
        assert_eq!(first, second);
    }

    #[test]
    fn timer_entry_is_stored_as_text() {
        let bridge = PersistenceBridge::in_memory();
        bridge.save(&sample_game(), 12).unwrap();
        assert_eq!(bridge.store().get(TIMER_KEY).unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn corrupt_game_entry_is_discarded() {
        let bridge = PersistenceBridge::in_memory();
        bridge.store().set(GAME_KEY, "{\"metadata\":").unwrap();
        bridge.store().set(TIMER_KEY, "30").unwrap();

        assert_eq!(bridge.load(), Restored::default());
        assert_eq!(bridge.store().get(GAME_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_timer_entry_restores_zero() {
        let bridge = PersistenceBridge::in_memory();
        bridge.save(&sample_game(), 5).unwrap();
        bridge.store().set(TIMER_KEY, "NaN").unwrap();

        let restored = bridge.load();
        assert!(restored.game.is_some());
        assert_eq!(restored.elapsed, 0);
    }

    #[test]
    fn timer_without_game_is_ignored() {
        let bridge = PersistenceBridge::in_memory();
        bridge.store().set(TIMER_KEY, "44").unwrap();
        assert_eq!(bridge.load(), Restored::default());
    }

    #[test]
    fn clear_removes_both_entries() {
        let bridge = PersistenceBridge::in_memory();
        bridge.save(&sample_game(), 3).unwrap();
        bridge.clear().unwrap();
        assert_eq!(bridge.store().get(GAME_KEY).unwrap(), None);
        assert_eq!(bridge.store().get(TIMER_KEY).unwrap(), None);
    }

    #[test]
    fn reads_entries_with_zero_valued_events() {
        let bridge = PersistenceBridge::in_memory();
        let raw = r#"{"metadata":{"sport":"Volleyball"},"events":[
            {"id":"k3j9x0a1b","timestamp":1718000000000,"type":"POINT","value":0,"team":"home"},
            {"id":"p0q8r7s6t","timestamp":1718000001000,"type":"KILL","value":0,"team":"home"}
        ]}"#;
        bridge.store().set(GAME_KEY, raw).unwrap();
        bridge.store().set(TIMER_KEY, "61").unwrap();

        let restored = bridge.load();
        let game = restored.game.expect("game restored");
        assert_eq!(game.metadata.sport, Sport::Volleyball);
        assert_eq!(game.score(), 1);
        assert_eq!(game.find_count(StatKind::Kill), 1);
        assert_eq!(restored.elapsed, 61);
    }
}
