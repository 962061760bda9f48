use crate::models::{GameMetadata, GameState, NewEvent, Sport, StatError, StatEvent, StatKind, Team};
use crate::score;
use chrono::Utc;
use uuid::Uuid;

impl GameState {
    pub fn new(sport: Sport) -> Self {
        Self {
            metadata: GameMetadata { sport },
            events: Vec::new(),
        }
    }

    pub fn sport(&self) -> Sport {
        self.metadata.sport
    }

    /// Appends a new event stamped with a fresh id and the current time.
    pub fn append(&mut self, event: NewEvent) -> Result<StatEvent, StatError> {
        self.append_at(event, Utc::now().timestamp_millis())
    }

    pub fn append_at(&mut self, event: NewEvent, timestamp: i64) -> Result<StatEvent, StatError> {
        self.check_kind(event.kind)?;
        let event = StatEvent {
            id: Uuid::new_v4().to_string(),
            timestamp,
            kind: event.kind,
            value: event.value,
            team: Team::Home,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Removes the most recent event of `kind`. Events of other kinds keep
    /// their relative order.
    pub fn remove_last_matching(&mut self, kind: StatKind) -> Option<StatEvent> {
        let index = self.events.iter().rposition(|event| event.kind == kind)?;
        Some(self.events.remove(index))
    }

    pub fn undo_last(&mut self) -> Option<StatEvent> {
        self.events.pop()
    }

    /// Positive `delta` records one event carrying `value`; anything else
    /// removes the latest event of `kind`. Returns whether the log changed.
    pub fn adjust(&mut self, kind: StatKind, delta: i32, value: Option<u32>) -> Result<bool, StatError> {
        if delta > 0 {
            self.append(NewEvent { kind, value })?;
            Ok(true)
        } else {
            Ok(self.remove_last_matching(kind).is_some())
        }
    }

    pub fn score(&self) -> u32 {
        score::score(&self.events, self.sport())
    }

    pub fn find_count(&self, kind: StatKind) -> usize {
        score::find_count(&self.events, kind)
    }

    fn check_kind(&self, kind: StatKind) -> Result<(), StatError> {
        let sport = self.sport();
        if sport.accepts(kind) {
            Ok(())
        } else {
            Err(StatError::NotInVocabulary { kind, sport })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(game: &GameState) -> Vec<StatKind> {
        game.events.iter().map(|event| event.kind).collect()
    }

    #[test]
    fn append_assigns_identity_and_home_team() {
        let mut game = GameState::new(Sport::Basketball);
        let first = game.append(NewEvent::new(StatKind::Rebound)).unwrap();
        let second = game.append(NewEvent::new(StatKind::Rebound)).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(game.events.last(), Some(&second));
        assert_eq!(first.team, Team::Home);
        assert!(first.timestamp > 0);
        assert_eq!(game.events.len(), 2);
    }

    #[test]
    fn append_rejects_kind_from_other_sport() {
        let mut game = GameState::new(Sport::Volleyball);
        let err = game.append(NewEvent::new(StatKind::ThreePointMake)).unwrap_err();
        assert_eq!(
            err,
            StatError::NotInVocabulary {
                kind: StatKind::ThreePointMake,
                sport: Sport::Volleyball
            }
        );
        assert!(game.events.is_empty());
    }

    #[test]
    fn remove_last_matching_scenario() {
        let mut game = GameState::new(Sport::Basketball);
        game.append(NewEvent::new(StatKind::TwoPointMake)).unwrap();
        game.append(NewEvent::new(StatKind::ThreePointMiss)).unwrap();
        game.append(NewEvent::new(StatKind::TwoPointMake)).unwrap();
        assert_eq!(game.score(), 4);

        let last_make_id = game.events[2].id.clone();
        let removed = game.remove_last_matching(StatKind::TwoPointMake).unwrap();
        assert_eq!(removed.id, last_make_id);
        assert_eq!(game.events.len(), 2);
        assert_eq!(game.score(), 2);
        assert_eq!(kinds(&game), vec![StatKind::TwoPointMake, StatKind::ThreePointMiss]);
    }

    #[test]
    fn remove_last_matching_skips_non_contiguous_events() {
        let mut game = GameState::new(Sport::Volleyball);
        for kind in [StatKind::Kill, StatKind::Dig, StatKind::Kill, StatKind::Ace, StatKind::Dig] {
            game.append(NewEvent::new(kind)).unwrap();
        }
        game.remove_last_matching(StatKind::Kill);
        assert_eq!(
            kinds(&game),
            vec![StatKind::Kill, StatKind::Dig, StatKind::Ace, StatKind::Dig]
        );
    }

    #[test]
    fn remove_last_matching_without_match_leaves_log_unchanged() {
        let mut game = GameState::new(Sport::Basketball);
        game.append(NewEvent::new(StatKind::Steal)).unwrap();
        let before = serde_json::to_vec(&game).unwrap();

        assert!(game.remove_last_matching(StatKind::Foul).is_none());
        assert_eq!(serde_json::to_vec(&game).unwrap(), before);
    }

    #[test]
    fn undo_last_removes_only_the_final_event() {
        let mut game = GameState::new(Sport::Basketball);
        assert!(game.undo_last().is_none());

        for kind in [StatKind::Assist, StatKind::FreeThrowMake, StatKind::Block] {
            game.append(NewEvent::new(kind)).unwrap();
        }
        let prior = game.events[..2].to_vec();
        let removed = game.undo_last().unwrap();

        assert_eq!(removed.kind, StatKind::Block);
        assert_eq!(game.events, prior);
    }

    #[test]
    fn adjust_appends_on_positive_delta_and_removes_otherwise() {
        let mut game = GameState::new(Sport::Basketball);
        assert!(game.adjust(StatKind::ThreePointMake, 1, Some(3)).unwrap());
        assert!(game.adjust(StatKind::ThreePointMake, 1, Some(3)).unwrap());
        assert_eq!(game.score(), 6);

        assert!(game.adjust(StatKind::ThreePointMake, -1, None).unwrap());
        assert_eq!(game.score(), 3);
        assert!(game.adjust(StatKind::Foul, 0, None).is_ok_and(|changed| !changed));
        assert!(game.adjust(StatKind::Kill, 1, None).is_err());
    }
}
