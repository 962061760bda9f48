use crate::models::{Sport, StatEvent, StatKind};

/// Derived score of a session. Basketball sums the recorded value of every
/// make; volleyball counts `POINT` events.
pub fn score(events: &[StatEvent], sport: Sport) -> u32 {
    match sport {
        Sport::Basketball => events
            .iter()
            .filter(|event| event.kind.is_make())
            .map(|event| event.value.unwrap_or(0))
            .fold(0u32, u32::saturating_add),
        Sport::Volleyball => {
            let points = find_count(events, StatKind::Point);
            u32::try_from(points).unwrap_or(u32::MAX)
        }
    }
}

pub fn find_count(events: &[StatEvent], kind: StatKind) -> usize {
    events.iter().filter(|event| event.kind == kind).count()
}

/// Share of made attempts as a percentage with one decimal, `"0.0"` when
/// nothing was attempted.
pub fn shooting_percentage(makes: usize, misses: usize) -> String {
    let total = makes + misses;
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", makes as f64 / total as f64 * 100.0)
}
