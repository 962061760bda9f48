use crate::models::{GameState, Sport, StatKind};
use crate::panels::{EfficiencyLine, Tone, panel_for};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub kind: StatKind,
    pub count: usize,
    /// Value recorded when the row is incremented.
    pub increment_value: Option<u32>,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarySection {
    pub title: &'static str,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub sport: Sport,
    pub total_points: u32,
    pub efficiency: Vec<EfficiencyLine>,
    pub sections: Vec<SummarySection>,
}

pub fn build_summary(game: &GameState) -> Summary {
    let panel = panel_for(game.sport());
    let sections = panel
        .summary_sections()
        .iter()
        .map(|section| SummarySection {
            title: section.title,
            rows: section
                .rows
                .iter()
                .map(|row| SummaryRow {
                    label: row.label,
                    kind: row.kind,
                    count: game.find_count(row.kind),
                    increment_value: row.kind.points(),
                    tone: row.tone,
                })
                .collect(),
        })
        .collect();

    Summary {
        sport: game.sport(),
        total_points: game.score(),
        efficiency: panel.efficiency(&game.events),
        sections,
    }
}
