use crate::models::{Sport, StatEvent, StatKind};
use crate::score::{find_count, shooting_percentage};
use serde::Serialize;

/// Visual weight of a button or summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Make,
    Miss,
    Neutral,
    Foul,
    Feature,
    Strong,
    Accent,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Make => "tone-make",
            Tone::Miss => "tone-miss",
            Tone::Neutral => "tone-neutral",
            Tone::Foul => "tone-foul",
            Tone::Feature => "tone-feature",
            Tone::Strong => "tone-strong",
            Tone::Accent => "tone-accent",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanelButton {
    pub label: &'static str,
    pub kind: StatKind,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct ButtonGroup {
    pub title: Option<&'static str>,
    pub columns: u8,
    pub buttons: &'static [PanelButton],
}

#[derive(Debug, Clone, Copy)]
pub struct RowLayout {
    pub label: &'static str,
    pub kind: StatKind,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    pub title: &'static str,
    pub rows: &'static [RowLayout],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EfficiencyLine {
    pub label: &'static str,
    pub percentage: String,
}

/// Per-sport tracking panel. Both sports render from the same game state and
/// derived score and record through the same event callbacks.
pub trait SportPanel: Send + Sync {
    fn sport(&self) -> Sport;
    fn score_label(&self) -> &'static str;
    fn button_groups(&self) -> &'static [ButtonGroup];
    fn summary_sections(&self) -> &'static [SectionLayout];

    fn efficiency(&self, _events: &[StatEvent]) -> Vec<EfficiencyLine> {
        Vec::new()
    }

    fn shows_timer(&self) -> bool {
        false
    }
}

pub struct BasketballPanel;
pub struct VolleyballPanel;

static BASKETBALL: BasketballPanel = BasketballPanel;
static VOLLEYBALL: VolleyballPanel = VolleyballPanel;

pub fn panel_for(sport: Sport) -> &'static dyn SportPanel {
    match sport {
        Sport::Basketball => &BASKETBALL,
        Sport::Volleyball => &VOLLEYBALL,
    }
}

const fn button(label: &'static str, kind: StatKind, tone: Tone) -> PanelButton {
    PanelButton { label, kind, tone }
}

const fn row(label: &'static str, kind: StatKind, tone: Tone) -> RowLayout {
    RowLayout { label, kind, tone }
}

const BASKETBALL_GROUPS: [ButtonGroup; 3] = [
    ButtonGroup {
        title: Some("Made"),
        columns: 3,
        buttons: &[
            button("3", StatKind::ThreePointMake, Tone::Make),
            button("2", StatKind::TwoPointMake, Tone::Make),
            button("1", StatKind::FreeThrowMake, Tone::Make),
        ],
    },
    ButtonGroup {
        title: Some("Missed"),
        columns: 3,
        buttons: &[
            button("3", StatKind::ThreePointMiss, Tone::Miss),
            button("2", StatKind::TwoPointMiss, Tone::Miss),
            button("1", StatKind::FreeThrowMiss, Tone::Miss),
        ],
    },
    ButtonGroup {
        title: Some("Actions"),
        columns: 3,
        buttons: &[
            button("REB", StatKind::Rebound, Tone::Neutral),
            button("STL", StatKind::Steal, Tone::Neutral),
            button("BLK", StatKind::Block, Tone::Neutral),
            button("AST", StatKind::Assist, Tone::Neutral),
            button("FOUL", StatKind::Foul, Tone::Foul),
            button("TO", StatKind::Turnover, Tone::Miss),
        ],
    },
];

const BASKETBALL_SECTIONS: [SectionLayout; 3] = [
    SectionLayout {
        title: "Makes",
        rows: &[
            row("3-Point Makes", StatKind::ThreePointMake, Tone::Make),
            row("2-Point Makes", StatKind::TwoPointMake, Tone::Make),
            row("Free Throws", StatKind::FreeThrowMake, Tone::Make),
        ],
    },
    SectionLayout {
        title: "Misses",
        rows: &[
            row("3-Point Miss", StatKind::ThreePointMiss, Tone::Miss),
            row("2-Point Miss", StatKind::TwoPointMiss, Tone::Miss),
            row("Free Throw Miss", StatKind::FreeThrowMiss, Tone::Miss),
        ],
    },
    SectionLayout {
        title: "Activities",
        rows: &[
            row("Rebounds", StatKind::Rebound, Tone::Neutral),
            row("Assists", StatKind::Assist, Tone::Neutral),
            row("Steals", StatKind::Steal, Tone::Neutral),
            row("Blocks", StatKind::Block, Tone::Neutral),
            row("Turnovers", StatKind::Turnover, Tone::Neutral),
            row("Fouls", StatKind::Foul, Tone::Neutral),
        ],
    },
];

impl SportPanel for BasketballPanel {
    fn sport(&self) -> Sport {
        Sport::Basketball
    }

    fn score_label(&self) -> &'static str {
        "SCORE"
    }

    fn button_groups(&self) -> &'static [ButtonGroup] {
        &BASKETBALL_GROUPS
    }

    fn summary_sections(&self) -> &'static [SectionLayout] {
        &BASKETBALL_SECTIONS
    }

    fn efficiency(&self, events: &[StatEvent]) -> Vec<EfficiencyLine> {
        let count = |kind| find_count(events, kind);
        let field_goal_makes = count(StatKind::ThreePointMake) + count(StatKind::TwoPointMake);
        let field_goal_misses = count(StatKind::ThreePointMiss) + count(StatKind::TwoPointMiss);
        vec![
            EfficiencyLine {
                label: "Field Goal %",
                percentage: shooting_percentage(field_goal_makes, field_goal_misses),
            },
            EfficiencyLine {
                label: "Free Throw %",
                percentage: shooting_percentage(
                    count(StatKind::FreeThrowMake),
                    count(StatKind::FreeThrowMiss),
                ),
            },
        ]
    }

    fn shows_timer(&self) -> bool {
        true
    }
}

const VOLLEYBALL_GROUPS: [ButtonGroup; 4] = [
    ButtonGroup {
        title: None,
        columns: 1,
        buttons: &[button("POINT", StatKind::Point, Tone::Feature)],
    },
    ButtonGroup {
        title: None,
        columns: 3,
        buttons: &[
            button("ACE", StatKind::Ace, Tone::Strong),
            button("KILL", StatKind::Kill, Tone::Strong),
            button("BLOCK", StatKind::Block, Tone::Strong),
        ],
    },
    ButtonGroup {
        title: None,
        columns: 2,
        buttons: &[
            button("GOOD SRV", StatKind::GoodServe, Tone::Neutral),
            button("BAD SRV", StatKind::BadServe, Tone::Miss),
            button("GOOD REC", StatKind::GoodReception, Tone::Neutral),
            button("BAD REC", StatKind::BadReception, Tone::Miss),
        ],
    },
    ButtonGroup {
        title: None,
        columns: 1,
        buttons: &[button("DIG", StatKind::Dig, Tone::Accent)],
    },
];

const VOLLEYBALL_SECTIONS: [SectionLayout; 2] = [
    SectionLayout {
        title: "Offense",
        rows: &[
            row("Aces", StatKind::Ace, Tone::Neutral),
            row("Kills", StatKind::Kill, Tone::Neutral),
            row("Good Serves", StatKind::GoodServe, Tone::Neutral),
            row("Bad Serves", StatKind::BadServe, Tone::Miss),
        ],
    },
    SectionLayout {
        title: "Defense",
        rows: &[
            row("Blocks", StatKind::Block, Tone::Neutral),
            row("Digs", StatKind::Dig, Tone::Neutral),
            row("Good Rec.", StatKind::GoodReception, Tone::Neutral),
            row("Bad Rec.", StatKind::BadReception, Tone::Miss),
        ],
    },
];

impl SportPanel for VolleyballPanel {
    fn sport(&self) -> Sport {
        Sport::Volleyball
    }

    fn score_label(&self) -> &'static str {
        "POINTS"
    }

    fn button_groups(&self) -> &'static [ButtonGroup] {
        &VOLLEYBALL_GROUPS
    }

    fn summary_sections(&self) -> &'static [SectionLayout] {
        &VOLLEYBALL_SECTIONS
    }
}
