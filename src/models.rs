use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Basketball,
    Volleyball,
}

const BASKETBALL_STATS: [StatKind; 12] = [
    StatKind::ThreePointMake,
    StatKind::TwoPointMake,
    StatKind::FreeThrowMake,
    StatKind::ThreePointMiss,
    StatKind::TwoPointMiss,
    StatKind::FreeThrowMiss,
    StatKind::Rebound,
    StatKind::Steal,
    StatKind::Block,
    StatKind::Assist,
    StatKind::Foul,
    StatKind::Turnover,
];

const VOLLEYBALL_STATS: [StatKind; 9] = [
    StatKind::Point,
    StatKind::Ace,
    StatKind::Kill,
    StatKind::Block,
    StatKind::GoodServe,
    StatKind::BadServe,
    StatKind::GoodReception,
    StatKind::BadReception,
    StatKind::Dig,
];

impl Sport {
    pub const ALL: [Sport; 2] = [Sport::Basketball, Sport::Volleyball];

    pub fn name(self) -> &'static str {
        match self {
            Sport::Basketball => "Basketball",
            Sport::Volleyball => "Volleyball",
        }
    }

    /// Stat codes a session of this sport may record.
    pub fn vocabulary(self) -> &'static [StatKind] {
        match self {
            Sport::Basketball => &BASKETBALL_STATS,
            Sport::Volleyball => &VOLLEYBALL_STATS,
        }
    }

    pub fn accepts(self, kind: StatKind) -> bool {
        self.vocabulary().contains(&kind)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sport {
    type Err = StatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Sport::ALL
            .into_iter()
            .find(|sport| sport.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| StatError::UnknownSport(value.to_string()))
    }
}

/// Stat codes recorded by the panels. The serialized form is the code string
/// stored in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "3PT_MAKE")]
    ThreePointMake,
    #[serde(rename = "2PT_MAKE")]
    TwoPointMake,
    #[serde(rename = "FT_MAKE")]
    FreeThrowMake,
    #[serde(rename = "3PT_MISS")]
    ThreePointMiss,
    #[serde(rename = "2PT_MISS")]
    TwoPointMiss,
    #[serde(rename = "FT_MISS")]
    FreeThrowMiss,
    #[serde(rename = "REBOUND")]
    Rebound,
    #[serde(rename = "STEAL")]
    Steal,
    #[serde(rename = "BLOCK")]
    Block,
    #[serde(rename = "ASSIST")]
    Assist,
    #[serde(rename = "FOUL")]
    Foul,
    #[serde(rename = "TURNOVER")]
    Turnover,
    #[serde(rename = "POINT")]
    Point,
    #[serde(rename = "ACE")]
    Ace,
    #[serde(rename = "KILL")]
    Kill,
    #[serde(rename = "GOOD_SRV")]
    GoodServe,
    #[serde(rename = "BAD_SRV")]
    BadServe,
    #[serde(rename = "GOOD_REC")]
    GoodReception,
    #[serde(rename = "BAD_REC")]
    BadReception,
    #[serde(rename = "DIG")]
    Dig,
}

impl StatKind {
    pub const ALL: [StatKind; 20] = [
        StatKind::ThreePointMake,
        StatKind::TwoPointMake,
        StatKind::FreeThrowMake,
        StatKind::ThreePointMiss,
        StatKind::TwoPointMiss,
        StatKind::FreeThrowMiss,
        StatKind::Rebound,
        StatKind::Steal,
        StatKind::Block,
        StatKind::Assist,
        StatKind::Foul,
        StatKind::Turnover,
        StatKind::Point,
        StatKind::Ace,
        StatKind::Kill,
        StatKind::GoodServe,
        StatKind::BadServe,
        StatKind::GoodReception,
        StatKind::BadReception,
        StatKind::Dig,
    ];

    pub fn code(self) -> &'static str {
        match self {
            StatKind::ThreePointMake => "3PT_MAKE",
            StatKind::TwoPointMake => "2PT_MAKE",
            StatKind::FreeThrowMake => "FT_MAKE",
            StatKind::ThreePointMiss => "3PT_MISS",
            StatKind::TwoPointMiss => "2PT_MISS",
            StatKind::FreeThrowMiss => "FT_MISS",
            StatKind::Rebound => "REBOUND",
            StatKind::Steal => "STEAL",
            StatKind::Block => "BLOCK",
            StatKind::Assist => "ASSIST",
            StatKind::Foul => "FOUL",
            StatKind::Turnover => "TURNOVER",
            StatKind::Point => "POINT",
            StatKind::Ace => "ACE",
            StatKind::Kill => "KILL",
            StatKind::GoodServe => "GOOD_SRV",
            StatKind::BadServe => "BAD_SRV",
            StatKind::GoodReception => "GOOD_REC",
            StatKind::BadReception => "BAD_REC",
            StatKind::Dig => "DIG",
        }
    }

    /// Point value a button of this kind records by default.
    pub fn points(self) -> Option<u32> {
        match self {
            StatKind::ThreePointMake => Some(3),
            StatKind::TwoPointMake => Some(2),
            StatKind::FreeThrowMake => Some(1),
            _ => None,
        }
    }

    pub fn is_make(self) -> bool {
        matches!(
            self,
            StatKind::ThreePointMake | StatKind::TwoPointMake | StatKind::FreeThrowMake
        )
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StatKind {
    type Err = StatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.code() == value)
            .ok_or_else(|| StatError::UnknownKind(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    UnknownKind(String),
    UnknownSport(String),
    NotInVocabulary { kind: StatKind, sport: Sport },
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatError::UnknownKind(code) => write!(f, "unknown stat type '{code}'"),
            StatError::UnknownSport(name) => write!(f, "unknown sport '{name}'"),
            StatError::NotInVocabulary { kind, sport } => {
                write!(f, "stat type '{kind}' is not tracked for {sport}")
            }
        }
    }
}

impl std::error::Error for StatError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub sport: Sport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEvent {
    pub id: String,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: StatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    #[serde(default)]
    pub team: Team,
}

/// An event as requested by a panel, before the log assigns identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEvent {
    pub kind: StatKind,
    pub value: Option<u32>,
}

impl NewEvent {
    pub fn new(kind: StatKind) -> Self {
        Self {
            kind,
            value: kind.points(),
        }
    }

    pub fn with_value(kind: StatKind, value: Option<u32>) -> Self {
        Self {
            kind,
            value: value.or_else(|| kind.points()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub metadata: GameMetadata,
    pub events: Vec<StatEvent>,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub sport: String,
}

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub delta: i32,
    pub value: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub confirmed: bool,
}
