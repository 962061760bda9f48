use serde::{Deserialize, Serialize};

/// Top-level page the router shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Setup,
    Game,
}

/// Vibration pattern requested after an action, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Record,
    Adjust,
    Undo,
    Navigate,
    Timer,
}

impl Haptic {
    pub fn pattern(self) -> &'static [u32] {
        match self {
            Haptic::Record => &[50],
            Haptic::Adjust => &[30],
            Haptic::Undo => &[30, 30],
            Haptic::Navigate => &[30],
            Haptic::Timer => &[40],
        }
    }

    /// Pattern formatted for a `data-vibrate` attribute.
    pub fn attribute(self) -> String {
        self.pattern()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Where a page form sends the user after it is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnTo {
    #[default]
    Game,
    Summary,
}

impl ReturnTo {
    pub fn location(self, base_path: &str) -> String {
        match self {
            ReturnTo::Game => format!("{base_path}/"),
            ReturnTo::Summary => format!("{base_path}/?summary=true"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haptic_attribute_joins_pattern() {
        assert_eq!(Haptic::Undo.attribute(), "30,30");
        assert_eq!(Haptic::Record.attribute(), "50");
    }

    #[test]
    fn return_locations_include_base_path() {
        assert_eq!(ReturnTo::Game.location(""), "/");
        assert_eq!(ReturnTo::Summary.location("/Courtside"), "/Courtside/?summary=true");
    }
}
