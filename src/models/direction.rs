use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// Exact lowercase match, same values the serde representation accepts.
    pub fn parse(s: &str) -> Option<Direction> {
        match s {
            "long" => Some(Direction::Long),
            "short" => Some(Direction::Short),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Breakeven => "breakeven",
        }
    }

    pub fn parse(s: &str) -> Option<Outcome> {
        match s {
            "win" => Some(Outcome::Win),
            "loss" => Some(Outcome::Loss),
            "breakeven" => Some(Outcome::Breakeven),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parse_and_display_agree() {
        for d in [Direction::Long, Direction::Short] {
            assert_eq!(Direction::parse(&d.to_string()), Some(d));
        }
        assert_eq!(Direction::parse("LONG"), None);
        assert_eq!(Direction::parse("buy"), None);
    }

    #[test]
    fn outcome_serde_is_lowercase() {
        let json = serde_json::to_string(&Outcome::Breakeven).unwrap();
        assert_eq!(json, "\"breakeven\"");
        let back: Outcome = serde_json::from_str("\"loss\"").unwrap();
        assert_eq!(back, Outcome::Loss);
        assert!(serde_json::from_str::<Outcome>("\"Win\"").is_err());
    }
}
