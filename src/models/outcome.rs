use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::ui::theme;

/// Classification of a result record's `result` field. The service stores
/// free-form strings; matching is case-insensitive and anything
/// unrecognized lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Other,
    Pass,
    Fail,
    Skip,
}

impl Outcome {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "pass" => Outcome::Pass,
            "fail" => Outcome::Fail,
            "skip" => Outcome::Skip,
            _ => Outcome::Other,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Outcome::Pass => "✔",
            Outcome::Fail => "✘",
            Outcome::Skip => "⊘",
            Outcome::Other => "◌",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Outcome::Pass => theme::GREEN,
            Outcome::Fail => theme::RED,
            Outcome::Skip => theme::TEAL,
            Outcome::Other => theme::OVERLAY0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "passed",
            Outcome::Fail => "failed",
            Outcome::Skip => "skipped",
            Outcome::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Outcome::parse("Pass"), Outcome::Pass);
        assert_eq!(Outcome::parse("FAIL"), Outcome::Fail);
        assert_eq!(Outcome::parse("SKIP"), Outcome::Skip);
        assert_eq!(Outcome::parse("skip"), Outcome::Skip);
    }

    #[test]
    fn unknown_values_are_other() {
        assert_eq!(Outcome::parse("x"), Outcome::Other);
        assert_eq!(Outcome::parse(""), Outcome::Other);
        assert_eq!(Outcome::parse("passed"), Outcome::Other);
    }
}
