//! Icon style variants.
//!
//! A style is a rendering variant of the icon family (filled, outlined, ...)
//! and affects only the CDN asset path segment.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Material icon style families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IconStyle {
    #[default]
    Filled,
    Outlined,
    Round,
    Sharp,
    TwoTone,
}

impl IconStyle {
    /// All styles, in display/cycle order.
    pub const ALL: [Self; 5] = [
        Self::Filled,
        Self::Outlined,
        Self::Round,
        Self::Sharp,
        Self::TwoTone,
    ];

    /// CDN path segment for this style.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Filled => "materialicons",
            Self::Outlined => "materialiconsoutlined",
            Self::Round => "materialiconsround",
            Self::Sharp => "materialiconssharp",
            Self::TwoTone => "materialiconstwotone",
        }
    }

    /// Human-readable label for headers and pickers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Filled => "Filled",
            Self::Outlined => "Outlined",
            Self::Round => "Round",
            Self::Sharp => "Sharp",
            Self::TwoTone => "Two Tone",
        }
    }

    /// Next style in cycle order (wraps).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous style in cycle order (wraps).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
