// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed theme taxonomy. Serialized as its display label ("Helicopter Tours", ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Theme {
    Pilgrimage,
    Heritage,
    Wellness,
    Wildlife,
    Romantic,
    Beach,
    Adventure,
    Spiritual,
    #[serde(rename = "Helicopter Tours")]
    HelicopterTours,
    #[serde(rename = "Group Tours")]
    GroupTours,
    International,
    #[default]
    General,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown theme label: {0:?}")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Every label, in classifier priority order. `General` is always last.
    pub const ALL: [Theme; 12] = [
        Theme::Pilgrimage,
        Theme::Heritage,
        Theme::Wellness,
        Theme::Wildlife,
        Theme::Romantic,
        Theme::Beach,
        Theme::Adventure,
        Theme::Spiritual,
        Theme::HelicopterTours,
        Theme::GroupTours,
        Theme::International,
        Theme::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Pilgrimage => "Pilgrimage",
            Theme::Heritage => "Heritage",
            Theme::Wellness => "Wellness",
            Theme::Wildlife => "Wildlife",
            Theme::Romantic => "Romantic",
            Theme::Beach => "Beach",
            Theme::Adventure => "Adventure",
            Theme::Spiritual => "Spiritual",
            Theme::HelicopterTours => "Helicopter Tours",
            Theme::GroupTours => "Group Tours",
            Theme::International => "International",
            Theme::General => "General",
        }
    }

    /// Lenient label lookup used for scraper-supplied themes.
    /// Ignores case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Theme> {
        let wanted = label.trim();
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::from_label(s).ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
