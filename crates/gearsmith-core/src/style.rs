//! Combat disciplines and melee sub-styles
//!
//! Both enums are closed but carry an explicit `Unsupported` variant. Unknown
//! names from callers parse into it instead of failing, and every scoring and
//! damage function treats it as "contributes nothing".

use std::fmt;

use serde::{Deserialize, Serialize};

/// The primary combat style a loadout is optimized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Discipline {
    Melee,
    Ranged,
    Magic,
    Prayer,
    /// Any name that is not one of the four disciplines
    Unsupported,
}

impl Discipline {
    /// The four recognized disciplines
    pub fn all() -> &'static [Discipline] {
        &[Self::Melee, Self::Ranged, Self::Magic, Self::Prayer]
    }

    /// Parse a discipline name. Never fails; unknown names map to `Unsupported`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "melee" => Self::Melee,
            "ranged" | "range" => Self::Ranged,
            "magic" | "mage" => Self::Magic,
            "prayer" => Self::Prayer,
            _ => Self::Unsupported,
        }
    }

    /// Lowercase display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Magic => "magic",
            Self::Prayer => "prayer",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }
}

impl From<&str> for Discipline {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for Discipline {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Melee attack style. Ignored by every discipline other than melee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SubStyle {
    Stab,
    Slash,
    Crush,
    /// No style chosen: the best of the three melee attack bonuses is used
    #[default]
    Unspecified,
    /// A style name that is not stab, slash or crush
    Unsupported,
}

impl SubStyle {
    /// The three concrete melee styles
    pub fn all() -> &'static [SubStyle] {
        &[Self::Stab, Self::Slash, Self::Crush]
    }

    /// Parse a sub-style name. Empty and "any" mean unspecified.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "stab" => Self::Stab,
            "slash" => Self::Slash,
            "crush" => Self::Crush,
            "" | "any" | "none" | "unspecified" => Self::Unspecified,
            _ => Self::Unsupported,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Stab => "stab",
            Self::Slash => "slash",
            Self::Crush => "crush",
            Self::Unspecified => "unspecified",
            Self::Unsupported => "unsupported",
        }
    }
}

impl From<&str> for SubStyle {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for SubStyle {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl fmt::Display for SubStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
