//! Scoring dimensions shared by the scene graph and the scoring engine.
//!
//! A choice feeds three independent dimensions: the dish vocabulary (open
//! strings, checked against the configured vocabulary at scoring time) and
//! two closed three-valued axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A closed, three-valued scoring axis with a fixed declaration order.
///
/// Declaration order is significant: it breaks ties during reduction.
pub trait Axis: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every value, in declaration order.
    const ALL: [Self; 3];

    /// Human label, also the serialized form.
    fn label(self) -> &'static str;

    /// Position in [`Axis::ALL`].
    fn index(self) -> usize;
}

/// When the player feels most themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeAxis {
    /// Mornings.
    #[serde(rename = "Early Bird")]
    EarlyBird,
    /// Any time of day.
    #[serde(rename = "All Day")]
    AllDay,
    /// After dark.
    #[serde(rename = "Late Night")]
    LateNight,
}

impl Axis for TimeAxis {
    const ALL: [Self; 3] = [Self::EarlyBird, Self::AllDay, Self::LateNight];

    fn label(self) -> &'static str {
        match self {
            Self::EarlyBird => "Early Bird",
            Self::AllDay => "All Day",
            Self::LateNight => "Late Night",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// How far from the familiar the player likes to stray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdventureAxis {
    /// Familiar food.
    Comfort,
    /// Somewhere in between.
    Balanced,
    /// Bold food.
    Adventurer,
}

impl Axis for AdventureAxis {
    const ALL: [Self; 3] = [Self::Comfort, Self::Balanced, Self::Adventurer];

    fn label(self) -> &'static str {
        match self {
            Self::Comfort => "Comfort",
            Self::Balanced => "Balanced",
            Self::Adventurer => "Adventurer",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

fn parse_axis<A: Axis>(s: &str, dimension: &str) -> Result<A, DomainError> {
    A::ALL
        .into_iter()
        .find(|axis| axis.label() == s)
        .ok_or_else(|| DomainError::Configuration(format!("unknown {dimension} label: {s:?}")))
}

impl FromStr for TimeAxis {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_axis(s, "time axis")
    }
}

impl FromStr for AdventureAxis {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_axis(s, "adventure axis")
    }
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for AdventureAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_multiplier() -> u32 {
    1
}

/// What one choice adds to the scoring dimensions.
///
/// `time: None` and `adventure: None` mean "no contribution"; in
/// configuration an explicit `null` and an omitted key are equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Dish tags. Tags outside the vocabulary are ignored when scoring.
    #[serde(default)]
    pub dishes: Vec<String>,
    /// Time-axis label to credit.
    #[serde(default)]
    pub time: Option<TimeAxis>,
    /// Adventure-axis label to credit.
    #[serde(default)]
    pub adventure: Option<AdventureAxis>,
    /// Scales every dish and axis credit.
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    /// Adds a flat +1 to the time-axis credit, independent of the multiplier.
    #[serde(default)]
    pub time_bonus: bool,
    /// Adds a flat +1 to the adventure-axis credit, independent of the multiplier.
    #[serde(default)]
    pub adventure_bonus: bool,
}

impl Default for Contribution {
    fn default() -> Self {
        Self {
            dishes: Vec::new(),
            time: None,
            adventure: None,
            multiplier: default_multiplier(),
            time_bonus: false,
            adventure_bonus: false,
        }
    }
}
