//! Lookup tables consulted when reducing scores to a result.

use std::collections::HashMap;

use spiritfood_core::dimension::{AdventureAxis, Axis, TimeAxis};
use spiritfood_core::error::DomainError;

use super::personality::Personality;
use super::vocabulary::DishVocabulary;

/// Cuisine used when a dish has no cuisine entry.
pub const FALLBACK_CUISINE: &str = "Fusion";

/// Adjective used when an axis combination has no entry.
pub const FALLBACK_ADJECTIVE: &str = "Mysterious";

/// Splits an `"{adventure}_{time}"` key into its two axis values.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the key has no separator or
/// either half is not an axis label.
pub fn parse_adjective_key(key: &str) -> Result<(AdventureAxis, TimeAxis), DomainError> {
    let (adventure, time) = key.split_once('_').ok_or_else(|| {
        DomainError::Configuration(format!("adjective key {key:?} is not \"Adventure_Time\""))
    })?;
    Ok((adventure.parse()?, time.parse()?))
}

/// Cuisine, adjective and personality tables plus the default dish whose
/// personality stands in for dishes without one.
#[derive(Debug, Clone)]
pub struct ResultTables {
    cuisines: HashMap<String, String>,
    adjectives: HashMap<(AdventureAxis, TimeAxis), String>,
    personalities: HashMap<String, Personality>,
    default_dish: String,
    default_personality: Personality,
}

impl ResultTables {
    /// Builds the tables.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `default_dish` has no
    /// personality entry.
    pub fn new(
        cuisines: HashMap<String, String>,
        adjectives: HashMap<(AdventureAxis, TimeAxis), String>,
        personalities: HashMap<String, Personality>,
        default_dish: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let default_dish = default_dish.into();
        let default_personality = personalities.get(&default_dish).cloned().ok_or_else(|| {
            DomainError::Configuration(format!("default dish {default_dish:?} has no personality"))
        })?;
        Ok(Self {
            cuisines,
            adjectives,
            personalities,
            default_dish,
            default_personality,
        })
    }

    /// Cuisine of `dish`, or [`FALLBACK_CUISINE`].
    #[must_use]
    pub fn cuisine(&self, dish: &str) -> &str {
        self.cuisines.get(dish).map_or(FALLBACK_CUISINE, String::as_str)
    }

    /// Adjective for an axis pair, or [`FALLBACK_ADJECTIVE`].
    #[must_use]
    pub fn adjective(&self, adventure: AdventureAxis, time: TimeAxis) -> &str {
        self.adjectives
            .get(&(adventure, time))
            .map_or(FALLBACK_ADJECTIVE, String::as_str)
    }

    /// Personality of `dish`, falling back to the default dish's.
    #[must_use]
    pub fn personality(&self, dish: &str) -> &Personality {
        self.personalities
            .get(dish)
            .unwrap_or(&self.default_personality)
    }

    /// The dish whose personality is used as a fallback.
    #[must_use]
    pub fn default_dish(&self) -> &str {
        &self.default_dish
    }

    /// Axis pairs with no adjective entry, in declaration order.
    #[must_use]
    pub fn missing_adjectives(&self) -> Vec<(AdventureAxis, TimeAxis)> {
        AdventureAxis::ALL
            .into_iter()
            .flat_map(|a| TimeAxis::ALL.into_iter().map(move |t| (a, t)))
            .filter(|pair| !self.adjectives.contains_key(pair))
            .collect()
    }

    /// Vocabulary dishes with no cuisine entry.
    #[must_use]
    pub fn dishes_without_cuisine<'v>(&self, vocabulary: &'v DishVocabulary) -> Vec<&'v str> {
        vocabulary
            .iter()
            .filter(|dish| !self.cuisines.contains_key(*dish))
            .collect()
    }
}
