//! Per-attempt score accumulators and the apply-choice operation.

use std::marker::PhantomData;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use spiritfood_core::dimension::{AdventureAxis, Axis, Contribution, TimeAxis};

use super::vocabulary::DishVocabulary;

/// Running count for one dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishCount {
    /// Dish name from the vocabulary.
    pub dish: String,
    /// Accumulated weight.
    pub count: u32,
}

/// Running counts for the three values of one axis, indexed by declaration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTally<A: Axis> {
    counts: [u32; 3],
    axis: PhantomData<A>,
}

impl<A: Axis> Default for AxisTally<A> {
    fn default() -> Self {
        Self {
            counts: [0; 3],
            axis: PhantomData,
        }
    }
}

impl<A: Axis> AxisTally<A> {
    /// Count for one axis value.
    #[must_use]
    pub fn get(&self, axis: A) -> u32 {
        self.counts[axis.index()]
    }

    /// Sum of all three counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0, |acc, c| acc.saturating_add(*c))
    }

    /// `(value, count)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (A, u32)> + '_ {
        A::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }

    fn add(&mut self, axis: A, amount: u32) {
        let slot = &mut self.counts[axis.index()];
        *slot = slot.saturating_add(amount);
    }
}

impl<A: Axis> Serialize for AxisTally<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for (axis, count) in self.entries() {
            map.serialize_entry(axis.label(), &count)?;
        }
        map.end()
    }
}

fn serialize_dish_counts<S: Serializer>(dishes: &[DishCount], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(dishes.len()))?;
    for entry in dishes {
        map.serialize_entry(&entry.dish, &entry.count)?;
    }
    map.end()
}

/// The three accumulator maps of one quiz attempt.
///
/// Owned by exactly one attempt; cloning produces an independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    #[serde(serialize_with = "serialize_dish_counts")]
    dishes: Vec<DishCount>,
    time_axis: AxisTally<TimeAxis>,
    adventure_axis: AxisTally<AdventureAxis>,
}

impl ScoreState {
    /// All-zero accumulators over `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: &DishVocabulary) -> Self {
        Self {
            dishes: vocabulary
                .iter()
                .map(|dish| DishCount {
                    dish: dish.to_owned(),
                    count: 0,
                })
                .collect(),
            time_axis: AxisTally::default(),
            adventure_axis: AxisTally::default(),
        }
    }

    /// Zeroes every accumulator, keeping the vocabulary.
    pub fn reset(&mut self) {
        for entry in &mut self.dishes {
            entry.count = 0;
        }
        self.time_axis = AxisTally::default();
        self.adventure_axis = AxisTally::default();
    }

    /// Adds one choice's contribution.
    ///
    /// Every dish tag in the vocabulary gains the multiplier; unknown tags
    /// are skipped. A present axis label gains the multiplier, plus a flat 1
    /// when its bonus flag is set. A multiplier of 0 counts as 1.
    pub fn apply(&mut self, contribution: &Contribution) {
        let multiplier = contribution.multiplier.max(1);

        for tag in &contribution.dishes {
            if let Some(entry) = self.dishes.iter_mut().find(|d| d.dish == *tag) {
                entry.count = entry.count.saturating_add(multiplier);
            }
        }

        if let Some(time) = contribution.time {
            self.time_axis.add(time, multiplier);
            if contribution.time_bonus {
                self.time_axis.add(time, 1);
            }
        }

        if let Some(adventure) = contribution.adventure {
            self.adventure_axis.add(adventure, multiplier);
            if contribution.adventure_bonus {
                self.adventure_axis.add(adventure, 1);
            }
        }
    }

    /// Dish counts in vocabulary order.
    #[must_use]
    pub fn dish_counts(&self) -> &[DishCount] {
        &self.dishes
    }

    /// Count for one dish, `None` if it is outside the vocabulary.
    #[must_use]
    pub fn dish_count(&self, dish: &str) -> Option<u32> {
        self.dishes.iter().find(|d| d.dish == dish).map(|d| d.count)
    }

    /// Time-axis accumulators.
    #[must_use]
    pub fn time_axis(&self) -> &AxisTally<TimeAxis> {
        &self.time_axis
    }

    /// Adventure-axis accumulators.
    #[must_use]
    pub fn adventure_axis(&self) -> &AxisTally<AdventureAxis> {
        &self.adventure_axis
    }
}
