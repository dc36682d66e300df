//! Reduces a score state to the final quiz result.

use serde::Serialize;
use spiritfood_core::dimension::{AdventureAxis, Axis, TimeAxis};
use tracing::debug;

use super::personality::Personality;
use super::score_state::{AxisTally, ScoreState};
use super::tables::ResultTables;

/// Percent reported for every axis value when no axis credit was earned.
pub const ZERO_TOTAL_PERCENT: u32 = 33;

/// Winning value of one axis and its share of that axis's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisAlignment<A: Axis + Serialize> {
    pub axis: A,
    pub percent: u32,
}

/// The composite result of a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub dish: String,
    pub cuisine: String,
    pub adjective: String,
    pub title: String,
    pub time_axis: AxisAlignment<TimeAxis>,
    pub adventure_axis: AxisAlignment<AdventureAxis>,
    pub personality: Personality,
    /// Snapshot of the accumulators the result was computed from.
    pub raw_scores: ScoreState,
}

/// Rounded share of `value` in `total`, half rounding up.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn percent(value: u32, total: u32) -> u32 {
    if total == 0 {
        return ZERO_TOTAL_PERCENT;
    }
    (f64::from(value) / f64::from(total) * 100.0).round() as u32
}

/// First entry with the strictly greatest value, so ties go to the earliest.
fn first_max<T: Copy>(mut entries: impl Iterator<Item = (T, u32)>) -> Option<(T, u32)> {
    let first = entries.next()?;
    Some(entries.fold(first, |best, entry| if entry.1 > best.1 { entry } else { best }))
}

/// Picks the value with the highest rounded percent. Counts that round to
/// the same percent tie, and the earliest declared value wins.
fn align<A: Axis + Serialize>(tally: &AxisTally<A>) -> AxisAlignment<A> {
    let total = tally.total();
    let shares = tally
        .entries()
        .map(|(axis, count)| (axis, percent(count, total)));
    let (axis, share) = first_max(shares).unwrap_or((A::ALL[0], ZERO_TOTAL_PERCENT));
    AxisAlignment {
        axis,
        percent: share,
    }
}

/// Computes the result for `state`.
///
/// Pure: the same state and tables always give the same result, and the
/// state is not modified.
#[must_use]
pub fn reduce(state: &ScoreState, tables: &ResultTables) -> QuizResult {
    let dish = first_max(state.dish_counts().iter().map(|d| (d.dish.as_str(), d.count)))
        .map_or_else(|| tables.default_dish().to_owned(), |(dish, _)| dish.to_owned());

    let time_axis = align(state.time_axis());
    let adventure_axis = align(state.adventure_axis());

    let cuisine = tables.cuisine(&dish).to_owned();
    let adjective = tables.adjective(adventure_axis.axis, time_axis.axis).to_owned();
    let title = format!("{adjective} {cuisine} {dish}");
    debug!(%title, "reduced score state");

    QuizResult {
        personality: tables.personality(&dish).clone(),
        dish,
        cuisine,
        adjective,
        title,
        time_axis,
        adventure_axis,
        raw_scores: state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use spiritfood_core::dimension::Contribution;

    use super::super::score_state::tests::{contribution, vocabulary};
    use super::super::tables::tests::tables;
    use super::super::tables::{FALLBACK_ADJECTIVE, FALLBACK_CUISINE};
    use super::*;

    #[test]
    fn test_reduce_zero_state_picks_first_declared_everything() {
        // Arrange
        let state = ScoreState::new(&vocabulary());

        // Act
        let result = reduce(&state, &tables());

        // Assert
        assert_eq!(result.dish, "Pho");
        assert_eq!(result.time_axis.axis, TimeAxis::EarlyBird);
        assert_eq!(result.time_axis.percent, 33);
        assert_eq!(result.adventure_axis.axis, AdventureAxis::Comfort);
        assert_eq!(result.adventure_axis.percent, 33);
        assert_eq!(result.title, "Wholesome Vietnamese Pho");
    }

    #[test]
    fn test_reduce_breaks_dish_ties_by_declaration_order() {
        let mut state = ScoreState::new(&vocabulary());
        state.apply(&contribution(&["Burger", "Ramen"]));

        let result = reduce(&state, &tables());

        assert_eq!(result.dish, "Ramen");
        assert_eq!(result.cuisine, "Japanese");
    }

    #[test]
    fn test_reduce_breaks_axis_ties_by_declaration_order() {
        // Arrange
        let mut state = ScoreState::new(&vocabulary());
        for time in [TimeAxis::LateNight, TimeAxis::AllDay] {
            state.apply(&Contribution {
                time: Some(time),
                ..Contribution::default()
            });
        }

        // Act
        let result = reduce(&state, &tables());

        // Assert
        assert_eq!(result.time_axis.axis, TimeAxis::AllDay);
        assert_eq!(result.time_axis.percent, 50);
    }

    #[test]
    fn test_time_axis_counts_rounding_to_same_percent_go_to_first_declared() {
        // Arrange
        let mut state = ScoreState::new(&vocabulary());
        for (time, multiplier) in [
            (TimeAxis::EarlyBird, 333),
            (TimeAxis::AllDay, 334),
            (TimeAxis::LateNight, 333),
        ] {
            state.apply(&Contribution {
                time: Some(time),
                multiplier,
                ..Contribution::default()
            });
        }

        // Act
        let result = reduce(&state, &tables());

        // Assert
        assert_eq!(state.time_axis().get(TimeAxis::AllDay), 334);
        assert_eq!(result.time_axis.axis, TimeAxis::EarlyBird);
        assert_eq!(result.time_axis.percent, 33);
    }

    #[test]
    fn test_adventure_axis_counts_rounding_to_same_percent_go_to_first_declared() {
        // Arrange
        let mut state = ScoreState::new(&vocabulary());
        for (adventure, multiplier) in [
            (AdventureAxis::Comfort, 333),
            (AdventureAxis::Balanced, 333),
            (AdventureAxis::Adventurer, 334),
        ] {
            state.apply(&Contribution {
                adventure: Some(adventure),
                time: Some(TimeAxis::EarlyBird),
                multiplier,
                ..Contribution::default()
            });
        }

        // Act
        let result = reduce(&state, &tables());

        // Assert
        assert_eq!(result.adventure_axis.axis, AdventureAxis::Comfort);
        assert_eq!(result.adventure_axis.percent, 33);
        assert_eq!(result.adjective, "Wholesome");
    }

    #[test]
    fn test_reduce_uses_fallbacks_for_missing_entries() {
        // Arrange
        let mut state = ScoreState::new(&vocabulary());
        state.apply(&Contribution {
            time: Some(TimeAxis::AllDay),
            adventure: Some(AdventureAxis::Balanced),
            ..contribution(&["Taco"])
        });

        // Act
        let result = reduce(&state, &tables());

        // Assert
        assert_eq!(result.dish, "Taco");
        assert_eq!(result.cuisine, FALLBACK_CUISINE);
        assert_eq!(result.adjective, FALLBACK_ADJECTIVE);
        assert_eq!(result.title, "Mysterious Fusion Taco");
        assert_eq!(result.personality.archetype, "The Reliable Classic");
        assert_eq!(result.time_axis.percent, 100);
    }

    #[test]
    fn test_reduce_is_idempotent_and_leaves_state_untouched() {
        let mut state = ScoreState::new(&vocabulary());
        state.apply(&Contribution {
            multiplier: 2,
            time: Some(TimeAxis::LateNight),
            adventure: Some(AdventureAxis::Adventurer),
            ..contribution(&["Pho"])
        });
        let before = state.clone();
        let tables = tables();

        let first = reduce(&state, &tables);
        let second = reduce(&state, &tables);

        assert_eq!(first, second);
        assert_eq!(state, before);
        assert_eq!(first.title, "Unhinged Vietnamese Pho");
    }

    #[test]
    fn test_raw_scores_is_an_independent_snapshot() {
        let mut state = ScoreState::new(&vocabulary());
        state.apply(&contribution(&["Pho"]));
        let result = reduce(&state, &tables());

        state.apply(&contribution(&["Pho"]));

        assert_eq!(result.raw_scores.dish_count("Pho"), Some(1));
        assert_eq!(state.dish_count("Pho"), Some(2));
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(9, 10), 90);
        assert_eq!(percent(0, 0), ZERO_TOTAL_PERCENT);
    }

    #[test]
    fn test_result_serializes_axis_labels() {
        let state = ScoreState::new(&vocabulary());

        let json = serde_json::to_value(reduce(&state, &tables())).unwrap();

        assert_eq!(json["time_axis"]["axis"], "Early Bird");
        assert_eq!(json["adventure_axis"]["percent"], 33);
        assert_eq!(json["personality"]["emoji"], "🍜");
    }
}
