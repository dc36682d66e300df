//! The closed dish vocabulary.

use std::collections::HashSet;

use spiritfood_core::error::DomainError;

/// Ordered, non-empty set of dish names.
///
/// Declaration order breaks ties when picking the winning dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishVocabulary {
    dishes: Vec<String>,
}

impl DishVocabulary {
    /// Builds a vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the list is empty, contains a
    /// blank name, or repeats a name.
    pub fn new(dishes: Vec<String>) -> Result<Self, DomainError> {
        if dishes.is_empty() {
            return Err(DomainError::Configuration(
                "dish vocabulary is empty".to_owned(),
            ));
        }
        let mut seen = HashSet::with_capacity(dishes.len());
        for dish in &dishes {
            if dish.trim().is_empty() {
                return Err(DomainError::Configuration(
                    "dish vocabulary contains a blank name".to_owned(),
                ));
            }
            if !seen.insert(dish.as_str()) {
                return Err(DomainError::Configuration(format!(
                    "dish vocabulary repeats {dish:?}"
                )));
            }
        }
        Ok(Self { dishes })
    }

    /// Whether `dish` is part of the vocabulary.
    #[must_use]
    pub fn contains(&self, dish: &str) -> bool {
        self.dishes.iter().any(|d| d == dish)
    }

    /// Dish names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dishes.iter().map(String::as_str)
    }

    /// Number of dishes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    /// Always false: construction rejects empty vocabularies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_new_keeps_declaration_order() {
        let vocabulary = DishVocabulary::new(names(&["Pho", "Ramen", "Burger"])).unwrap();

        assert_eq!(vocabulary.iter().collect::<Vec<_>>(), ["Pho", "Ramen", "Burger"]);
        assert!(vocabulary.contains("Ramen"));
        assert!(!vocabulary.contains("Salad"));
    }

    #[test]
    fn test_new_rejects_empty_blank_and_duplicates() {
        assert!(matches!(
            DishVocabulary::new(Vec::new()),
            Err(DomainError::Configuration(_))
        ));
        assert!(matches!(
            DishVocabulary::new(names(&["Pho", " "])),
            Err(DomainError::Configuration(_))
        ));
        assert!(matches!(
            DishVocabulary::new(names(&["Pho", "Pho"])),
            Err(DomainError::Configuration(_))
        ));
    }
}
