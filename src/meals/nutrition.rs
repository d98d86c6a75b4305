//! Keyword lookup of approximate macros for free-text food names.

use serde::{Deserialize, Serialize};

/// Per-serving macros for one table entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

const fn m(calories: f64, protein: f64, carbs: f64, fat: f64) -> Macros {
    Macros {
        calories,
        protein,
        carbs,
        fat,
    }
}

/// Scanned in order; the first key contained in an item wins.
pub const FOOD_TABLE: &[(&str, Macros)] = &[
    ("rice", m(130.0, 2.7, 28.0, 0.3)),
    ("dal", m(116.0, 9.0, 20.0, 0.4)),
    ("roti", m(71.0, 2.7, 14.0, 0.4)),
    ("chicken", m(165.0, 31.0, 0.0, 3.6)),
    ("burger", m(295.0, 17.0, 24.0, 14.0)),
    ("salad", m(65.0, 3.0, 8.0, 2.0)),
    ("chai", m(55.0, 1.5, 8.0, 1.5)),
    ("idli", m(39.0, 2.0, 8.0, 0.2)),
    ("dosa", m(133.0, 3.7, 25.0, 2.0)),
    ("poha", m(180.0, 3.0, 35.0, 3.0)),
    ("egg", m(78.0, 6.0, 0.6, 5.0)),
    ("banana", m(89.0, 1.1, 23.0, 0.3)),
    ("apple", m(52.0, 0.3, 14.0, 0.2)),
    ("milk", m(61.0, 3.2, 4.8, 3.3)),
    ("paneer", m(265.0, 18.0, 3.6, 20.0)),
];

/// Contribution of an item that matches no table key.
pub const UNKNOWN_FOOD: Macros = m(150.0, 5.0, 20.0, 5.0);

/// Rounded macro totals for a list of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

pub fn lookup(item: &str) -> Option<(&'static str, Macros)> {
    let key = item.trim().to_lowercase();
    FOOD_TABLE
        .iter()
        .find(|(name, _)| key.contains(name))
        .copied()
}

pub fn estimate_nutrition<S: AsRef<str>>(items: &[S]) -> NutritionTotals {
    let sum = items.iter().fold(m(0.0, 0.0, 0.0, 0.0), |acc, item| {
        let c = lookup(item.as_ref()).map_or(UNKNOWN_FOOD, |(_, macros)| macros);
        m(
            acc.calories + c.calories,
            acc.protein + c.protein,
            acc.carbs + c.carbs,
            acc.fat + c.fat,
        )
    });
    NutritionTotals {
        calories: sum.calories.round() as u32,
        protein: sum.protein.round() as u32,
        carbs: sum.carbs.round() as u32,
        fat: sum.fat.round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(estimate_nutrition::<&str>(&[]), NutritionTotals::default());
    }

    #[test]
    fn thali_uses_literal_table() {
        // "brown rice" contains the "rice" key
        let totals = estimate_nutrition(&["Dal Tadka", "Brown Rice", "Roti"]);
        assert_eq!(totals.calories, 116 + 130 + 71);
        // 9 + 2.7 + 2.7 = 14.4
        assert_eq!(totals.protein, 14);
        assert_eq!(totals.carbs, 62);
        // 0.4 + 0.3 + 0.4 = 1.1
        assert_eq!(totals.fat, 1);
    }

    #[test]
    fn unmatched_items_use_fallback() {
        let totals = estimate_nutrition(&["Marie Biscuits"]);
        assert_eq!(
            totals,
            NutritionTotals {
                calories: 150,
                protein: 5,
                carbs: 20,
                fat: 5
            }
        );
    }

    #[test]
    fn first_declared_key_wins() {
        // both "rice" and "chicken" match; "rice" is declared first
        assert_eq!(lookup("Chicken Fried Rice").map(|(k, _)| k), Some("rice"));
        assert_eq!(lookup("  EGG bhurji ").map(|(k, _)| k), Some("egg"));
        assert_eq!(lookup("Masala Chai").map(|(k, _)| k), Some("chai"));
    }

    #[test]
    fn duplicates_count_each_time_and_order_is_irrelevant() {
        let a = estimate_nutrition(&["Idli", "Idli", "Sambar"]);
        let b = estimate_nutrition(&["Sambar", "Idli", "Idli"]);
        assert_eq!(a, b);
        assert_eq!(a.calories, 39 + 39 + 150);
    }

    #[test]
    fn rounding_happens_once_on_the_sum() {
        // 0.3 * 5 = 1.5 rounds to 2; rounding per item would give 0
        let totals = estimate_nutrition(&["rice", "rice", "rice", "rice", "rice"]);
        assert_eq!(totals.fat, 2);
    }
}
