//! Meal and ingredient entities
//!
//! Normalized relational entities produced by the transformer. Optional
//! fields are genuinely nullable in the store; `None` means the source had
//! no value after cleaning, which is distinct from an empty string.

use crate::domain::ids::MealId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A normalized meal record keyed by the external catalog id
///
/// Created or overwritten by an upsert during any pipeline run; never
/// deleted by the pipeline itself. `created_at`/`updated_at` are managed by
/// the store and are not part of this entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// External catalog id (primary key)
    pub id: MealId,

    /// Meal name
    pub meal_name: Option<String>,

    /// Category name (denormalized from the source record)
    pub category: Option<String>,

    /// Area / cuisine name
    pub area: Option<String>,

    /// Free-text cooking instructions
    pub instructions: Option<String>,

    /// Thumbnail URL
    pub meal_thumb: Option<String>,

    /// Comma-separated tag list as supplied by the source
    pub tags: Option<String>,

    /// Video URL
    pub youtube: Option<String>,

    /// Original recipe source URL
    pub source: Option<String>,

    /// Image attribution URL
    pub image_source: Option<String>,

    /// License-confirmation flag, stored verbatim ("Yes"/"No")
    pub creative_commons_confirmed: Option<String>,

    /// Last-modified timestamp reported by the source; `None` when absent
    /// or unparseable
    pub date_modified: Option<NaiveDateTime>,
}

/// An ingredient line belonging to exactly one meal
///
/// The full ingredient set for a meal is replaced wholesale whenever the
/// meal is reloaded; rows are never updated individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Owning meal id
    pub meal_id: MealId,

    /// Cleaned ingredient name, never blank
    pub ingredient_name: String,

    /// Cleaned measurement text, absent when the source position was blank
    pub measurement: Option<String>,

    /// 1-based source position, in [1, 20]; gaps are preserved
    pub ingredient_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ingredient_order_bounds() {
        let ing = Ingredient {
            meal_id: MealId::from_str("52772").unwrap(),
            ingredient_name: "soy sauce".to_string(),
            measurement: Some("3/4 cup".to_string()),
            ingredient_order: 1,
        };
        assert!(ing.ingredient_order >= 1 && ing.ingredient_order <= 20);
    }

    #[test]
    fn test_meal_serde_round_trip() {
        let meal = Meal {
            id: MealId::from_str("52772").unwrap(),
            meal_name: Some("Teriyaki Chicken Casserole".to_string()),
            category: Some("Chicken".to_string()),
            area: Some("Japanese".to_string()),
            instructions: Some("Preheat oven to 350F.".to_string()),
            meal_thumb: None,
            tags: Some("Meat,Casserole".to_string()),
            youtube: None,
            source: None,
            image_source: None,
            creative_commons_confirmed: None,
            date_modified: None,
        };

        let json = serde_json::to_string(&meal).unwrap();
        let back: Meal = serde_json::from_str(&json).unwrap();
        assert_eq!(meal, back);
    }
}
