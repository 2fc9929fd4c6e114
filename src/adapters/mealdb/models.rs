//! Raw wire models for the recipe catalog API
//!
//! The catalog returns flat records with positionally-encoded ingredient
//! and measurement fields (`strIngredient1`..`strIngredient20`,
//! `strMeasure1`..`strMeasure20`). The positional fields are captured in a
//! flattened map and read through `ingredient()`/`measure()` accessors
//! rather than forty named struct fields.

use serde::Deserialize;
use std::collections::HashMap;

/// Number of positional ingredient/measurement slots in a raw record
pub const INGREDIENT_SLOTS: usize = 20;

/// A raw meal record exactly as the catalog serves it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,

    #[serde(rename = "strMeal")]
    pub name: Option<String>,

    #[serde(rename = "strCategory")]
    pub category: Option<String>,

    #[serde(rename = "strArea")]
    pub area: Option<String>,

    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,

    #[serde(rename = "strMealThumb")]
    pub thumb: Option<String>,

    #[serde(rename = "strTags")]
    pub tags: Option<String>,

    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,

    #[serde(rename = "strSource")]
    pub source: Option<String>,

    #[serde(rename = "strImageSource")]
    pub image_source: Option<String>,

    #[serde(rename = "strCreativeCommonsConfirmed")]
    pub creative_commons_confirmed: Option<String>,

    #[serde(rename = "dateModified")]
    pub date_modified: Option<String>,

    /// Positional `strIngredientN` / `strMeasureN` fields
    #[serde(flatten)]
    pub positional: HashMap<String, Option<String>>,
}

impl RawMeal {
    /// Ingredient name at a 1-based position, if the field is present
    pub fn ingredient(&self, position: usize) -> Option<&str> {
        self.positional
            .get(&format!("strIngredient{position}"))
            .and_then(|v| v.as_deref())
    }

    /// Measurement text at a 1-based position, if the field is present
    pub fn measure(&self, position: usize) -> Option<&str> {
        self.positional
            .get(&format!("strMeasure{position}"))
            .and_then(|v| v.as_deref())
    }

    /// Set a positional ingredient/measure pair (test fixtures)
    pub fn set_position(
        &mut self,
        position: usize,
        ingredient: Option<&str>,
        measure: Option<&str>,
    ) {
        self.positional.insert(
            format!("strIngredient{position}"),
            ingredient.map(|s| s.to_string()),
        );
        self.positional.insert(
            format!("strMeasure{position}"),
            measure.map(|s| s.to_string()),
        );
    }
}

/// A raw category record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(rename = "idCategory")]
    pub id: Option<String>,

    #[serde(rename = "strCategory")]
    pub name: Option<String>,

    #[serde(rename = "strCategoryThumb")]
    pub thumb: Option<String>,

    #[serde(rename = "strCategoryDescription")]
    pub description: Option<String>,
}

/// A raw area record; the list endpoint supplies only the name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArea {
    #[serde(rename = "strArea")]
    pub name: Option<String>,
}

/// A raw ingredient listing from the catalog's ingredient index
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIngredientListing {
    #[serde(rename = "idIngredient")]
    pub id: Option<String>,

    #[serde(rename = "strIngredient")]
    pub name: Option<String>,

    #[serde(rename = "strDescription")]
    pub description: Option<String>,
}

/// A summary row from the filter endpoints; lacks instructions and
/// ingredients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMealSummary {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,

    #[serde(rename = "strMeal")]
    pub name: Option<String>,

    #[serde(rename = "strMealThumb")]
    pub thumb: Option<String>,
}

/// Envelope for endpoints returning full meal records
///
/// The catalog encodes "no results" as a JSON `null` under the `meals` key.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    pub meals: Option<Vec<RawMeal>>,
}

/// Envelope for the filter endpoints (summaries)
#[derive(Debug, Deserialize)]
pub struct SummariesEnvelope {
    pub meals: Option<Vec<RawMealSummary>>,
}

/// Envelope for the category listing
#[derive(Debug, Deserialize)]
pub struct CategoriesEnvelope {
    pub categories: Option<Vec<RawCategory>>,
}

/// Envelope for the area listing; areas arrive under the `meals` key
#[derive(Debug, Deserialize)]
pub struct AreasEnvelope {
    pub meals: Option<Vec<RawArea>>,
}

/// Envelope for the ingredient index; listings arrive under the `meals` key
#[derive(Debug, Deserialize)]
pub struct IngredientsEnvelope {
    pub meals: Option<Vec<RawIngredientListing>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_meal_positional_access() {
        let json = r#"{
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "",
            "strMeasure2": null
        }"#;

        let raw: RawMeal = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_deref(), Some("52772"));
        assert_eq!(raw.ingredient(1), Some("soy sauce"));
        assert_eq!(raw.measure(1), Some("3/4 cup"));
        assert_eq!(raw.ingredient(2), Some(""));
        assert_eq!(raw.measure(2), None);
        assert_eq!(raw.ingredient(3), None);
    }

    #[test]
    fn test_meals_envelope_null_means_no_results() {
        let envelope: MealsEnvelope = serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(envelope.meals.is_none());
    }

    #[test]
    fn test_areas_arrive_under_meals_key() {
        let json = r#"{"meals": [{"strArea": "Japanese"}, {"strArea": "Mexican"}]}"#;
        let envelope: AreasEnvelope = serde_json::from_str(json).unwrap();
        let areas = envelope.meals.unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name.as_deref(), Some("Japanese"));
    }
}
