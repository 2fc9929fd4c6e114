//! Record transformation
//!
//! Pure functions that reshape raw catalog records into normalized
//! entities. Nothing in this module performs I/O; a malformed record is
//! reported to the caller (or dropped by the batch helpers with a logged
//! reason) and never aborts a batch.

use crate::adapters::mealdb::models::{RawArea, RawCategory, RawMeal, INGREDIENT_SLOTS};
use crate::domain::{Area, Category, Ingredient, LarderError, Meal, MealId, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Names the source uses as placeholders for "no ingredient here"
const BLANK_INGREDIENT_NAMES: [&str; 2] = ["null", "none"];

/// Clean and normalize a text field
///
/// Trims, collapses internal whitespace runs to one space, and strips
/// HTML-like tags. Empty and literal `"null"` inputs map to `None` so
/// storage can distinguish "no value" from an empty string.
pub fn clean(text: &str) -> Option<String> {
    if text.is_empty() || text == "null" {
        return None;
    }

    let collapsed = whitespace_re().replace_all(text.trim(), " ");
    let stripped = html_tag_re().replace_all(&collapsed, "");

    Some(stripped.into_owned())
}

/// Clean an optional raw field
fn clean_field(field: Option<&str>) -> Option<String> {
    field.and_then(clean)
}

/// Parse the source's last-modified date
///
/// Two formats are accepted: `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`.
/// Anything else is logged as a warning and mapped to `None`; a bad date
/// never fails the record.
pub fn parse_source_date(date: Option<&str>) -> Option<NaiveDateTime> {
    let date = date?;
    if date.is_empty() || date == "null" {
        return None;
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    }

    tracing::warn!(date = %date, "Could not parse source date");
    None
}

/// Extract the ingredient list from a raw meal's positional fields
///
/// Scans positions 1..=20; a position is emitted only when its ingredient
/// name is non-blank and not a `"null"`/`"none"` placeholder. The 1-based
/// source position becomes the order index, so gaps in the source leave
/// gaps in the order rather than renumbering.
pub fn extract_ingredients(meal_id: &MealId, raw: &RawMeal) -> Vec<Ingredient> {
    let mut ingredients = Vec::new();

    for position in 1..=INGREDIENT_SLOTS {
        let name = raw.ingredient(position).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let lowered = name.to_lowercase();
        if BLANK_INGREDIENT_NAMES.contains(&lowered.as_str()) {
            continue;
        }

        let measure = raw.measure(position).unwrap_or("").trim();

        ingredients.push(Ingredient {
            meal_id: meal_id.clone(),
            ingredient_name: clean(name).unwrap_or_default(),
            measurement: if measure.is_empty() {
                None
            } else {
                clean(measure)
            },
            ingredient_order: position as i32,
        });
    }

    ingredients
}

/// Map a raw meal record onto the normalized meal entity
///
/// # Errors
///
/// Returns a validation error when the record has no usable id; such
/// records are dropped by the batch helpers.
pub fn to_meal_entity(raw: &RawMeal) -> Result<Meal> {
    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LarderError::Validation("Raw meal record is missing its id".to_string()))?;
    let id = MealId::new(id).map_err(LarderError::Validation)?;

    Ok(Meal {
        id,
        meal_name: clean_field(raw.name.as_deref()),
        category: clean_field(raw.category.as_deref()),
        area: clean_field(raw.area.as_deref()),
        instructions: clean_field(raw.instructions.as_deref()),
        meal_thumb: raw.thumb.clone(),
        tags: clean_field(raw.tags.as_deref()),
        youtube: raw.youtube.clone(),
        source: raw.source.clone(),
        image_source: raw.image_source.clone(),
        creative_commons_confirmed: raw.creative_commons_confirmed.clone(),
        date_modified: parse_source_date(raw.date_modified.as_deref()),
    })
}

/// Map a raw category record onto the category entity
///
/// # Errors
///
/// Returns a validation error when the record has no id.
pub fn to_category_entity(raw: &RawCategory) -> Result<Category> {
    let id = raw
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            LarderError::Validation("Raw category record is missing its id".to_string())
        })?;

    Ok(Category {
        id: id.to_string(),
        category_name: clean_field(raw.name.as_deref()),
        category_thumb: raw.thumb.clone(),
        category_description: clean_field(raw.description.as_deref()),
    })
}

/// Map a raw area record onto the area entity; `None` when the name is
/// blank after cleaning
pub fn to_area_entity(raw: &RawArea) -> Option<Area> {
    clean_field(raw.name.as_deref()).map(|area_name| Area { area_name })
}

/// Transform a batch of raw meals, dropping malformed records with a
/// logged reason
pub fn to_meal_batch(raws: &[RawMeal]) -> Vec<Meal> {
    let mut meals = Vec::with_capacity(raws.len());
    for raw in raws {
        match to_meal_entity(raw) {
            Ok(meal) => meals.push(meal),
            Err(e) => {
                tracing::warn!(
                    meal_id = raw.id.as_deref().unwrap_or("unknown"),
                    reason = %e,
                    "Dropping malformed meal record"
                );
            }
        }
    }
    meals
}

/// Extract ingredients for a batch of raw meals, skipping records without
/// an id
pub fn to_ingredient_batch(raws: &[RawMeal]) -> Vec<Ingredient> {
    let mut all = Vec::new();
    for raw in raws {
        let Some(id) = raw.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        let Ok(meal_id) = MealId::new(id) else {
            continue;
        };
        all.extend(extract_ingredients(&meal_id, raw));
    }
    all
}

/// Transform a batch of raw categories, dropping malformed records with a
/// logged reason
pub fn to_category_batch(raws: &[RawCategory]) -> Vec<Category> {
    let mut categories = Vec::with_capacity(raws.len());
    for raw in raws {
        match to_category_entity(raw) {
            Ok(category) => categories.push(category),
            Err(e) => {
                tracing::warn!(reason = %e, "Dropping malformed category record");
            }
        }
    }
    categories
}

/// Transform a batch of raw areas, dropping blank names
pub fn to_area_batch(raws: &[RawArea]) -> Vec<Area> {
    raws.iter().filter_map(to_area_entity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn raw_meal(id: &str) -> RawMeal {
        RawMeal {
            id: Some(id.to_string()),
            name: Some("Teriyaki Chicken Casserole".to_string()),
            ..RawMeal::default()
        }
    }

    #[test_case("", None; "empty maps to absent")]
    #[test_case("null", None; "literal null maps to absent")]
    #[test_case("  hello   world ", Some("hello world"); "whitespace collapsed")]
    #[test_case("line\none", Some("line one"); "newlines collapsed")]
    #[test_case("a <b>bold</b> claim", Some("a bold claim"); "tags stripped")]
    #[test_case("plain", Some("plain"); "plain text unchanged")]
    fn test_clean(input: &str, expected: Option<&str>) {
        assert_eq!(clean(input).as_deref(), expected);
    }

    #[test]
    fn test_parse_source_date_datetime_format() {
        let parsed = parse_source_date(Some("2019-08-14 21:30:00")).unwrap();
        assert_eq!(parsed.to_string(), "2019-08-14 21:30:00");
    }

    #[test]
    fn test_parse_source_date_date_only_format() {
        let parsed = parse_source_date(Some("2019-08-14")).unwrap();
        assert_eq!(parsed.to_string(), "2019-08-14 00:00:00");
    }

    #[test_case(None; "absent")]
    #[test_case(Some(""); "empty")]
    #[test_case(Some("null"); "literal null")]
    #[test_case(Some("14/08/2019"); "unsupported format")]
    fn test_parse_source_date_unknown(input: Option<&str>) {
        assert_eq!(parse_source_date(input), None);
    }

    #[test]
    fn test_extract_ingredients_preserves_positions_and_gaps() {
        let mut raw = raw_meal("52772");
        raw.set_position(1, Some("soy sauce"), Some("3/4 cup"));
        raw.set_position(2, Some(""), Some(""));
        raw.set_position(3, Some("sesame seeds"), Some("  "));
        raw.set_position(4, Some("null"), Some("1 tsp"));
        raw.set_position(5, Some("NONE"), None);
        raw.set_position(6, Some("spring onions"), Some("chopped"));

        let id = MealId::new("52772").unwrap();
        let ingredients = extract_ingredients(&id, &raw);

        assert_eq!(ingredients.len(), 3);
        assert_eq!(ingredients[0].ingredient_order, 1);
        assert_eq!(ingredients[0].ingredient_name, "soy sauce");
        assert_eq!(ingredients[0].measurement.as_deref(), Some("3/4 cup"));

        // Position 3 keeps its source order despite the gap at 2
        assert_eq!(ingredients[1].ingredient_order, 3);
        assert_eq!(ingredients[1].measurement, None);

        assert_eq!(ingredients[2].ingredient_order, 6);
    }

    #[test]
    fn test_extract_ingredients_caps_at_twenty() {
        let mut raw = raw_meal("52772");
        for position in 1..=25 {
            raw.set_position(position, Some("flour"), Some("1 cup"));
        }

        let id = MealId::new("52772").unwrap();
        let ingredients = extract_ingredients(&id, &raw);

        assert_eq!(ingredients.len(), 20);
        assert!(ingredients
            .iter()
            .all(|i| (1..=20).contains(&i.ingredient_order)));
    }

    #[test]
    fn test_to_meal_entity_maps_and_cleans() {
        let mut raw = raw_meal("52772");
        raw.category = Some("Chicken".to_string());
        raw.area = Some("  Japanese ".to_string());
        raw.instructions = Some("Preheat  oven\nto 350F.".to_string());
        raw.thumb = Some("https://example.com/thumb.jpg".to_string());
        raw.tags = Some("Meat,Casserole".to_string());
        raw.creative_commons_confirmed = Some("Yes".to_string());
        raw.date_modified = Some("2019-08-14 21:30:00".to_string());

        let meal = to_meal_entity(&raw).unwrap();

        assert_eq!(meal.id.as_str(), "52772");
        assert_eq!(meal.area.as_deref(), Some("Japanese"));
        assert_eq!(meal.instructions.as_deref(), Some("Preheat oven to 350F."));
        assert_eq!(
            meal.meal_thumb.as_deref(),
            Some("https://example.com/thumb.jpg")
        );
        assert_eq!(meal.creative_commons_confirmed.as_deref(), Some("Yes"));
        assert!(meal.date_modified.is_some());
    }

    #[test]
    fn test_to_meal_entity_rejects_missing_id() {
        let raw = RawMeal::default();
        assert!(matches!(
            to_meal_entity(&raw),
            Err(LarderError::Validation(_))
        ));
    }

    #[test]
    fn test_to_meal_batch_drops_malformed() {
        let raws = vec![raw_meal("1"), RawMeal::default(), raw_meal("2")];
        let meals = to_meal_batch(&raws);
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].id.as_str(), "1");
        assert_eq!(meals[1].id.as_str(), "2");
    }

    #[test]
    fn test_to_ingredient_batch_skips_idless_records() {
        let mut with_id = raw_meal("1");
        with_id.set_position(1, Some("rice"), Some("200g"));
        let mut without_id = RawMeal::default();
        without_id.set_position(1, Some("ghost"), None);

        let ingredients = to_ingredient_batch(&[with_id, without_id]);
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].meal_id.as_str(), "1");
    }

    #[test]
    fn test_to_category_entity() {
        let raw = RawCategory {
            id: Some("1".to_string()),
            name: Some("Beef".to_string()),
            thumb: Some("https://example.com/beef.png".to_string()),
            description: Some("Beef is  the culinary name".to_string()),
        };

        let category = to_category_entity(&raw).unwrap();
        assert_eq!(category.id, "1");
        assert_eq!(
            category.category_description.as_deref(),
            Some("Beef is the culinary name")
        );
    }

    #[test]
    fn test_to_category_entity_rejects_missing_id() {
        assert!(to_category_entity(&RawCategory::default()).is_err());
    }

    #[test]
    fn test_to_area_batch_drops_blanks() {
        let raws = vec![
            RawArea {
                name: Some("Japanese".to_string()),
            },
            RawArea { name: None },
            RawArea {
                name: Some("null".to_string()),
            },
            RawArea {
                name: Some("Mexican".to_string()),
            },
        ];

        let areas = to_area_batch(&raws);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].area_name, "Japanese");
        assert_eq!(areas[1].area_name, "Mexican");
    }
}
