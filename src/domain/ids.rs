//! Domain identifier types with validation
//!
//! Newtype wrapper for the external catalog's meal identifier. The catalog
//! issues stable numeric-looking string ids; we only require non-emptiness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meal identifier newtype wrapper
///
/// Represents the external catalog's stable identifier for a meal. This is
/// the primary key of the `meals` table and the foreign key on
/// `ingredients`.
///
/// # Examples
///
/// ```
/// use larder::domain::ids::MealId;
/// use std::str::FromStr;
///
/// let id = MealId::from_str("52772").unwrap();
/// assert_eq!(id.as_str(), "52772");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealId(String);

impl MealId {
    /// Creates a new MealId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Meal id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the meal id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MealId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MealId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_id_valid() {
        let id = MealId::new("52772").unwrap();
        assert_eq!(id.as_str(), "52772");
        assert_eq!(id.to_string(), "52772");
    }

    #[test]
    fn test_meal_id_empty_rejected() {
        assert!(MealId::new("").is_err());
        assert!(MealId::new("   ").is_err());
    }

    #[test]
    fn test_meal_id_from_str() {
        let id = MealId::from_str("53001").unwrap();
        assert_eq!(id.into_inner(), "53001");
    }
}
