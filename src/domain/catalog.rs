//! Reference-data entities
//!
//! Categories and areas are wholesale-replaced on each full load rather
//! than merged incrementally.

use serde::{Deserialize, Serialize};

/// A meal category from the source catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Source category id (primary key)
    pub id: String,

    /// Category name
    pub category_name: Option<String>,

    /// Thumbnail URL
    pub category_thumb: Option<String>,

    /// Free-text description
    pub category_description: Option<String>,
}

/// A cuisine area; the source supplies only a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub area_name: String,
}
