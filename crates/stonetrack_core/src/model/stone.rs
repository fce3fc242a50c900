//! Training stone catalog model.
//!
//! # Responsibility
//! - Define the fixed movement categories a stone belongs to.
//! - Define the immutable catalog entry views render and logs reference.
//!
//! # Invariants
//! - `Stone::id` is unique within one catalog.
//! - Stones are created once at startup and never mutated or removed.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier of a catalog stone (for example `"mobility"`).
///
/// Kept as a type alias so signatures read in domain terms.
pub type StoneId = String;

/// Fixed enumeration of movement categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Mobility,
    Strength,
    Coordination,
    Balance,
    Power,
    Rhythm,
    Core,
    Gymnastics,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Mobility,
        Category::Strength,
        Category::Coordination,
        Category::Balance,
        Category::Power,
        Category::Rhythm,
        Category::Core,
        Category::Gymnastics,
    ];

    /// Lowercase wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobility => "mobility",
            Self::Strength => "strength",
            Self::Coordination => "coordination",
            Self::Balance => "balance",
            Self::Power => "power",
            Self::Rhythm => "rhythm",
            Self::Core => "core",
            Self::Gymnastics => "gymnastics",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static catalog entry for one kind of movement practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stone {
    pub id: StoneId,
    pub name: String,
    pub description: String,
    /// Single glyph shown next to the name.
    pub icon: String,
    pub category: Category,
}

impl Stone {
    pub fn new(
        id: impl Into<StoneId>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn category_wire_names_match_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
