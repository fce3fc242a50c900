//! User profile and skill models.
//!
//! # Responsibility
//! - Define the singleton profile of the tracking user.
//! - Validate skill levels on every construction path.
//!
//! # Invariants
//! - `Skill::level` is always within `SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX`.
//! - `active_quests` has set semantics; entries are not checked against the
//!   quest catalog.

use crate::model::quest::QuestId;
use crate::model::stone::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SKILL_LEVEL_MIN: u8 = 1;
pub const SKILL_LEVEL_MAX: u8 = 5;

/// Validation errors for skill records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillValidationError {
    /// Level outside `1..=5`.
    LevelOutOfRange { level: u8 },
}

impl Display for SkillValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LevelOutOfRange { level } => write!(
                f,
                "skill level ({level}) must be within {SKILL_LEVEL_MIN}..={SKILL_LEVEL_MAX}"
            ),
        }
    }
}

impl Error for SkillValidationError {}

/// One tracked movement skill with a coarse 1-5 level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SkillWire")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    level: u8,
}

impl Skill {
    /// Creates a skill, rejecting levels outside `1..=5`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
        level: u8,
    ) -> Result<Self, SkillValidationError> {
        validate_level(level)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            category,
            description: description.into(),
            level,
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

fn validate_level(level: u8) -> Result<(), SkillValidationError> {
    if (SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX).contains(&level) {
        Ok(())
    } else {
        Err(SkillValidationError::LevelOutOfRange { level })
    }
}

#[derive(Deserialize)]
struct SkillWire {
    id: String,
    name: String,
    category: Category,
    description: String,
    level: u8,
}

impl TryFrom<SkillWire> for Skill {
    type Error = SkillValidationError;

    fn try_from(value: SkillWire) -> Result<Self, Self::Error> {
        Skill::new(
            value.id,
            value.name,
            value.category,
            value.description,
            value.level,
        )
    }
}

/// Singleton profile of the tracking user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub join_date: NaiveDate,
    pub skills: Vec<Skill>,
    pub active_quests: BTreeSet<QuestId>,
    pub focus_categories: Vec<Category>,
}

impl User {
    /// Flips membership of `quest_id` in the active-quest set.
    ///
    /// Returns `true` when the quest is active after the call.
    pub fn toggle_active_quest(&mut self, quest_id: &str) -> bool {
        if self.active_quests.remove(quest_id) {
            false
        } else {
            self.active_quests.insert(quest_id.to_string());
            true
        }
    }

    pub fn is_quest_active(&self, quest_id: &str) -> bool {
        self.active_quests.contains(quest_id)
    }

    /// Groups skills by category, keeping authored order inside each group.
    pub fn skills_by_category(&self) -> BTreeMap<Category, Vec<&Skill>> {
        let mut grouped: BTreeMap<Category, Vec<&Skill>> = BTreeMap::new();
        for skill in &self.skills {
            grouped.entry(skill.category).or_default().push(skill);
        }
        grouped
    }
}
