//! Walk domain model.

use std::cmp::Ordering;

use crate::difficulty::Difficulty;
use crate::entity::{Entity, QueryField};
use crate::region::Region;
use crate::types::DbId;

pub const WALK_NAME_MAX_LEN: u64 = 100;
pub const WALK_DESCRIPTION_MAX_LEN: u64 = 1000;
pub const WALK_LENGTH_MIN_KM: f64 = 0.0;
pub const WALK_LENGTH_MAX_KM: f64 = 50.0;

/// A stored walk.
///
/// `difficulty` and `region` are read-side navigation values filled in by the
/// store from `difficulty_id` / `region_id`; they are never written.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub difficulty_id: DbId,
    pub region_id: DbId,
    pub difficulty: Option<Difficulty>,
    pub region: Option<Region>,
}

/// Walk values without an identifier: the input to create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWalk {
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub difficulty_id: DbId,
    pub region_id: DbId,
}

impl Walk {
    /// Build a walk from its write shape. Navigation values start empty.
    pub fn from_new(id: DbId, input: NewWalk) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            length_in_km: input.length_in_km,
            walk_image_url: input.walk_image_url,
            difficulty_id: input.difficulty_id,
            region_id: input.region_id,
            difficulty: None,
            region: None,
        }
    }

    /// Replace every mutable field, keeping the identifier.
    ///
    /// Navigation values are dropped when the reference they describe changes.
    pub fn apply(&mut self, input: NewWalk) {
        if self.difficulty_id != input.difficulty_id {
            self.difficulty = None;
        }
        if self.region_id != input.region_id {
            self.region = None;
        }
        self.name = input.name;
        self.description = input.description;
        self.length_in_km = input.length_in_km;
        self.walk_image_url = input.walk_image_url;
        self.difficulty_id = input.difficulty_id;
        self.region_id = input.region_id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkField {
    Name,
    Description,
    LengthInKm,
}

impl QueryField for WalkField {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(WalkField::Name),
            "description" => Some(WalkField::Description),
            "length" | "lengthinkm" => Some(WalkField::LengthInKm),
            _ => None,
        }
    }

    fn is_filterable(self) -> bool {
        !matches!(self, WalkField::LengthInKm)
    }
}

impl Entity for Walk {
    const NAME: &'static str = "Walk";
    type New = NewWalk;
    type Field = WalkField;
    const DEFAULT_SORT: WalkField = WalkField::Name;

    fn id(&self) -> DbId {
        self.id
    }

    fn field_text(&self, field: WalkField) -> Option<&str> {
        match field {
            WalkField::Name => Some(&self.name),
            WalkField::Description => Some(&self.description),
            WalkField::LengthInKm => None,
        }
    }

    fn compare_field(&self, other: &Self, field: WalkField) -> Ordering {
        match field {
            WalkField::Name => self.name.cmp(&other.name),
            WalkField::Description => self.description.cmp(&other.description),
            WalkField::LengthInKm => self.length_in_km.total_cmp(&other.length_in_km),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::difficulty::DIFFICULTY_ID_EASY;
    use crate::region::REGION_ID_AUCKLAND;

    fn new_walk() -> NewWalk {
        NewWalk {
            name: "Mount Eden".into(),
            description: "Volcanic cone walk".into(),
            length_in_km: 2.5,
            walk_image_url: None,
            difficulty_id: DIFFICULTY_ID_EASY,
            region_id: REGION_ID_AUCKLAND,
        }
    }

    #[test]
    fn apply_clears_stale_navigation() {
        let mut walk = Walk::from_new(Uuid::new_v4(), new_walk());
        walk.difficulty = Some(Difficulty {
            id: DIFFICULTY_ID_EASY,
            name: "Easy".into(),
        });

        let mut changed = new_walk();
        changed.difficulty_id = Uuid::new_v4();
        walk.apply(changed);

        assert!(walk.difficulty.is_none());
    }

    #[test]
    fn apply_keeps_navigation_when_reference_unchanged() {
        let mut walk = Walk::from_new(Uuid::new_v4(), new_walk());
        walk.difficulty = Some(Difficulty {
            id: DIFFICULTY_ID_EASY,
            name: "Easy".into(),
        });

        let mut renamed = new_walk();
        renamed.name = "Mt Eden Summit".into();
        walk.apply(renamed);

        assert_eq!(walk.name, "Mt Eden Summit");
        assert!(walk.difficulty.is_some());
    }

    #[test]
    fn length_aliases_resolve() {
        assert_eq!(WalkField::parse("Length"), Some(WalkField::LengthInKm));
        assert_eq!(WalkField::parse("lengthInKm"), Some(WalkField::LengthInKm));
        assert!(!WalkField::LengthInKm.is_filterable());
        assert!(WalkField::Name.is_filterable());
    }
}
