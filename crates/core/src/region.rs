//! Region domain model.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::entity::{Entity, QueryField};
use crate::types::DbId;

/// Region codes are exactly this many characters (e.g. `AKL`).
pub const REGION_CODE_LEN: u64 = 3;

/// Maximum length of a region name.
pub const REGION_NAME_MAX_LEN: u64 = 100;

/// A stored region. `id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

/// Region values without an identifier: the input to create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegion {
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

impl Region {
    pub fn from_new(id: DbId, input: NewRegion) -> Self {
        Self {
            id,
            code: input.code,
            name: input.name,
            region_image_url: input.region_image_url,
        }
    }

    /// Replace every mutable field, keeping the identifier.
    pub fn apply(&mut self, input: NewRegion) {
        self.code = input.code;
        self.name = input.name;
        self.region_image_url = input.region_image_url;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionField {
    Code,
    Name,
}

impl QueryField for RegionField {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "code" => Some(RegionField::Code),
            "name" | "regionname" => Some(RegionField::Name),
            _ => None,
        }
    }

    fn is_filterable(self) -> bool {
        true
    }
}

impl Entity for Region {
    const NAME: &'static str = "Region";
    type New = NewRegion;
    type Field = RegionField;
    const DEFAULT_SORT: RegionField = RegionField::Name;

    fn id(&self) -> DbId {
        self.id
    }

    fn field_text(&self, field: RegionField) -> Option<&str> {
        match field {
            RegionField::Code => Some(&self.code),
            RegionField::Name => Some(&self.name),
        }
    }

    fn compare_field(&self, other: &Self, field: RegionField) -> Ordering {
        match field {
            RegionField::Code => self.code.cmp(&other.code),
            RegionField::Name => self.name.cmp(&other.name),
        }
    }
}

pub const REGION_ID_AUCKLAND: DbId = Uuid::from_u128(0xf7248fc3_2585_4efb_8d1d_1c555f4087f6);
pub const REGION_ID_NORTHLAND: DbId = Uuid::from_u128(0x6884f7d7_ad1f_4101_8df3_7a6fa7387d81);
pub const REGION_ID_BAY_OF_PLENTY: DbId = Uuid::from_u128(0x14ceba71_4b51_4777_9b17_46602cf66153);
pub const REGION_ID_WELLINGTON: DbId = Uuid::from_u128(0xcfa06ed2_bf65_4b65_93ed_c9d286ddb0de);
pub const REGION_ID_NELSON: DbId = Uuid::from_u128(0x906cb139_415a_4bbb_a174_1a1faf9fb1f6);
pub const REGION_ID_SOUTHLAND: DbId = Uuid::from_u128(0xf077a22e_4248_4bf6_b564_c7cf4e250263);

/// Seed regions. Must match the rows inserted by the `seed_reference_data` migration.
pub fn seed_regions() -> Vec<Region> {
    let region = |id, code: &str, name: &str, url: Option<&str>| Region {
        id,
        code: code.to_string(),
        name: name.to_string(),
        region_image_url: url.map(str::to_string),
    };

    vec![
        region(
            REGION_ID_AUCKLAND,
            "AKL",
            "Auckland",
            Some("https://images.pexels.com/photos/5169056/pexels-photo-5169056.jpeg"),
        ),
        region(REGION_ID_NORTHLAND, "NTL", "Northland", None),
        region(REGION_ID_BAY_OF_PLENTY, "BOP", "Bay Of Plenty", None),
        region(
            REGION_ID_WELLINGTON,
            "WGN",
            "Wellington",
            Some("https://images.pexels.com/photos/4350631/pexels-photo-4350631.jpeg"),
        ),
        region(
            REGION_ID_NELSON,
            "NSN",
            "Nelson",
            Some("https://images.pexels.com/photos/13918194/pexels-photo-13918194.jpeg"),
        ),
        region(REGION_ID_SOUTHLAND, "STL", "Southland", None),
    ]
}
