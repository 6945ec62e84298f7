//! Row shape of a walk joined with its difficulty and region.

use nzwalks_core::difficulty::Difficulty;
use nzwalks_core::region::Region;
use nzwalks_core::types::DbId;
use nzwalks_core::walk::Walk;
use sqlx::FromRow;

/// A `walks` row with the columns of its difficulty and region.
#[derive(Debug, Clone, FromRow)]
pub struct WalkRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub difficulty_id: DbId,
    pub region_id: DbId,
    pub difficulty_name: String,
    pub region_code: String,
    pub region_name: String,
    pub region_image_url: Option<String>,
}

impl From<WalkRow> for Walk {
    fn from(row: WalkRow) -> Self {
        Walk {
            id: row.id,
            name: row.name,
            description: row.description,
            length_in_km: row.length_in_km,
            walk_image_url: row.walk_image_url,
            difficulty_id: row.difficulty_id,
            region_id: row.region_id,
            difficulty: Some(Difficulty {
                id: row.difficulty_id,
                name: row.difficulty_name,
            }),
            region: Some(Region {
                id: row.region_id,
                code: row.region_code,
                name: row.region_name,
                region_image_url: row.region_image_url,
            }),
        }
    }
}
