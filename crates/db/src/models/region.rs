//! Row shape of the `regions` table.

use nzwalks_core::region::Region;
use nzwalks_core::types::DbId;
use sqlx::FromRow;

/// A row from the `regions` table.
#[derive(Debug, Clone, FromRow)]
pub struct RegionRow {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

impl From<RegionRow> for Region {
    fn from(row: RegionRow) -> Self {
        Region {
            id: row.id,
            code: row.code,
            name: row.name,
            region_image_url: row.region_image_url,
        }
    }
}
