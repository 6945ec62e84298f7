//! Walk difficulty reference data.

use uuid::Uuid;

use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub id: DbId,
    pub name: String,
}

pub const DIFFICULTY_ID_EASY: DbId = Uuid::from_u128(0x54466f17_02af_48e7_8ed3_5a4a8bfacf6f);
pub const DIFFICULTY_ID_MEDIUM: DbId = Uuid::from_u128(0xea294873_7a8c_4c0f_bfa7_a2eb492cbf8c);
pub const DIFFICULTY_ID_HARD: DbId = Uuid::from_u128(0xf808ddcd_b5e5_4d80_b732_1ca523e48434);

/// Seed difficulties. Must match the `seed_reference_data` migration.
pub fn seed_difficulties() -> Vec<Difficulty> {
    [
        (DIFFICULTY_ID_EASY, "Easy"),
        (DIFFICULTY_ID_MEDIUM, "Medium"),
        (DIFFICULTY_ID_HARD, "Hard"),
    ]
    .into_iter()
    .map(|(id, name)| Difficulty {
        id,
        name: name.to_string(),
    })
    .collect()
}
