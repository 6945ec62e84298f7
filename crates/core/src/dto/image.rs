use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Response of `POST /api/images/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: DbId,
    pub file_name: String,
    pub file_description: Option<String>,
    pub file_extension: String,
    pub file_size_in_bytes: u64,
    /// Public URL of the stored file.
    pub file_path: String,
}
