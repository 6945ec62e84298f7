use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::region::{REGION_CODE_LEN, REGION_NAME_MAX_LEN};
use crate::types::DbId;

/// Region as served by API v1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDtoV1 {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub region_image_url: Option<String>,
}

/// Region as served by API v2: `name` is exposed as `regionName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDtoV2 {
    pub id: DbId,
    pub code: String,
    pub region_name: String,
    pub region_image_url: Option<String>,
}

/// A region in whichever shape the requested version selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RegionDto {
    V1(RegionDtoV1),
    V2(RegionDtoV2),
}

impl RegionDto {
    pub fn id(&self) -> DbId {
        match self {
            RegionDto::V1(dto) => dto.id,
            RegionDto::V2(dto) => dto.id,
        }
    }
}

/// Body of `POST /api/{version}/regions`.
///
/// Fields are optional at the serde level so a missing value is reported as a
/// field validation error rather than a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddRegionRequest {
    #[validate(
        required(message = "Code is required"),
        length(
            min = REGION_CODE_LEN,
            max = REGION_CODE_LEN,
            message = "Code has to be exactly 3 characters"
        )
    )]
    pub code: Option<String>,
    #[validate(
        required(message = "Name is required"),
        length(
            min = 1,
            max = REGION_NAME_MAX_LEN,
            message = "Name has to be between 1 and 100 characters"
        )
    )]
    pub name: Option<String>,
    pub region_image_url: Option<String>,
}

/// Body of `PUT /api/{version}/regions/{id}`. Replaces every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionRequest {
    #[validate(
        required(message = "Code is required"),
        length(
            min = REGION_CODE_LEN,
            max = REGION_CODE_LEN,
            message = "Code has to be exactly 3 characters"
        )
    )]
    pub code: Option<String>,
    #[validate(
        required(message = "Name is required"),
        length(
            min = 1,
            max = REGION_NAME_MAX_LEN,
            message = "Name has to be between 1 and 100 characters"
        )
    )]
    pub name: Option<String>,
    pub region_image_url: Option<String>,
}
