use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::region::RegionDtoV1;
use crate::types::DbId;
use crate::walk::{
    WALK_DESCRIPTION_MAX_LEN, WALK_LENGTH_MAX_KM, WALK_LENGTH_MIN_KM, WALK_NAME_MAX_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDto {
    pub id: DbId,
    pub name: String,
}

/// Walk as served by the API, with its difficulty and region summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkDto {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    pub walk_image_url: Option<String>,
    pub difficulty: Option<DifficultyDto>,
    pub region: Option<RegionDtoV1>,
}

/// Body of `POST /api/walks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddWalkRequest {
    #[validate(
        required(message = "Name is required"),
        length(
            min = 1,
            max = WALK_NAME_MAX_LEN,
            message = "Name has to be between 1 and 100 characters"
        )
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Description is required"),
        length(
            min = 1,
            max = WALK_DESCRIPTION_MAX_LEN,
            message = "Description has to be between 1 and 1000 characters"
        )
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "LengthInKm is required"),
        range(
            min = WALK_LENGTH_MIN_KM,
            max = WALK_LENGTH_MAX_KM,
            message = "LengthInKm has to be between 0 and 50"
        )
    )]
    pub length_in_km: Option<f64>,
    pub walk_image_url: Option<String>,
    #[validate(required(message = "DifficultyId is required"))]
    pub difficulty_id: Option<DbId>,
    #[validate(required(message = "RegionId is required"))]
    pub region_id: Option<DbId>,
}

/// Body of `PUT /api/walks/{id}`. Replaces every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWalkRequest {
    #[validate(
        required(message = "Name is required"),
        length(
            min = 1,
            max = WALK_NAME_MAX_LEN,
            message = "Name has to be between 1 and 100 characters"
        )
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Description is required"),
        length(
            min = 1,
            max = WALK_DESCRIPTION_MAX_LEN,
            message = "Description has to be between 1 and 1000 characters"
        )
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "LengthInKm is required"),
        range(
            min = WALK_LENGTH_MIN_KM,
            max = WALK_LENGTH_MAX_KM,
            message = "LengthInKm has to be between 0 and 50"
        )
    )]
    pub length_in_km: Option<f64>,
    pub walk_image_url: Option<String>,
    #[validate(required(message = "DifficultyId is required"))]
    pub difficulty_id: Option<DbId>,
    #[validate(required(message = "RegionId is required"))]
    pub region_id: Option<DbId>,
}
