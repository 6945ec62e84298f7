//! Wire shapes.
//!
//! Response DTOs are built fresh from a domain value for each request; request
//! DTOs are validated with `validator` before they are mapped to the domain.
//! All JSON field names are camelCase.

pub mod image;
pub mod region;
pub mod walk;

pub use image::ImageDto;
pub use region::{AddRegionRequest, RegionDto, RegionDtoV1, RegionDtoV2, UpdateRegionRequest};
pub use walk::{AddWalkRequest, DifficultyDto, UpdateWalkRequest, WalkDto};
