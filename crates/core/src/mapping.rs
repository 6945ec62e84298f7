//! Domain <-> DTO mapping.
//!
//! Every (entity, version) pair has exactly one rule, registered in a
//! [`VersionedMapper`] when [`Mappers::build`] runs at startup. Handlers resolve
//! the requested version into a [`Projection`] before calling the repository,
//! so an unsupported version is rejected before any data is read or written.
//!
//! Renamed fields are projections: the value is copied unchanged and only the
//! field label differs between versions.

use std::collections::BTreeMap;
use std::fmt;

use validator::Validate;

use crate::api_version::ApiVersion;
use crate::difficulty::Difficulty;
use crate::dto::{
    AddRegionRequest, AddWalkRequest, DifficultyDto, ImageDto, RegionDto, RegionDtoV1,
    RegionDtoV2, UpdateRegionRequest, UpdateWalkRequest, WalkDto,
};
use crate::entity::Entity;
use crate::error::CoreError;
use crate::image::Image;
use crate::region::{NewRegion, Region};
use crate::walk::{NewWalk, Walk};

/// Version under which unversioned entities register their single shape.
pub const UNVERSIONED: ApiVersion = ApiVersion::V1;

/* --------------------------------------------------------------------------
Domain -> DTO rules
-------------------------------------------------------------------------- */

pub fn region_to_v1(region: &Region) -> RegionDtoV1 {
    RegionDtoV1 {
        id: region.id,
        code: region.code.clone(),
        name: region.name.clone(),
        region_image_url: region.region_image_url.clone(),
    }
}

pub fn region_to_v2(region: &Region) -> RegionDtoV2 {
    RegionDtoV2 {
        id: region.id,
        code: region.code.clone(),
        region_name: region.name.clone(),
        region_image_url: region.region_image_url.clone(),
    }
}

pub fn difficulty_to_dto(difficulty: &Difficulty) -> DifficultyDto {
    DifficultyDto {
        id: difficulty.id,
        name: difficulty.name.clone(),
    }
}

pub fn walk_to_dto(walk: &Walk) -> WalkDto {
    WalkDto {
        id: walk.id,
        name: walk.name.clone(),
        description: walk.description.clone(),
        length_in_km: walk.length_in_km,
        walk_image_url: walk.walk_image_url.clone(),
        difficulty: walk.difficulty.as_ref().map(difficulty_to_dto),
        region: walk.region.as_ref().map(region_to_v1),
    }
}

pub fn image_to_dto(image: &Image) -> ImageDto {
    ImageDto {
        id: image.id,
        file_name: image.file_name.clone(),
        file_description: image.file_description.clone(),
        file_extension: image.file_extension.clone(),
        file_size_in_bytes: image.file_size_in_bytes,
        file_path: image.file_path.clone(),
    }
}

/* --------------------------------------------------------------------------
DTO -> domain
-------------------------------------------------------------------------- */

/// Conversion of a wire shape into a domain write value.
///
/// Request shapes validate first and the domain value is only built from
/// input that passed. Response shapes already describe a stored value and are
/// projected back unchanged. The result never carries an identifier.
pub trait ToDomain {
    type Domain;

    fn to_domain(self) -> Result<Self::Domain, CoreError>;
}

impl ToDomain for AddRegionRequest {
    type Domain = NewRegion;

    fn to_domain(self) -> Result<NewRegion, CoreError> {
        self.validate()?;
        new_region(self.code, self.name, self.region_image_url)
    }
}

impl ToDomain for UpdateRegionRequest {
    type Domain = NewRegion;

    fn to_domain(self) -> Result<NewRegion, CoreError> {
        self.validate()?;
        new_region(self.code, self.name, self.region_image_url)
    }
}

impl ToDomain for RegionDtoV1 {
    type Domain = NewRegion;

    fn to_domain(self) -> Result<NewRegion, CoreError> {
        Ok(NewRegion {
            code: self.code,
            name: self.name,
            region_image_url: self.region_image_url,
        })
    }
}

impl ToDomain for RegionDtoV2 {
    type Domain = NewRegion;

    fn to_domain(self) -> Result<NewRegion, CoreError> {
        Ok(NewRegion {
            code: self.code,
            name: self.region_name,
            region_image_url: self.region_image_url,
        })
    }
}

impl ToDomain for AddWalkRequest {
    type Domain = NewWalk;

    fn to_domain(self) -> Result<NewWalk, CoreError> {
        self.validate()?;
        Ok(NewWalk {
            name: present(self.name, "name")?,
            description: present(self.description, "description")?,
            length_in_km: present(self.length_in_km, "lengthInKm")?,
            walk_image_url: self.walk_image_url,
            difficulty_id: present(self.difficulty_id, "difficultyId")?,
            region_id: present(self.region_id, "regionId")?,
        })
    }
}

impl ToDomain for UpdateWalkRequest {
    type Domain = NewWalk;

    fn to_domain(self) -> Result<NewWalk, CoreError> {
        self.validate()?;
        Ok(NewWalk {
            name: present(self.name, "name")?,
            description: present(self.description, "description")?,
            length_in_km: present(self.length_in_km, "lengthInKm")?,
            walk_image_url: self.walk_image_url,
            difficulty_id: present(self.difficulty_id, "difficultyId")?,
            region_id: present(self.region_id, "regionId")?,
        })
    }
}

fn new_region(
    code: Option<String>,
    name: Option<String>,
    region_image_url: Option<String>,
) -> Result<NewRegion, CoreError> {
    Ok(NewRegion {
        code: present(code, "code")?,
        name: present(name, "name")?,
        region_image_url,
    })
}

fn present<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::invalid(field, format!("{field} is required")))
}

/* --------------------------------------------------------------------------
Version registry
-------------------------------------------------------------------------- */

/// A mapping rule from a domain value to one DTO shape.
pub type Rule<E, D> = fn(&E) -> D;

/// The mapping rules of one entity, keyed by API version.
pub struct VersionedMapper<E, D> {
    entity: &'static str,
    rules: BTreeMap<ApiVersion, Rule<E, D>>,
}

impl<E, D> VersionedMapper<E, D> {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            rules: BTreeMap::new(),
        }
    }

    pub fn register(mut self, version: ApiVersion, rule: Rule<E, D>) -> Self {
        self.rules.insert(version, rule);
        self
    }

    pub fn versions(&self) -> impl Iterator<Item = ApiVersion> + '_ {
        self.rules.keys().copied()
    }

    /// Fail unless every version in `required` has a rule.
    pub fn ensure_registered(&self, required: &[ApiVersion]) -> Result<(), CoreError> {
        let missing: Vec<&str> = required
            .iter()
            .filter(|v| !self.rules.contains_key(*v))
            .map(ApiVersion::as_str)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Configuration(format!(
                "{} has no mapping registered for: {}",
                self.entity,
                missing.join(", ")
            )))
        }
    }

    /// Resolve a route version token into a projection.
    pub fn resolve(&self, token: &str) -> Result<Projection<E, D>, CoreError> {
        self.resolve_version(ApiVersion::parse(token)?)
    }

    pub fn resolve_version(&self, version: ApiVersion) -> Result<Projection<E, D>, CoreError> {
        let rule = self.rules.get(&version).copied().ok_or_else(|| {
            CoreError::Configuration(format!(
                "{} is not available in API version {version}",
                self.entity
            ))
        })?;
        Ok(Projection {
            entity: self.entity,
            version,
            rule,
        })
    }

    pub fn to_dto(&self, item: &E, token: &str) -> Result<D, CoreError> {
        Ok(self.resolve(token)?.apply(item))
    }

    /// Map a sequence in order. Fails before producing any output.
    pub fn to_dtos(&self, items: &[E], token: &str) -> Result<Vec<D>, CoreError> {
        Ok(self.resolve(token)?.apply_all(items))
    }
}

impl<E, D> fmt::Debug for VersionedMapper<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedMapper")
            .field("entity", &self.entity)
            .field("versions", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A resolved (entity, version) rule. Applying it cannot fail.
pub struct Projection<E, D> {
    entity: &'static str,
    version: ApiVersion,
    rule: Rule<E, D>,
}

impl<E, D> Clone for Projection<E, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, D> Copy for Projection<E, D> {}

impl<E, D> Projection<E, D> {
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn apply(&self, item: &E) -> D {
        (self.rule)(item)
    }

    pub fn apply_all(&self, items: &[E]) -> Vec<D> {
        items.iter().map(|item| (self.rule)(item)).collect()
    }
}

impl<E, D> fmt::Debug for Projection<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("entity", &self.entity)
            .field("version", &self.version)
            .finish()
    }
}

/// All mapping registries, built once at startup.
#[derive(Debug)]
pub struct Mappers {
    pub regions: VersionedMapper<Region, RegionDto>,
    pub walks: VersionedMapper<Walk, WalkDto>,
}

impl Mappers {
    /// Register every rule and verify coverage.
    ///
    /// Regions must cover every [`ApiVersion`]; walks are unversioned and
    /// register a single shape under [`UNVERSIONED`].
    pub fn build() -> Result<Self, CoreError> {
        let regions: VersionedMapper<Region, RegionDto> = VersionedMapper::new(Region::NAME)
            .register(ApiVersion::V1, |r| RegionDto::V1(region_to_v1(r)))
            .register(ApiVersion::V2, |r| RegionDto::V2(region_to_v2(r)));
        regions.ensure_registered(ApiVersion::all())?;

        let walks: VersionedMapper<Walk, WalkDto> =
            VersionedMapper::new(Walk::NAME).register(UNVERSIONED, walk_to_dto);
        walks.ensure_registered(&[UNVERSIONED])?;

        Ok(Self { regions, walks })
    }

    pub fn walk_projection(&self) -> Result<Projection<Walk, WalkDto>, CoreError> {
        self.walks.resolve_version(UNVERSIONED)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;
    use crate::difficulty::DIFFICULTY_ID_HARD;
    use crate::region::{seed_regions, REGION_ID_NORTHLAND, REGION_NAME_MAX_LEN};

    fn northland() -> Region {
        Region {
            id: Uuid::new_v4(),
            code: "NTH".into(),
            name: "Northland".into(),
            region_image_url: None,
        }
    }

    fn shared_fields(region: &Region) -> NewRegion {
        NewRegion {
            code: region.code.clone(),
            name: region.name.clone(),
            region_image_url: region.region_image_url.clone(),
        }
    }

    // -- Region projections --

    #[test]
    fn northland_maps_to_both_shapes() {
        let mappers = Mappers::build().unwrap();
        let region = northland();

        let v1 = serde_json::to_value(mappers.regions.to_dto(&region, "v1").unwrap()).unwrap();
        let v2 = serde_json::to_value(mappers.regions.to_dto(&region, "v2").unwrap()).unwrap();

        assert_eq!(
            v1,
            serde_json::json!({
                "id": region.id,
                "code": "NTH",
                "name": "Northland",
                "regionImageUrl": null,
            })
        );
        assert_eq!(
            v2,
            serde_json::json!({
                "id": region.id,
                "code": "NTH",
                "regionName": "Northland",
                "regionImageUrl": null,
            })
        );
    }

    #[test]
    fn renamed_field_carries_same_value() {
        for region in seed_regions() {
            assert_eq!(region_to_v1(&region).name, region_to_v2(&region).region_name);
        }
    }

    #[test]
    fn round_trip_preserves_shared_fields() {
        let mut regions = seed_regions();
        regions.push(northland());

        for region in regions {
            let from_v1 = region_to_v1(&region).to_domain().unwrap();
            let from_v2 = region_to_v2(&region).to_domain().unwrap();
            assert_eq!(from_v1, shared_fields(&region));
            assert_eq!(from_v2, shared_fields(&region));
        }
    }

    #[test]
    fn round_trip_keeps_values_outside_request_rules() {
        let region = Region {
            id: Uuid::new_v4(),
            code: "NTHL".into(),
            name: "N".repeat(150),
            region_image_url: Some("https://example.com/nthl.png".into()),
        };

        assert_eq!(region_to_v1(&region).to_domain().unwrap(), shared_fields(&region));
        assert_eq!(region_to_v2(&region).to_domain().unwrap(), shared_fields(&region));
    }

    #[test]
    fn optional_image_url_stays_null() {
        let dto = region_to_v1(&northland());
        assert_eq!(dto.region_image_url, None);
    }

    // -- Version resolution --

    #[test]
    fn unknown_version_is_configuration_error() {
        let mappers = Mappers::build().unwrap();
        assert_matches!(
            mappers.regions.to_dto(&northland(), "v7"),
            Err(CoreError::Configuration(_))
        );
    }

    #[test]
    fn list_with_unknown_version_produces_nothing() {
        let mappers = Mappers::build().unwrap();
        let result = mappers.regions.to_dtos(&seed_regions(), "v3");
        assert_matches!(result, Err(CoreError::Configuration(_)));
    }

    #[test]
    fn list_preserves_order() {
        let mappers = Mappers::build().unwrap();
        let regions = seed_regions();
        let dtos = mappers.regions.to_dtos(&regions, "v2").unwrap();
        let ids: Vec<_> = dtos.iter().map(RegionDto::id).collect();
        let expected: Vec<_> = regions.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn unregistered_version_is_rejected_even_if_parsable() {
        let walks: VersionedMapper<Walk, WalkDto> =
            VersionedMapper::new("Walk").register(UNVERSIONED, walk_to_dto);
        assert_matches!(walks.resolve("v2"), Err(CoreError::Configuration(_)));
    }

    #[test]
    fn missing_registration_fails_coverage_check() {
        let partial: VersionedMapper<Region, RegionDto> = VersionedMapper::new("Region")
            .register(ApiVersion::V1, |r| RegionDto::V1(region_to_v1(r)));
        let err = partial.ensure_registered(ApiVersion::all()).unwrap_err();
        assert!(err.to_string().contains("v2"), "{err}");
    }

    #[test]
    fn projection_reports_resolved_version() {
        let mappers = Mappers::build().unwrap();
        let projection = mappers.regions.resolve("2.0").unwrap();
        assert_eq!(projection.version(), ApiVersion::V2);
        assert_eq!(projection.entity(), "Region");
        assert_eq!(mappers.regions.versions().count(), 2);
    }

    // -- Request validation --

    #[test]
    fn empty_code_fails_on_code() {
        let request = AddRegionRequest {
            code: Some(String::new()),
            name: Some("Northland".into()),
            region_image_url: None,
        };
        assert_matches!(request.to_domain(), Err(CoreError::Validation(errors)) => {
            assert!(errors.contains("code"));
            assert!(!errors.contains("name"));
        });
    }

    #[test]
    fn missing_fields_reported_together() {
        let request = AddRegionRequest::default();
        assert_matches!(request.to_domain(), Err(CoreError::Validation(errors)) => {
            assert!(errors.contains("code"));
            assert!(errors.contains("name"));
        });
    }

    #[test]
    fn name_limit_is_inclusive() {
        let request = |len: u64| AddRegionRequest {
            code: Some("NTL".into()),
            name: Some("n".repeat(len as usize)),
            region_image_url: None,
        };
        assert!(request(REGION_NAME_MAX_LEN).to_domain().is_ok());
        assert_matches!(
            request(REGION_NAME_MAX_LEN + 1).to_domain(),
            Err(CoreError::Validation(errors)) => assert!(errors.contains("name"))
        );
    }

    #[test]
    fn valid_update_request_maps_without_id() {
        let request = UpdateRegionRequest {
            code: Some("NTL".into()),
            name: Some("Northland".into()),
            region_image_url: Some("https://example.com/n.png".into()),
        };
        let region = request.to_domain().unwrap();
        assert_eq!(region.code, "NTL");
        assert_eq!(region.region_image_url.as_deref(), Some("https://example.com/n.png"));
    }

    #[test]
    fn walk_request_validates_length_and_references() {
        let request = AddWalkRequest {
            name: Some("Tongariro Crossing".into()),
            description: Some("Alpine crossing".into()),
            length_in_km: Some(-1.0),
            walk_image_url: None,
            difficulty_id: None,
            region_id: Some(REGION_ID_NORTHLAND),
        };
        assert_matches!(request.to_domain(), Err(CoreError::Validation(errors)) => {
            assert!(errors.contains("lengthInKm"));
            assert!(errors.contains("difficultyId"));
            assert!(!errors.contains("regionId"));
        });
    }

    #[test]
    fn walk_request_maps_to_new_walk() {
        let request = UpdateWalkRequest {
            name: Some("Tongariro Crossing".into()),
            description: Some("Alpine crossing".into()),
            length_in_km: Some(19.4),
            walk_image_url: None,
            difficulty_id: Some(DIFFICULTY_ID_HARD),
            region_id: Some(REGION_ID_NORTHLAND),
        };
        let walk = request.to_domain().unwrap();
        assert_eq!(walk.length_in_km, 19.4);
        assert_eq!(walk.difficulty_id, DIFFICULTY_ID_HARD);
    }

    // -- Walk shape --

    #[test]
    fn walk_dto_nests_summaries() {
        let region = northland();
        let mut walk = Walk::from_new(
            Uuid::new_v4(),
            NewWalk {
                name: "Cape Reinga".into(),
                description: "Lighthouse walk".into(),
                length_in_km: 1.0,
                walk_image_url: None,
                difficulty_id: DIFFICULTY_ID_HARD,
                region_id: region.id,
            },
        );
        walk.region = Some(region.clone());

        let mappers = Mappers::build().unwrap();
        let dto = mappers.walk_projection().unwrap().apply(&walk);
        assert_eq!(dto.region, Some(region_to_v1(&region)));
        assert_eq!(dto.difficulty, None);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["lengthInKm"], 1.0);
        assert_eq!(json["region"]["name"], "Northland");
        assert!(json["difficulty"].is_null());
    }
}
