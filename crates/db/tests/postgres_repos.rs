//! PostgreSQL repository tests. Need `DATABASE_URL`; run with `--ignored`.

use assert_matches::assert_matches;
use nzwalks_core::difficulty::DIFFICULTY_ID_MEDIUM;
use nzwalks_core::query::ListQuery;
use nzwalks_core::region::{Region, REGION_ID_NELSON};
use nzwalks_core::walk::{NewWalk, Walk};
use nzwalks_db::repositories::{RegionRepo, Repository, WalkRepo};
use nzwalks_db::DbError;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn seed_regions_are_present(pool: PgPool) {
    nzwalks_db::health_check(&pool).await.unwrap();
    let repo = RegionRepo::new(pool);
    let all: Vec<Region> = repo.get_all(&ListQuery::default()).await.unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].name, "Auckland");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn region_filter_escapes_wildcards(pool: PgPool) {
    let repo = RegionRepo::new(pool);
    let q = ListQuery {
        filter_on: Some("name".into()),
        filter_query: Some("%".into()),
        ..ListQuery::default()
    };
    assert!(repo.get_all(&q).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn walk_lifecycle_with_joins(pool: PgPool) {
    let walks = WalkRepo::new(pool.clone());
    let regions = RegionRepo::new(pool);

    let input = NewWalk {
        name: "Abel Tasman Coast Track".into(),
        description: "Golden beaches".into(),
        length_in_km: 48.5,
        walk_image_url: None,
        difficulty_id: DIFFICULTY_ID_MEDIUM,
        region_id: REGION_ID_NELSON,
    };
    let walk: Walk = walks.create(&input).await.unwrap();
    assert_eq!(walk.region.as_ref().map(|r| r.code.as_str()), Some("NSN"));
    assert_eq!(walk.difficulty.as_ref().map(|d| d.name.as_str()), Some("Medium"));

    let deleted = regions.delete(REGION_ID_NELSON).await.unwrap();
    assert!(deleted.is_some());
    assert!(walks.get_by_id(walk.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn walk_with_unknown_region_is_missing_reference(pool: PgPool) {
    let walks = WalkRepo::new(pool);
    let input = NewWalk {
        name: "Nowhere".into(),
        description: "None".into(),
        length_in_km: 1.0,
        walk_image_url: None,
        difficulty_id: DIFFICULTY_ID_MEDIUM,
        region_id: Uuid::new_v4(),
    };
    assert_matches!(
        walks.create(&input).await,
        Err(DbError::MissingReference { field: "regionId", .. })
    );
}
