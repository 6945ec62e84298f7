//! Repository for the `regions` table.

use async_trait::async_trait;
use nzwalks_core::entity::Entity;
use nzwalks_core::query::ListQuery;
use nzwalks_core::region::{NewRegion, Region, RegionField};
use nzwalks_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::region::RegionRow;
use crate::repositories::{direction, like_pattern, Repository};

/// Column list for regions queries.
const COLUMNS: &str = "id, code, name, region_image_url";

/// PostgreSQL-backed region repository.
#[derive(Debug, Clone)]
pub struct RegionRepo {
    pool: PgPool,
}

impl RegionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column(field: RegionField) -> &'static str {
    match field {
        RegionField::Code => "code",
        RegionField::Name => "name",
    }
}

#[async_trait]
impl Repository<Region> for RegionRepo {
    async fn get_all(&self, query: &ListQuery) -> Result<Vec<Region>, DbError> {
        let filter = query.filter::<RegionField>();
        let sort = column(query.sort_field(Region::DEFAULT_SORT));
        let dir = direction(query.ascending);

        let (where_clause, next) = match filter {
            Some((field, _)) => (format!("WHERE {} ILIKE $1", column(field)), 2),
            None => (String::new(), 1),
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM regions {where_clause} \
             ORDER BY {sort} COLLATE \"C\" {dir}, id \
             LIMIT ${} OFFSET ${}",
            next,
            next + 1
        );

        let mut q = sqlx::query_as::<_, RegionRow>(&sql);
        if let Some((_, value)) = filter {
            q = q.bind(like_pattern(value));
        }
        let rows = q
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Region::from).collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Region>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        let row = sqlx::query_as::<_, RegionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Region::from))
    }

    async fn create(&self, input: &NewRegion) -> Result<Region, DbError> {
        let sql = format!(
            "INSERT INTO regions (code, name, region_image_url) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RegionRow>(&sql)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.region_image_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &NewRegion) -> Result<Option<Region>, DbError> {
        let sql = format!(
            "UPDATE regions SET code = $2, name = $3, region_image_url = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RegionRow>(&sql)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.region_image_url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Region::from))
    }

    /// Walks in the region are removed by `ON DELETE CASCADE`.
    async fn delete(&self, id: DbId) -> Result<Option<Region>, DbError> {
        let sql = format!("DELETE FROM regions WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, RegionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Region::from))
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
