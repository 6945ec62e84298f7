//! Repository for the `walks` table.
//!
//! Every read joins `difficulties` and `regions` so returned walks carry
//! their navigation values. Writes go through a CTE so the joined row comes
//! back from the same statement.

use async_trait::async_trait;
use nzwalks_core::entity::Entity;
use nzwalks_core::query::ListQuery;
use nzwalks_core::types::DbId;
use nzwalks_core::walk::{NewWalk, Walk, WalkField};
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::walk::WalkRow;
use crate::repositories::{direction, like_pattern, Repository};

/// Columns of [`WalkRow`], selected from `w` joined with `d` and `r`.
const JOINED_COLUMNS: &str = "\
    w.id, w.name, w.description, w.length_in_km, w.walk_image_url, \
    w.difficulty_id, w.region_id, \
    d.name AS difficulty_name, \
    r.code AS region_code, r.name AS region_name, r.region_image_url";

const JOINS: &str = "\
    JOIN difficulties d ON d.id = w.difficulty_id \
    JOIN regions r ON r.id = w.region_id";

const FK_DIFFICULTY: &str = "fk_walks_difficulty_id";
const FK_REGION: &str = "fk_walks_region_id";

/// PostgreSQL-backed walk repository.
#[derive(Debug, Clone)]
pub struct WalkRepo {
    pool: PgPool,
}

impl WalkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column(field: WalkField) -> &'static str {
    match field {
        WalkField::Name => "w.name",
        WalkField::Description => "w.description",
        WalkField::LengthInKm => "w.length_in_km",
    }
}

fn order_expr(field: WalkField) -> String {
    match field {
        WalkField::LengthInKm => column(field).to_string(),
        _ => format!("{} COLLATE \"C\"", column(field)),
    }
}

/// Turn a foreign key violation into [`DbError::MissingReference`].
fn map_write_error(err: sqlx::Error, input: &NewWalk) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23503") {
            match db_err.constraint() {
                Some(FK_DIFFICULTY) => {
                    return DbError::MissingReference {
                        field: "difficultyId",
                        entity: "Difficulty",
                        id: input.difficulty_id,
                    }
                }
                Some(FK_REGION) => {
                    return DbError::MissingReference {
                        field: "regionId",
                        entity: "Region",
                        id: input.region_id,
                    }
                }
                _ => {}
            }
        }
    }
    DbError::Sqlx(err)
}

#[async_trait]
impl Repository<Walk> for WalkRepo {
    async fn get_all(&self, query: &ListQuery) -> Result<Vec<Walk>, DbError> {
        let filter = query.filter::<WalkField>();
        let sort = order_expr(query.sort_field(Walk::DEFAULT_SORT));
        let dir = direction(query.ascending);

        let (where_clause, next) = match filter {
            Some((field, _)) => (format!("WHERE {} ILIKE $1", column(field)), 2),
            None => (String::new(), 1),
        };
        let sql = format!(
            "SELECT {JOINED_COLUMNS} FROM walks w {JOINS} {where_clause} \
             ORDER BY {sort} {dir}, w.id \
             LIMIT ${} OFFSET ${}",
            next,
            next + 1
        );

        let mut q = sqlx::query_as::<_, WalkRow>(&sql);
        if let Some((_, value)) = filter {
            q = q.bind(like_pattern(value));
        }
        let rows = q
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Walk::from).collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Walk>, DbError> {
        let sql = format!("SELECT {JOINED_COLUMNS} FROM walks w {JOINS} WHERE w.id = $1");
        let row = sqlx::query_as::<_, WalkRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Walk::from))
    }

    async fn create(&self, input: &NewWalk) -> Result<Walk, DbError> {
        let sql = format!(
            "WITH w AS ( \
                INSERT INTO walks \
                    (name, description, length_in_km, walk_image_url, difficulty_id, region_id) \
                VALUES ($1, $2, $3, $4, $5, $6) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM w {JOINS}"
        );
        let row = sqlx::query_as::<_, WalkRow>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.length_in_km)
            .bind(&input.walk_image_url)
            .bind(input.difficulty_id)
            .bind(input.region_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, input))?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &NewWalk) -> Result<Option<Walk>, DbError> {
        let sql = format!(
            "WITH w AS ( \
                UPDATE walks SET \
                    name = $2, description = $3, length_in_km = $4, \
                    walk_image_url = $5, difficulty_id = $6, region_id = $7 \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM w {JOINS}"
        );
        let row = sqlx::query_as::<_, WalkRow>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.length_in_km)
            .bind(&input.walk_image_url)
            .bind(input.difficulty_id)
            .bind(input.region_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, input))?;
        Ok(row.map(Walk::from))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Walk>, DbError> {
        let sql = format!(
            "WITH w AS (DELETE FROM walks WHERE id = $1 RETURNING *) \
             SELECT {JOINED_COLUMNS} FROM w {JOINS}"
        );
        let row = sqlx::query_as::<_, WalkRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Walk::from))
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
