use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::profile::ProfileFilter;
use crate::error::{Result, StorageError};
use crate::models::{ProfileRecord, ProfileRow};

const PROFILE_COLUMNS: &str = r#"
    profile_id, full_name, gender,
    birth_year, birth_month, birth_day, birth_hour, birth_minute,
    birth_place, height_value, height_unit, weight_value, weight_unit,
    astrological_sign, calculated_age, is_eligible,
    created_at, updated_at, ip_address, user_agent
"#;

pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every submission matching `filter`, newest first
    pub async fn list(&self, filter: &ProfileFilter) -> Result<Vec<ProfileRecord>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        query.push(PROFILE_COLUMNS);
        query.push(" FROM personal_details WHERE 1=1");
        push_filter(&mut query, filter);
        query.push(" ORDER BY created_at DESC, profile_id");

        let rows: Vec<ProfileRow> = query.build_query_as().fetch_all(self.pool).await?;
        tracing::debug!(count = rows.len(), "Loaded personal details");

        rows.into_iter().map(ProfileRecord::try_from).collect()
    }

    /// One page of submissions matching `filter`, newest first, with the
    /// total number of matches.
    pub async fn page(
        &self,
        filter: &ProfileFilter,
        params: PaginationParams,
    ) -> Result<(Vec<ProfileRecord>, u64)> {
        let total = self.count(filter).await?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        query.push(PROFILE_COLUMNS);
        query.push(" FROM personal_details WHERE 1=1");
        push_filter(&mut query, filter);
        query.push(" ORDER BY created_at DESC, profile_id LIMIT ");
        query.push_bind(i64::try_from(params.limit()).unwrap_or(i64::MAX));
        query.push(" OFFSET ");
        query.push_bind(i64::try_from(params.offset()).unwrap_or(i64::MAX));

        let rows: Vec<ProfileRow> = query.build_query_as().fetch_all(self.pool).await?;
        tracing::debug!(count = rows.len(), total, "Loaded page of personal details");

        let records = rows
            .into_iter()
            .map(ProfileRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((records, total))
    }

    async fn count(&self, filter: &ProfileFilter) -> Result<u64> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM personal_details WHERE 1=1");
        push_filter(&mut query, filter);

        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Find a submission by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<ProfileRecord> {
        let sql = format!(
            "SELECT {} FROM personal_details WHERE profile_id = $1",
            PROFILE_COLUMNS
        );

        let row: ProfileRow = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        ProfileRecord::try_from(row)
    }

    /// Insert a fully derived record
    pub async fn create(&self, record: &ProfileRecord) -> Result<ProfileRecord> {
        let sql = format!(
            r#"
            INSERT INTO personal_details (
                profile_id, full_name, gender,
                birth_year, birth_month, birth_day, birth_hour, birth_minute,
                birth_place, height_value, height_unit, weight_value, weight_unit,
                astrological_sign, calculated_age, is_eligible,
                created_at, updated_at, ip_address, user_agent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let time = record.time_of_birth;

        let row: ProfileRow = sqlx::query_as(&sql)
            .bind(record.profile_id)
            .bind(&record.full_name)
            .bind(record.gender.as_str())
            .bind(record.date_of_birth.year)
            .bind(record.date_of_birth.month as i32)
            .bind(record.date_of_birth.day as i32)
            .bind(time.map(|t| t.hour as i32))
            .bind(time.map(|t| t.minute as i32))
            .bind(&record.birth_place)
            .bind(record.height.value.as_deref())
            .bind(record.height.unit.as_str())
            .bind(record.weight.value)
            .bind(record.weight.unit.as_str())
            .bind(record.astrological_sign.map(|s| s.as_str()))
            .bind(record.calculated_age)
            .bind(record.is_eligible)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.origin.ip_address.as_deref())
            .bind(record.origin.user_agent.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).classify())?;

        ProfileRecord::try_from(row)
    }

    /// Apply `change` to a submission while holding its row lock.
    ///
    /// The row is read with `FOR UPDATE` and written back in the same
    /// transaction, so concurrent partial updates cannot overwrite each
    /// other's fields. `created_at` and origin metadata are write-once.
    pub async fn update_with<F>(&self, id: Uuid, change: F) -> Result<ProfileRecord>
    where
        F: FnOnce(&mut ProfileRecord),
    {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {} FROM personal_details WHERE profile_id = $1 FOR UPDATE",
            PROFILE_COLUMNS
        );
        let row: ProfileRow = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        let mut record = ProfileRecord::try_from(row)?;
        change(&mut record);

        let stored = store(&mut *tx, &record).await?;
        tx.commit().await?;

        Ok(stored)
    }

    /// Delete a submission by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM personal_details WHERE profile_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ProfileFilter) {
    if let Some(gender) = filter.gender {
        query.push(" AND gender = ");
        query.push_bind(gender.as_str());
    }

    if let Some(sign) = filter.astrological_sign {
        query.push(" AND astrological_sign = ");
        query.push_bind(sign.as_str());
    }

    if let Some(is_eligible) = filter.is_eligible {
        query.push(" AND is_eligible = ");
        query.push_bind(is_eligible);
    }

    if let Some(min_age) = filter.min_age {
        query.push(" AND calculated_age >= ");
        query.push_bind(min_age);
    }

    if let Some(max_age) = filter.max_age {
        query.push(" AND calculated_age <= ");
        query.push_bind(max_age);
    }
}

/// Writes the mutable fields of `record` back to its row.
async fn store(conn: &mut PgConnection, record: &ProfileRecord) -> Result<ProfileRecord> {
    let sql = format!(
        r#"
        UPDATE personal_details
        SET full_name = $2,
            gender = $3,
            birth_year = $4,
            birth_month = $5,
            birth_day = $6,
            birth_hour = $7,
            birth_minute = $8,
            birth_place = $9,
            height_value = $10,
            height_unit = $11,
            weight_value = $12,
            weight_unit = $13,
            astrological_sign = $14,
            calculated_age = $15,
            is_eligible = $16,
            updated_at = $17
        WHERE profile_id = $1
        RETURNING {}
        "#,
        PROFILE_COLUMNS
    );

    let time = record.time_of_birth;

    let row: ProfileRow = sqlx::query_as(&sql)
        .bind(record.profile_id)
        .bind(&record.full_name)
        .bind(record.gender.as_str())
        .bind(record.date_of_birth.year)
        .bind(record.date_of_birth.month as i32)
        .bind(record.date_of_birth.day as i32)
        .bind(time.map(|t| t.hour as i32))
        .bind(time.map(|t| t.minute as i32))
        .bind(&record.birth_place)
        .bind(record.height.value.as_deref())
        .bind(record.height.unit.as_str())
        .bind(record.weight.value)
        .bind(record.weight.unit.as_str())
        .bind(record.astrological_sign.map(|s| s.as_str()))
        .bind(record.calculated_age)
        .bind(record.is_eligible)
        .bind(record.updated_at)
        .fetch_optional(conn)
        .await
        .map_err(|e| StorageError::from(e).classify())?
        .ok_or(StorageError::NotFound)?;

    ProfileRecord::try_from(row)
}
