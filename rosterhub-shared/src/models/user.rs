/// User record model and store operations
///
/// User records carry normalized contact fields (`mob_num`, `pan_num`) and a
/// reference to the manager they were assigned to at creation time. Records
/// are created active; a manager reassignment never mutates `manager_id` in
/// place but supersedes the record instead (see [`UserRecord::reassign_manager`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id UUID PRIMARY KEY,
///     full_name VARCHAR(255) NOT NULL,
///     mob_num VARCHAR(10) NOT NULL,
///     pan_num VARCHAR(10) NOT NULL,
///     manager_id UUID NOT NULL REFERENCES managers (manager_id),
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Callers are expected to pass `mob_num`/`pan_num` already normalized via
/// `crate::validation`; this module never normalizes on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// A user record
///
/// `user_id` is unique across all records ever created, active or not.
/// `is_active = false` marks a record as logically deleted or superseded;
/// rows are only physically removed by an explicit delete.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Unique record ID, generated at creation, immutable
    pub user_id: Uuid,

    /// Non-empty trimmed display name
    pub full_name: String,

    /// Normalized mobile number (exactly 10 decimal digits)
    pub mob_num: String,

    /// Normalized PAN identifier (5 letters, 4 digits, 1 letter)
    pub pan_num: String,

    /// Manager the record was assigned to; active at assignment time,
    /// not re-validated for liveness afterwards
    pub manager_id: Uuid,

    /// Soft-delete / supersession marker
    pub is_active: bool,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a user record
///
/// Fields must already be normalized. The record is created active with
/// `created_at = updated_at = now`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRecord {
    pub user_id: Uuid,
    pub full_name: String,
    pub mob_num: String,
    pub pan_num: String,
    pub manager_id: Uuid,
}

/// Equality filters for listing user records
///
/// Scope defaults to active records only; set `include_inactive` to widen it.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub user_id: Option<Uuid>,

    /// Normalized mobile number (caller normalizes before filtering)
    pub mob_num: Option<String>,

    pub manager_id: Option<Uuid>,

    pub include_inactive: bool,
}

/// Lookup key for deleting a single record
#[derive(Debug, Clone)]
pub enum DeleteKey {
    UserId(Uuid),

    /// Normalized mobile number; when several records share it, only one
    /// row is removed
    Mobile(String),
}

/// Fields to apply to matched records
///
/// All fields are optional; only present fields are written. Values must
/// already be validated and normalized by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub mob_num: Option<String>,
    pub pan_num: Option<String>,
    pub manager_id: Option<Uuid>,
}

impl UserPatch {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.mob_num.is_none()
            && self.pan_num.is_none()
            && self.manager_id.is_none()
    }

    /// True when the patch contains `manager_id` and nothing else
    ///
    /// This is the trigger for the supersession path: matched records are
    /// deactivated and replaced rather than mutated in place.
    pub fn is_manager_only(&self) -> bool {
        matches!(
            self,
            UserPatch {
                full_name: None,
                mob_num: None,
                pan_num: None,
                manager_id: Some(_),
            }
        )
    }
}

const USER_COLUMNS: &str =
    "user_id, full_name, mob_num, pan_num, manager_id, is_active, created_at, updated_at";

impl UserRecord {
    /// Inserts a new user record
    ///
    /// # Errors
    ///
    /// Fails if `user_id` collides with an existing record (primary key
    /// violation). Generation via UUID v4 makes this practically impossible,
    /// but the caller must still handle it.
    pub async fn insert(pool: &PgPool, data: NewUserRecord) -> Result<Self, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (user_id, full_name, mob_num, pan_num, manager_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(data.user_id)
        .bind(data.full_name)
        .bind(data.mob_num)
        .bind(data.pan_num)
        .bind(data.manager_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Lists records matching the filter
    ///
    /// Filters compose with AND; an empty filter returns all active records.
    pub async fn find_many(pool: &PgPool, filter: &UserFilter) -> Result<Vec<Self>, sqlx::Error> {
        // Build the WHERE clause from whichever filters are present
        let mut query = format!("SELECT {USER_COLUMNS} FROM users WHERE TRUE");
        let mut bind_count = 0;

        if filter.user_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND user_id = ${}", bind_count));
        }
        if filter.mob_num.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND mob_num = ${}", bind_count));
        }
        if filter.manager_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND manager_id = ${}", bind_count));
        }
        if !filter.include_inactive {
            query.push_str(" AND is_active = TRUE");
        }
        query.push_str(" ORDER BY created_at");

        let mut q = sqlx::query_as::<_, UserRecord>(&query);

        if let Some(user_id) = filter.user_id {
            q = q.bind(user_id);
        }
        if let Some(ref mob_num) = filter.mob_num {
            q = q.bind(mob_num);
        }
        if let Some(manager_id) = filter.manager_id {
            q = q.bind(manager_id);
        }

        q.fetch_all(pool).await
    }

    /// Hard-deletes at most one record matching the key
    ///
    /// Returns the removed record, or `None` if nothing matched. Matching by
    /// mobile number can hit several rows (superseded records keep their
    /// original `mob_num`); only one of them is removed, like the original
    /// find-one-and-delete contract.
    pub async fn delete_one(pool: &PgPool, key: &DeleteKey) -> Result<Option<Self>, sqlx::Error> {
        let record = match key {
            DeleteKey::UserId(user_id) => {
                sqlx::query_as::<_, UserRecord>(&format!(
                    "DELETE FROM users WHERE user_id = $1 RETURNING {USER_COLUMNS}"
                ))
                .bind(user_id)
                .fetch_optional(pool)
                .await?
            }
            DeleteKey::Mobile(mob_num) => {
                sqlx::query_as::<_, UserRecord>(&format!(
                    r#"
                    DELETE FROM users
                    WHERE user_id = (SELECT user_id FROM users WHERE mob_num = $1 ORDER BY created_at LIMIT 1)
                    RETURNING {USER_COLUMNS}
                    "#,
                ))
                .bind(mob_num)
                .fetch_optional(pool)
                .await?
            }
        };

        Ok(record)
    }

    /// Applies the patch in place to every record whose id is in `ids`
    ///
    /// `updated_at` is refreshed on every matched row. Returns the number of
    /// rows the update matched (zero means no record carried any of the ids).
    pub async fn update_many(
        pool: &PgPool,
        ids: &[Uuid],
        patch: &UserPatch,
    ) -> Result<u64, sqlx::Error> {
        // Build dynamic update query based on which fields are present;
        // $1 is always the id set
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.full_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", full_name = ${}", bind_count));
        }
        if patch.mob_num.is_some() {
            bind_count += 1;
            query.push_str(&format!(", mob_num = ${}", bind_count));
        }
        if patch.pan_num.is_some() {
            bind_count += 1;
            query.push_str(&format!(", pan_num = ${}", bind_count));
        }
        if patch.manager_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", manager_id = ${}", bind_count));
        }

        query.push_str(" WHERE user_id = ANY($1)");

        let mut q = sqlx::query(&query).bind(ids);

        if let Some(ref full_name) = patch.full_name {
            q = q.bind(full_name);
        }
        if let Some(ref mob_num) = patch.mob_num {
            q = q.bind(mob_num);
        }
        if let Some(ref pan_num) = patch.pan_num {
            q = q.bind(pan_num);
        }
        if let Some(manager_id) = patch.manager_id {
            q = q.bind(manager_id);
        }

        let result = q.execute(pool).await?;

        Ok(result.rows_affected())
    }

    /// Inserts many records on an open connection
    ///
    /// Used inside the reassignment transaction so a partial failure rolls
    /// the whole batch back instead of being silently ignored.
    pub async fn bulk_insert(
        conn: &mut PgConnection,
        records: &[NewUserRecord],
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut inserted = Vec::with_capacity(records.len());

        for data in records {
            let record = sqlx::query_as::<_, UserRecord>(&format!(
                r#"
                INSERT INTO users (user_id, full_name, mob_num, pan_num, manager_id, is_active, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, TRUE, NOW(), NOW())
                RETURNING {USER_COLUMNS}
                "#,
            ))
            .bind(data.user_id)
            .bind(&data.full_name)
            .bind(&data.mob_num)
            .bind(&data.pan_num)
            .bind(data.manager_id)
            .fetch_one(&mut *conn)
            .await?;

            inserted.push(record);
        }

        Ok(inserted)
    }

    /// Reassigns every record in `ids` to a new manager, preserving history
    ///
    /// Matched records are flagged inactive and, for each, a fresh record is
    /// inserted copying `full_name`/`mob_num`/`pan_num` with the new manager,
    /// a new `user_id`, and `is_active = true`.
    ///
    /// Only active records match: an id that was already superseded is
    /// skipped, so retrying or repeating a reassignment with the same ids
    /// clones nothing the second time. The deactivate/insert pair runs in
    /// one transaction with the matched rows locked `FOR UPDATE`; a crash
    /// can never strand half-migrated state, and of two overlapping
    /// reassignments the one that loses the row lock finds the records
    /// already inactive and leaves them alone.
    ///
    /// Returns the newly inserted records (empty when no active id matched).
    pub async fn reassign_manager(
        pool: &PgPool,
        ids: &[Uuid],
        new_manager_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let matched = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ANY($1) AND is_active = TRUE FOR UPDATE"
        ))
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE user_id = ANY($1) AND is_active = TRUE",
        )
        .bind(ids)
        .execute(&mut *tx)
        .await?;

        let replacements: Vec<NewUserRecord> = matched
            .iter()
            .map(|old| NewUserRecord {
                user_id: Uuid::new_v4(),
                full_name: old.full_name.clone(),
                mob_num: old.mob_num.clone(),
                pan_num: old.pan_num.clone(),
                manager_id: new_manager_id,
            })
            .collect();

        let inserted = Self::bulk_insert(&mut *tx, &replacements).await?;

        tx.commit().await?;

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_emptiness() {
        assert!(UserPatch::default().is_empty());

        let patch = UserPatch {
            full_name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_manager_only_classification() {
        let reassign = UserPatch {
            manager_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(reassign.is_manager_only());

        let mixed = UserPatch {
            full_name: Some("Jane Doe".to_string()),
            manager_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!mixed.is_manager_only());

        assert!(!UserPatch::default().is_manager_only());
    }

    #[test]
    fn test_filter_defaults_to_active_scope() {
        let filter = UserFilter::default();
        assert!(!filter.include_inactive);
        assert!(filter.user_id.is_none());
        assert!(filter.mob_num.is_none());
        assert!(filter.manager_id.is_none());
    }

    // Store operations against a live database are covered in
    // tests/user_store_tests.rs
}
