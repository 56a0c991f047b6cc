/// Manager directory
///
/// Managers are seeded out of band (see the `seed-managers` binary) and are
/// read-only at runtime: the service only lists active managers, checks
/// liveness of an explicit id, and picks one at random when assigning a new
/// user record.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE managers (
///     manager_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A manager eligible to have user records assigned to them
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Manager {
    /// Unique manager ID
    pub manager_id: Uuid,

    /// Display name (not validated by the core)
    pub name: String,

    /// Contact email (not validated by the core)
    pub email: String,

    /// Whether the manager is eligible for new assignments
    pub is_active: bool,

    /// When the manager was seeded
    pub created_at: DateTime<Utc>,
}

/// Input for seeding a manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewManager {
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

/// Uniformly selects one manager from a candidate set
///
/// Returns `None` when the candidate set is empty. The random source is
/// injected so tests can supply a seeded generator; the selection is
/// deterministic only in distribution, never in output.
pub fn pick_random<'a, R: Rng + ?Sized>(
    candidates: &'a [Manager],
    rng: &mut R,
) -> Option<&'a Manager> {
    candidates.choose(rng)
}

impl Manager {
    /// Lists all managers currently eligible for assignment
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let managers = sqlx::query_as::<_, Manager>(
            r#"
            SELECT manager_id, name, email, is_active, created_at
            FROM managers
            WHERE is_active = TRUE
            ORDER BY created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(managers)
    }

    /// Existence + liveness check for an explicit manager id
    ///
    /// Used when an update names a `manager_id` directly. Returns `None` for
    /// unknown ids and for managers that exist but are inactive.
    pub async fn find_active(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            SELECT manager_id, name, email, is_active, created_at
            FROM managers
            WHERE manager_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(manager)
    }

    /// Inserts a manager
    ///
    /// Only used by the seed binary and test fixtures; the service never
    /// creates managers at runtime.
    pub async fn create(pool: &PgPool, data: NewManager) -> Result<Self, sqlx::Error> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            INSERT INTO managers (manager_id, name, email, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING manager_id, name, email, is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.name)
        .bind(data.email)
        .bind(data.is_active)
        .fetch_one(pool)
        .await?;

        Ok(manager)
    }

    /// Removes all managers (seed binary only)
    ///
    /// Returns the number of rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM managers").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_managers(n: usize) -> Vec<Manager> {
        (0..n)
            .map(|i| Manager {
                manager_id: Uuid::new_v4(),
                name: format!("Manager {}", i),
                email: format!("manager{}@example.com", i),
                is_active: true,
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_pick_random_returns_member_of_candidate_set() {
        let managers = sample_managers(4);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let picked = pick_random(&managers, &mut rng).unwrap();
            assert!(managers.iter().any(|m| m.manager_id == picked.manager_id));
        }
    }

    #[test]
    fn test_pick_random_empty_set() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(pick_random(&[], &mut rng).is_none());
    }

    #[test]
    fn test_pick_random_single_candidate() {
        let managers = sample_managers(1);
        let mut rng = StdRng::seed_from_u64(7);

        let picked = pick_random(&managers, &mut rng).unwrap();
        assert_eq!(picked.manager_id, managers[0].manager_id);
    }

    #[test]
    fn test_pick_random_eventually_covers_all_candidates() {
        // Uniform choice over 3 candidates should hit every one of them
        // comfortably within 200 draws.
        let managers = sample_managers(3);
        let mut rng = StdRng::seed_from_u64(1234);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            let picked = pick_random(&managers, &mut rng).unwrap();
            seen.insert(picked.manager_id);
        }

        assert_eq!(seen.len(), 3);
    }
}
