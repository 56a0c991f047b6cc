/// Database models for rosterhub
///
/// This module contains the persistent models and their store operations.
///
/// # Models
///
/// - `user`: User records with soft-delete/supersession semantics
/// - `manager`: Read-only manager directory with random selection
///
/// # Example
///
/// ```no_run
/// use rosterhub_shared::models::user::{NewUserRecord, UserRecord};
/// use rosterhub_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(manager_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let record = UserRecord::insert(
///     &pool,
///     NewUserRecord {
///         user_id: Uuid::new_v4(),
///         full_name: "Jane Doe".to_string(),
///         mob_num: "1234567890".to_string(),
///         pan_num: "ABCDE1234F".to_string(),
///         manager_id,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod manager;
pub mod user;
