//! Seeds the managers table with a sample manager set.
//!
//! Clears any existing managers and inserts three active managers plus one
//! inactive one (useful for exercising the liveness checks). Prints the
//! seeded ids for use in manual testing.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/rosterhub cargo run -p rosterhub-api --bin seed-managers
//! ```

use rosterhub_api::config::Config;
use rosterhub_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use rosterhub_shared::models::manager::{Manager, NewManager};

fn sample_managers() -> Vec<NewManager> {
    vec![
        NewManager {
            name: "John Manager".to_string(),
            email: "john.manager@example.com".to_string(),
            is_active: true,
        },
        NewManager {
            name: "Sarah Director".to_string(),
            email: "sarah.director@example.com".to_string(),
            is_active: true,
        },
        NewManager {
            name: "Mike Supervisor".to_string(),
            email: "mike.supervisor@example.com".to_string(),
            is_active: true,
        },
        NewManager {
            name: "Emily Lead".to_string(),
            email: "emily.lead@example.com".to_string(),
            is_active: false,
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: 2,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    // User rows hold FK references to managers, so they go first
    sqlx::query("DELETE FROM users").execute(&pool).await?;
    let cleared = Manager::delete_all(&pool).await?;
    tracing::info!(cleared, "cleared existing managers");

    println!("Sample manager IDs (use these for testing):");
    for data in sample_managers() {
        let manager = Manager::create(&pool, data).await?;
        println!(
            "- {}: {} (active: {})",
            manager.name, manager.manager_id, manager.is_active
        );
    }

    Ok(())
}
