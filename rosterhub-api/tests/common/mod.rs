/// Common test utilities for integration tests
///
/// Provides shared infrastructure for driving the router end-to-end:
/// - Test database setup (migrations + per-context manager fixtures)
/// - JSON request helpers over `tower::Service`
/// - Cleanup of everything a context created

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rosterhub_api::app::{build_router, AppState};
use rosterhub_api::config::Config;
use rosterhub_shared::models::manager::{Manager, NewManager};
use serde_json::Value;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
///
/// Each context seeds its own managers: two active, one inactive. User
/// records created through the API land on one of the context's active
/// managers as long as the test database holds no other active managers
/// (run the suite with `--test-threads=1`).
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub managers: Vec<Manager>,
}

impl TestContext {
    /// Creates a new test context against a migrated database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        let mut managers = Vec::new();
        for i in 0..2 {
            managers.push(
                Manager::create(
                    &db,
                    NewManager {
                        name: format!("Test Manager {}", i),
                        email: format!("manager-{}@example.com", Uuid::new_v4()),
                        is_active: true,
                    },
                )
                .await?,
            );
        }
        managers.push(
            Manager::create(
                &db,
                NewManager {
                    name: "Inactive Manager".to_string(),
                    email: format!("inactive-{}@example.com", Uuid::new_v4()),
                    is_active: false,
                },
            )
            .await?,
        );

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app, managers })
    }

    /// The context's first active manager
    pub fn active_manager(&self) -> &Manager {
        &self.managers[0]
    }

    /// The context's second active manager (reassignment target)
    pub fn other_active_manager(&self) -> &Manager {
        &self.managers[1]
    }

    /// The context's inactive manager
    pub fn inactive_manager(&self) -> &Manager {
        &self.managers[2]
    }

    fn manager_ids(&self) -> Vec<Uuid> {
        self.managers.iter().map(|m| m.manager_id).collect()
    }

    /// Flags every manager in the database inactive, returning the ids of
    /// those that were active so the caller can restore them
    pub async fn deactivate_all_managers(&self) -> anyhow::Result<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("UPDATE managers SET is_active = FALSE WHERE is_active = TRUE RETURNING manager_id")
                .fetch_all(&self.db)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Restores the given managers to active
    pub async fn reactivate_managers(&self, ids: &[Uuid]) -> anyhow::Result<()> {
        sqlx::query("UPDATE managers SET is_active = TRUE WHERE manager_id = ANY($1)")
            .bind(ids)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Cleans up test data created under this context's managers
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        let ids = self.manager_ids();
        sqlx::query("DELETE FROM users WHERE manager_id = ANY($1)")
            .bind(&ids)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM managers WHERE manager_id = ANY($1)")
            .bind(&ids)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Sends a JSON POST and returns the status plus parsed body
pub async fn post_json(ctx: &TestContext, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(ctx, request).await
}

/// Sends a POST with an arbitrary body; `content_type` of `None` omits the
/// header entirely
pub async fn post_raw(
    ctx: &TestContext,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    send(ctx, request).await
}

/// Sends a GET and returns the status plus parsed body
pub async fn get(ctx: &TestContext, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(ctx, request).await
}

async fn send(ctx: &TestContext, request: Request<Body>) -> (StatusCode, Value) {
    let mut app = ctx.app.clone();
    let response = app.call(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

/// Creates a user via the API and returns the stored record
pub async fn create_test_user(
    ctx: &TestContext,
    full_name: &str,
    mob_num: &str,
    pan_num: &str,
) -> Value {
    let (status, body) = post_json(
        ctx,
        "/create_user",
        serde_json::json!({
            "full_name": full_name,
            "mob_num": mob_num,
            "pan_num": pan_num,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    assert_eq!(body["success"], true);
    body["data"].clone()
}
