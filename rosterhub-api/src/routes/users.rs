/// User record lifecycle endpoints
///
/// Each handler is a single state transition: validate and normalize input,
/// consult the manager directory when an assignment is needed, then read or
/// write through the user record store. Validation fails fast on the first
/// invalid field with a 400 naming the problem.
///
/// # Endpoints
///
/// - `POST /create_user` - Create a record, assigning a random active manager
/// - `POST /get_users` - List records by optional equality filters
/// - `POST /delete_user` - Hard-delete one record by `user_id` or `mob_num`
/// - `POST /update_user` - Bulk in-place patch, or manager reassignment when
///   the patch contains `manager_id` and nothing else

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode};
use rosterhub_shared::{
    models::{
        manager::{self, Manager},
        user::{DeleteKey, NewUserRecord, UserFilter, UserPatch, UserRecord},
    },
    validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub full_name: Option<String>,
    pub mob_num: Option<String>,
    pub pan_num: Option<String>,
}

/// Create user response
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub message: String,
    pub data: UserRecord,
}

/// List users request; all filters optional
#[derive(Debug, Deserialize)]
pub struct GetUsersRequest {
    pub user_id: Option<Uuid>,
    pub mob_num: Option<String>,
    pub manager_id: Option<Uuid>,
}

/// List users response
#[derive(Debug, Serialize)]
pub struct GetUsersResponse {
    pub success: bool,
    pub users: Vec<UserRecord>,
}

/// Delete user request; exactly one key expected
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: Option<Uuid>,
    pub mob_num: Option<String>,
}

/// Update user request
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user_ids: Option<Vec<Uuid>>,
    pub update_data: Option<UpdateData>,
}

/// Recognized update fields; unknown fields are ignored by deserialization
#[derive(Debug, Default, Deserialize)]
pub struct UpdateData {
    pub full_name: Option<String>,
    pub mob_num: Option<String>,
    pub pan_num: Option<String>,
    pub manager_id: Option<Uuid>,
}

/// Plain confirmation response for delete/update
#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub success: bool,
    pub message: String,
}

/// Creates a user record with a randomly assigned active manager
///
/// # Endpoint
///
/// ```text
/// POST /create_user
/// Content-Type: application/json
///
/// {
///   "full_name": "Jane Doe",
///   "mob_num": "+911234567890",
///   "pan_num": "abcde1234f"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty fields, invalid mobile or PAN,
///   no active managers available
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<CreateUserResponse>)> {
    let (Some(full_name), Some(mob_num), Some(pan_num)) = (req.full_name, req.mob_num, req.pan_num)
    else {
        return Err(ApiError::BadRequest(
            "Missing required fields: full_name, mob_num, pan_num".to_string(),
        ));
    };

    if !validation::validate_required(&full_name) {
        return Err(ApiError::BadRequest("Full name cannot be empty".to_string()));
    }

    let mobile = validation::validate_mobile(&mob_num);
    if !mobile.valid {
        return Err(ApiError::BadRequest(
            "Invalid mobile number. Must be a valid 10-digit number".to_string(),
        ));
    }

    let pan = validation::validate_pan(&pan_num);
    if !pan.valid {
        return Err(ApiError::BadRequest(
            "Invalid PAN number. Format: ABCDE1234F".to_string(),
        ));
    }

    // Auto-assign an active manager (random selection for load balancing)
    let managers = Manager::list_active(&state.db).await?;
    let Some(assigned) = manager::pick_random(&managers, &mut rand::thread_rng()) else {
        return Err(ApiError::BadRequest(
            "No active managers available".to_string(),
        ));
    };

    let record = UserRecord::insert(
        &state.db,
        NewUserRecord {
            user_id: Uuid::new_v4(),
            full_name: full_name.trim().to_string(),
            mob_num: mobile.cleaned,
            pan_num: pan.cleaned,
            manager_id: assigned.manager_id,
        },
    )
    .await?;

    tracing::info!(
        user_id = %record.user_id,
        manager_id = %record.manager_id,
        "user created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            success: true,
            message: "User created successfully".to_string(),
            data: record,
        }),
    ))
}

/// Lists user records by optional equality filters
///
/// A raw `mob_num` filter is normalized before matching but its validity is
/// not re-checked; an invalid value simply matches nothing. Scope is active
/// records only.
pub async fn get_users(
    State(state): State<AppState>,
    Json(req): Json<GetUsersRequest>,
) -> ApiResult<Json<GetUsersResponse>> {
    let filter = UserFilter {
        user_id: req.user_id,
        mob_num: req
            .mob_num
            .map(|raw| validation::validate_mobile(&raw).cleaned),
        manager_id: req.manager_id,
        include_inactive: false,
    };

    let users = UserRecord::find_many(&state.db, &filter).await?;

    tracing::info!(count = users.len(), "retrieved users");

    Ok(Json(GetUsersResponse {
        success: true,
        users,
    }))
}

/// Hard-deletes a single user record
///
/// Requires `user_id` or `mob_num`; `user_id` wins when both are given.
///
/// # Errors
///
/// - `400 Bad Request`: neither key given
/// - `404 Not Found`: no record matched
pub async fn delete_user(
    State(state): State<AppState>,
    Json(req): Json<DeleteUserRequest>,
) -> ApiResult<Json<ConfirmationResponse>> {
    let key = match (req.user_id, req.mob_num) {
        (Some(user_id), _) => DeleteKey::UserId(user_id),
        (None, Some(raw)) => DeleteKey::Mobile(validation::validate_mobile(&raw).cleaned),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either user_id or mob_num is required".to_string(),
            ))
        }
    };

    let deleted = UserRecord::delete_one(&state.db, &key)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %deleted.user_id, "user deleted");

    Ok(Json(ConfirmationResponse {
        success: true,
        message: "User deleted successfully".to_string(),
    }))
}

/// Updates user records in bulk
///
/// Validates each recognized field of `update_data`, then dispatches:
///
/// - patch contains `manager_id` and nothing else: manager reassignment —
///   matched records are flagged inactive and superseded by fresh-id active
///   clones carrying the new manager
/// - anything else: in-place patch of all matched records with an
///   `updated_at` refresh; 404 when no record carried any of the ids
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty `user_ids` or `update_data`, invalid
///   field value, unknown or inactive `manager_id`
/// - `404 Not Found`: in-place patch matched zero records
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<ConfirmationResponse>> {
    let user_ids = match req.user_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => {
            return Err(ApiError::BadRequest(
                "user_ids array is required".to_string(),
            ))
        }
    };

    let Some(update_data) = req.update_data else {
        return Err(ApiError::BadRequest(
            "update_data object is required".to_string(),
        ));
    };

    let mut patch = UserPatch::default();

    if let Some(full_name) = update_data.full_name {
        if !validation::validate_required(&full_name) {
            return Err(ApiError::BadRequest("Full name cannot be empty".to_string()));
        }
        patch.full_name = Some(full_name.trim().to_string());
    }

    if let Some(raw) = update_data.mob_num {
        let mobile = validation::validate_mobile(&raw);
        if !mobile.valid {
            return Err(ApiError::BadRequest(
                "Invalid mobile number. Must be a valid 10-digit number".to_string(),
            ));
        }
        patch.mob_num = Some(mobile.cleaned);
    }

    if let Some(raw) = update_data.pan_num {
        let pan = validation::validate_pan(&raw);
        if !pan.valid {
            return Err(ApiError::BadRequest(
                "Invalid PAN number. Format: ABCDE1234F".to_string(),
            ));
        }
        patch.pan_num = Some(pan.cleaned);
    }

    if let Some(manager_id) = update_data.manager_id {
        if Manager::find_active(&state.db, manager_id).await?.is_none() {
            return Err(ApiError::BadRequest(
                "Invalid or inactive manager_id".to_string(),
            ));
        }
        patch.manager_id = Some(manager_id);
    }

    if patch.is_empty() {
        return Err(ApiError::BadRequest(
            "update_data object is required".to_string(),
        ));
    }

    // Manager-only patch supersedes records instead of mutating them
    if let UserPatch {
        full_name: None,
        mob_num: None,
        pan_num: None,
        manager_id: Some(new_manager_id),
    } = patch
    {
        let created = UserRecord::reassign_manager(&state.db, &user_ids, new_manager_id).await?;

        tracing::info!(
            reassigned = created.len(),
            manager_id = %new_manager_id,
            "users reassigned to new manager"
        );

        return Ok(Json(ConfirmationResponse {
            success: true,
            message: "Users updated with new manager successfully".to_string(),
        }));
    }

    let updated = UserRecord::update_many(&state.db, &user_ids, &patch).await?;

    if updated == 0 {
        return Err(ApiError::NotFound(
            "No users found with provided user_ids".to_string(),
        ));
    }

    tracing::info!(updated, "users updated");

    Ok(Json(ConfirmationResponse {
        success: true,
        message: format!("{} user(s) updated successfully", updated),
    }))
}
