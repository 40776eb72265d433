use axum::{Json, extract::{Query, State}, http::StatusCode, Extension};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    app_state::SharedState, caller::Caller, user::User, user_add_request::UserAddRequest,
    user_get_response::UserGetResponse,
};

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub id: Uuid,
}

pub struct UserController {}

// Provisioning surface, superuser only. User lookups are not subject to the
// task anti-enumeration policy, so a plain 403 is returned here.
impl UserController {
    fn require_superuser(caller: &Caller) -> Result<(), (StatusCode, String)> {
        if !caller.is_superuser {
            return Err((StatusCode::FORBIDDEN, "Superuser access required".to_string()));
        }
        Ok(())
    }

    pub async fn get(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Query(query): Query<UserQuery>,
    ) -> Result<Json<UserGetResponse>, (StatusCode, String)> {
        Self::require_superuser(&caller)?;
        match state.data_context.get_user(query.id) {
            Ok(Some(user)) => Ok(Json(user.to_get_dto())),
            Ok(None) => Err((StatusCode::NOT_FOUND, "User not found".to_string())),
            Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Error while getting user: {}", e))),
        }
    }

    pub async fn get_all(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
    ) -> Result<Json<Vec<UserGetResponse>>, (StatusCode, String)> {
        Self::require_superuser(&caller)?;
        state
            .data_context
            .list_users()
            .map(|vec| Json(vec.into_iter().map(|u| u.to_get_dto()).collect()))
            .map_err(|e| {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error while getting users: {}", e))
            })
    }

    pub async fn add(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Json(body): Json<UserAddRequest>,
    ) -> Result<StatusCode, (StatusCode, String)> {
        Self::require_superuser(&caller)?;
        if state
            .data_context
            .get_user_by_username(&body.username)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
            .is_some()
        {
            return Err((StatusCode::CONFLICT, "Username already taken".to_string()));
        }
        let user = User::new(body);
        match state.data_context.create_user(&user) {
            Ok(_) => Ok(StatusCode::CREATED),
            Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Error inserting user: {}", e))),
        }
    }
}
