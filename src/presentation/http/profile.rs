use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::profile::update_profile::UpdateProfile;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{Address, ProfileUpdate, User};
use crate::presentation::http::auth::{Bearer, authenticate};
use crate::presentation::http::error::{ApiError, MessageBody};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            street: a.street,
            city: a.city,
            state: a.state,
            zip_code: a.zip_code,
        }
    }
}

impl From<AddressDto> for Address {
    fn from(a: AddressDto) -> Self {
        Self {
            street: a.street,
            city: a.city,
            state: a.state,
            zip_code: a.zip_code,
        }
    }
}

/// Full user record without credentials.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<AddressDto>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            phone: u.phone,
            address: u.address.map(Into::into),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub user: ProfileResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/user/profile", tag = "User", responses(
    (status = 200, body = ProfileResponse),
    (status = 404, body = MessageBody)
))]
pub async fn get_profile(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<ProfileResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(caller.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user.into()))
}

#[utoipa::path(put, path = "/api/user/profile", tag = "User", request_body = UpdateProfileRequest, responses(
    (status = 200, body = ProfileUpdatedResponse),
    (status = 400, body = MessageBody),
    (status = 404, body = MessageBody)
))]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdatedResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = UpdateProfile {
        repo: repo.as_ref(),
    };
    let update = ProfileUpdate {
        name: req.name,
        phone: req.phone,
        address: req.address.map(Into::into),
    };
    let user = uc.execute(caller.id, update).await?;
    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".into(),
        user: user.into(),
    }))
}
