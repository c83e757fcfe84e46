use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::categories::create_category::CreateCategory;
use crate::application::use_cases::categories::list_categories::ListCategories;
use crate::bootstrap::app_context::AppContext;
use crate::domain::catalog::category::Category;
use crate::presentation::http::auth::{Bearer, require_admin};
use crate::presentation::http::error::{ApiError, MessageBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_categories))
        .route("/add", post(create_category))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/categories", tag = "Categories", security(()), responses(
    (status = 200, body = [CategoryResponse])
))]
pub async fn list_categories(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let repo = ctx.category_repo();
    let uc = ListCategories {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/categories/add", tag = "Categories", request_body = CreateCategoryRequest, responses(
    (status = 201, body = CategoryResponse),
    (status = 400, body = MessageBody)
))]
pub async fn create_category(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.category_repo();
    let uc = CreateCategory {
        repo: repo.as_ref(),
    };
    let created = uc.execute(&req.name, &req.slug).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
