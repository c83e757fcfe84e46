use axum::{
    Json, Router,
    extract::{Multipart, Path as AxumPath, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::use_cases::books::create_book::{CreateBook, UploadedFile};
use crate::application::use_cases::books::delete_book::DeleteBook;
use crate::application::use_cases::books::download_book::DownloadBook;
use crate::application::use_cases::books::get_book::GetBook;
use crate::application::use_cases::books::list_books::ListBooks;
use crate::application::use_cases::books::list_by_category::ListBooksByCategory;
use crate::application::use_cases::books::update_book::UpdateBook;
use crate::bootstrap::app_context::AppContext;
use crate::domain::catalog::book::{Book, BookDetails, BookPatch};
use crate::presentation::http::auth::{Bearer, authenticate, require_admin};
use crate::presentation::http::error::{ApiError, MessageBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    /// Public URL of the cover image.
    pub cover_image: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            cover_image: cover_url(&b.cover_path),
            id: b.id,
            title: b.title,
            author: b.author,
            description: b.description,
            price: b.price,
            category: b.category,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

pub(crate) fn cover_url(cover_path: &str) -> String {
    format!("/api/uploads/{}", cover_path.trim_start_matches('/'))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive match against title or author.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub message: String,
    pub book: BookResponse,
}

/// Multipart form accepted by `POST /api/books/add`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AddBookMultipart {
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: String,
    pub description: String,
    #[schema(rename = "coverImage", value_type = String, format = Binary)]
    pub cover_image: String,
    #[schema(rename = "pdfFile", value_type = String, format = Binary)]
    pub pdf_file: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/add", post(add_book))
        .route("/category/:name", get(list_by_category))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
        .route("/:id/download", get(download_book))
        .with_state(ctx)
}

pub fn upload_routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/covers/:file", get(serve_cover))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/books", tag = "Books", params(SearchQuery), security(()), responses(
    (status = 200, body = [BookResponse])
))]
pub async fn list_books(
    State(ctx): State<AppContext>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let repo = ctx.book_repo();
    let uc = ListBooks {
        repo: repo.as_ref(),
    };
    let books = uc.execute(q.search).await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/books/{id}", tag = "Books", security(()),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses((status = 200, body = BookResponse), (status = 404, body = MessageBody))
)]
pub async fn get_book(
    State(ctx): State<AppContext>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<BookResponse>, ApiError> {
    let repo = ctx.book_repo();
    let uc = GetBook {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(get, path = "/api/books/category/{name}", tag = "Books", security(()),
    params(("name" = String, Path, description = "Category name")),
    responses((status = 200, body = [BookResponse]), (status = 404, body = MessageBody))
)]
pub async fn list_by_category(
    State(ctx): State<AppContext>,
    AxumPath(name): AxumPath<String>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let repo = ctx.book_repo();
    let uc = ListBooksByCategory {
        repo: repo.as_ref(),
    };
    let books = uc.execute(&name).await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/books/add",
    tag = "Books",
    request_body(content = AddBookMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = BookCreatedResponse),
        (status = 400, body = MessageBody),
        (status = 413, body = MessageBody)
    )
)]
pub async fn add_book(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BookCreatedResponse>), ApiError> {
    require_admin(&ctx.cfg, bearer)?;

    let mut title = String::new();
    let mut author = String::new();
    let mut category = String::new();
    let mut description = String::new();
    let mut price_raw = String::new();
    let mut cover: Option<UploadedFile> = None;
    let mut pdf: Option<UploadedFile> = None;

    let malformed = || ApiError::bad_request("Malformed multipart body");
    while let Some(field) = multipart.next_field().await.map_err(|_| malformed())? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("coverImage") | Some("pdfFile") => {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|_| malformed())?;
                if data.len() > ctx.cfg.upload_max_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "File exceeds the {} byte upload limit",
                        ctx.cfg.upload_max_bytes
                    )));
                }
                let file = UploadedFile {
                    filename,
                    bytes: data.to_vec(),
                };
                if name.as_deref() == Some("coverImage") {
                    cover = Some(file);
                } else {
                    pdf = Some(file);
                }
            }
            Some(text_field) => {
                let value = field.text().await.map_err(|_| malformed())?;
                match text_field {
                    "title" => title = value,
                    "author" => author = value,
                    "category" => category = value,
                    "description" => description = value,
                    "price" => price_raw = value,
                    _ => {}
                }
            }
            None => {}
        }
    }

    let (Some(cover), Some(pdf)) = (cover, pdf) else {
        return Err(ApiError::bad_request(
            "Please upload both a cover image and a PDF file",
        ));
    };
    let price = price_raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| ApiError::bad_request("price must be a number"))?;

    let repo = ctx.book_repo();
    let storage = ctx.asset_storage();
    let uc = CreateBook {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
    };
    let details = BookDetails {
        title,
        author,
        description,
        price,
        category,
    };
    let book = uc.execute(details, cover, pdf).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            message: "Book added successfully".into(),
            book: book.into(),
        }),
    ))
}

#[utoipa::path(put, path = "/api/books/{id}", tag = "Books", request_body = UpdateBookRequest,
    params(("id" = Uuid, Path, description = "Book ID")),
    responses((status = 200, body = BookResponse), (status = 404, body = MessageBody))
)]
pub async fn update_book(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.book_repo();
    let uc = UpdateBook {
        repo: repo.as_ref(),
    };
    let patch = BookPatch {
        title: req.title,
        author: req.author,
        description: req.description,
        price: req.price,
        category: req.category,
    };
    Ok(Json(uc.execute(id, patch).await?.into()))
}

#[utoipa::path(delete, path = "/api/books/{id}", tag = "Books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses((status = 204), (status = 404, body = MessageBody))
)]
pub async fn delete_book(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.book_repo();
    let storage = ctx.asset_storage();
    let uc = DeleteBook {
        repo: repo.as_ref(),
        storage: storage.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/books/{id}/download", tag = "Books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "PDF bytes", body = Vec<u8>, content_type = "application/pdf"),
        (status = 403, body = MessageBody)
    )
)]
pub async fn download_book(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Response, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let books = ctx.book_repo();
    let orders = ctx.order_repo();
    let storage = ctx.asset_storage();
    let uc = DownloadBook {
        books: books.as_ref(),
        orders: orders.as_ref(),
        storage: storage.as_ref(),
    };
    let file = uc.execute(caller.id, caller.is_admin(), id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.filename.replace('"', "")
    );
    headers.insert(
        axum::http::header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or(HeaderValue::from_static("attachment")),
    );
    headers.insert(
        axum::http::header::HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    Ok((headers, file.bytes).into_response())
}

#[utoipa::path(get, path = "/api/uploads/covers/{file}", tag = "Books", security(()),
    params(("file" = String, Path, description = "Stored cover file name")),
    responses((status = 200, description = "Image bytes", body = Vec<u8>, content_type = "application/octet-stream"))
)]
pub async fn serve_cover(
    State(ctx): State<AppContext>,
    AxumPath(file): AxumPath<String>,
) -> Result<Response, ApiError> {
    let relative = format!("covers/{file}");
    let storage = ctx.asset_storage();
    let data = storage.read(&relative).await.map_err(|err| {
        tracing::debug!(error = ?err, path = %relative, "cover_not_found");
        ApiError::not_found("File not found")
    })?;

    let guessed = mime_guess::from_path(&relative).first_or_octet_stream();
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_str(guessed.as_ref())
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        axum::http::header::HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );
    Ok((headers, data).into_response())
}
