//! JSON error responses shared by every handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::ports::payment_gateway::GatewayError;
use crate::application::services::cart_pricing::PricingError;
use crate::application::use_cases::auth::register::RegisterError;
use crate::application::use_cases::books::CatalogError;
use crate::application::use_cases::cart::CartError;
use crate::application::use_cases::categories::create_category::CreateCategoryError;
use crate::application::use_cases::coupons::create_coupon::CreateCouponError;
use crate::application::use_cases::orders::OrderError;
use crate::application::use_cases::payment::CheckoutError;
use crate::application::use_cases::profile::ProfileError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Internal {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { source, message } = &self {
            tracing::error!(error = ?source, message = %message, "request_failed");
        }
        (self.status(), MessageBody::new(self.to_string())).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal("Server Error", err)
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Internal(e) => e.into(),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound | CatalogError::EmptyCategory => {
                ApiError::not_found(err.to_string())
            }
            CatalogError::Invalid(_) => ApiError::bad_request(err.to_string()),
            CatalogError::NotPurchased => ApiError::Forbidden(err.to_string()),
            CatalogError::Internal(e) => e.into(),
        }
    }
}

impl From<CreateCategoryError> for ApiError {
    fn from(err: CreateCategoryError) -> Self {
        match err {
            CreateCategoryError::Internal(e) => e.into(),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidQuantity | CartError::QuantityTooLarge => {
                ApiError::bad_request(err.to_string())
            }
            CartError::BookNotFound | CartError::CartNotFound | CartError::ItemNotFound => {
                ApiError::not_found(err.to_string())
            }
            CartError::Internal(e) => e.into(),
        }
    }
}

impl From<CreateCouponError> for ApiError {
    fn from(err: CreateCouponError) -> Self {
        match err {
            CreateCouponError::Internal(e) => e.into(),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Coupon(c) => ApiError::bad_request(c.to_string()),
            PricingError::Internal(e) => e.into(),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured => ApiError::Upstream {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "Payment gateway is not configured".into(),
            },
            GatewayError::Rejected {
                status,
                description,
            } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: description,
            },
            GatewayError::Transport(e) => {
                tracing::error!(error = ?e, "payment_gateway_unreachable");
                ApiError::Upstream {
                    status: StatusCode::BAD_GATEWAY,
                    message: "Payment gateway is unavailable".into(),
                }
            }
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart
            | CheckoutError::NonPositiveAmount
            | CheckoutError::InvalidSignature
            | CheckoutError::UnknownCheckout
            | CheckoutError::Coupon(_) => ApiError::bad_request(err.to_string()),
            CheckoutError::UserNotFound => ApiError::not_found(err.to_string()),
            CheckoutError::Gateway(g) => g.into(),
            CheckoutError::Persist(ref e) => {
                let message = err.to_string();
                ApiError::internal(message, anyhow::anyhow!("{e:#}"))
            }
            CheckoutError::Internal(e) => e.into(),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound => ApiError::not_found(err.to_string()),
            ProfileError::Invalid(_) => ApiError::bad_request(err.to_string()),
            ProfileError::Internal(e) => e.into(),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound | OrderError::ItemNotFound | OrderError::UserNotFound => {
                ApiError::not_found(err.to_string())
            }
            OrderError::NotOwner => ApiError::Unauthorized(err.to_string()),
            OrderError::RefundAlreadyRequested
            | OrderError::MissingReason
            | OrderError::EmptyMessage
            | OrderError::InvalidDeliveryStatus
            | OrderError::InvalidRefundStatus => ApiError::bad_request(err.to_string()),
            OrderError::Internal(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_case_errors_map_to_statuses() {
        assert_eq!(ApiError::from(CartError::CartNotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(CartError::QuantityTooLarge).to_string(),
            "Quantity cannot exceed 1000"
        );
        assert_eq!(
            ApiError::from(OrderError::NotOwner).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(CheckoutError::InvalidSignature).to_string(),
            "Payment verification failed. Invalid signature."
        );
        assert_eq!(
            ApiError::from(CheckoutError::UnknownCheckout).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CheckoutError::Persist(anyhow::anyhow!("db down"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(CatalogError::NotPurchased).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn gateway_rejection_keeps_upstream_status() {
        let err = ApiError::from(GatewayError::Rejected {
            status: 400,
            description: "The amount must be atleast INR 1.00".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "The amount must be atleast INR 1.00");
        assert_eq!(
            ApiError::from(GatewayError::Transport(anyhow::anyhow!("dns"))).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Server Error");
    }
}
