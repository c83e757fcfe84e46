use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::payment_gateway::{
    GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway,
};
use crate::infrastructure::crypto;

pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com";

pub struct RazorpayGateway {
    client: reqwest::Client,
    api_base: String,
    key_id: String,
    key_secret: String,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    description: Option<String>,
}

impl RazorpayGateway {
    pub fn new(api_base: &str, key_id: &str, key_secret: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        }
    }

    fn configured(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.is_empty()
    }
}

fn error_description(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.description)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("payment gateway returned status {}", status.as_u16()))
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn create_order(&self, req: &GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        if !self.configured() {
            return Err(GatewayError::NotConfigured);
        }
        let resp = self
            .client
            .post(format!("{}/v1/orders", self.api_base))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrderBody {
                amount: req.amount,
                currency: &req.currency,
                receipt: &req.receipt,
            })
            .send()
            .await
            .map_err(|e| GatewayError::Transport(anyhow::anyhow!("request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(anyhow::anyhow!("failed to read body: {e}")))?;
        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                description: error_description(status, &body),
            });
        }
        let order: OrderResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Transport(anyhow::anyhow!("invalid order response: {e}")))?;
        Ok(GatewayOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        if self.key_secret.is_empty() {
            return false;
        }
        crypto::verify_payment_signature(&self.key_secret, order_id, payment_id, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_description_prefers_gateway_message() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"The amount must be atleast INR 1.00"}}"#;
        assert_eq!(
            error_description(reqwest::StatusCode::BAD_REQUEST, body),
            "The amount must be atleast INR 1.00"
        );
        assert_eq!(
            error_description(reqwest::StatusCode::BAD_GATEWAY, "<html>"),
            "payment gateway returned status 502"
        );
    }

    #[tokio::test]
    async fn unconfigured_gateway_refuses_orders() {
        let gw = RazorpayGateway::new(DEFAULT_API_BASE, "", "");
        let err = gw
            .create_order(&GatewayOrderRequest {
                amount: 100,
                currency: "INR".into(),
                receipt: "r".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured));
        assert!(!gw.verify_payment_signature("o", "p", "s"));
    }

    #[test]
    fn verifies_with_key_secret() {
        let gw = RazorpayGateway::new(DEFAULT_API_BASE, "rzp_test", "topsecret");
        let sig = crypto::sign_payment("topsecret", "order_9", "pay_9");
        assert!(gw.verify_payment_signature("order_9", "pay_9", &sig));
    }
}
