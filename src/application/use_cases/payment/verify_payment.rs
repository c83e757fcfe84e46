use uuid::Uuid;

use crate::application::ports::checkout_repository::CheckoutRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::payment_gateway::PaymentGateway;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::payment::CheckoutError;
use crate::domain::orders::order::{NewOrder, NewOrderItem, ShippingSnapshot, TrackingEvent};
use crate::domain::orders::pricing::estimate_delivery;

pub struct VerifyPayment<'a, U, O, S, G>
where
    U: UserRepository + ?Sized,
    O: OrderRepository + ?Sized,
    S: CheckoutRepository + ?Sized,
    G: PaymentGateway + ?Sized,
{
    pub users: &'a U,
    pub orders: &'a O,
    pub checkouts: &'a S,
    pub gateway: &'a G,
}

#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

impl<'a, U, O, S, G> VerifyPayment<'a, U, O, S, G>
where
    U: UserRepository + ?Sized,
    O: OrderRepository + ?Sized,
    S: CheckoutRepository + ?Sized,
    G: PaymentGateway + ?Sized,
{
    /// Verifies the gateway signature and turns the lines priced at create-order time into an order.
    /// Returns the new order id, or the existing one when this payment was already recorded.
    pub async fn execute(
        &self,
        user_id: Uuid,
        payment: &PaymentConfirmation,
    ) -> Result<Uuid, CheckoutError> {
        if !self.gateway.verify_payment_signature(
            &payment.gateway_order_id,
            &payment.gateway_payment_id,
            &payment.signature,
        ) {
            tracing::warn!(user_id = %user_id, gateway_order_id = %payment.gateway_order_id, "payment_signature_mismatch");
            return Err(CheckoutError::InvalidSignature);
        }

        if let Some(existing) = self
            .orders
            .find_by_gateway_order(&payment.gateway_order_id)
            .await?
        {
            let owned = self
                .orders
                .get_by_id(existing)
                .await?
                .map(|o| o.is_owned_by(user_id))
                .unwrap_or(false);
            if !owned {
                return Err(CheckoutError::InvalidSignature);
            }
            tracing::info!(order_id = %existing, "payment_already_recorded");
            return Ok(existing);
        }

        let Some(session) = self
            .checkouts
            .find(&payment.gateway_order_id, user_id)
            .await?
        else {
            tracing::warn!(user_id = %user_id, gateway_order_id = %payment.gateway_order_id, "checkout_session_missing");
            return Err(CheckoutError::UnknownCheckout);
        };
        if session.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CheckoutError::UserNotFound)?;

        let now = chrono::Utc::now();
        let shipping = ShippingSnapshot::from_profile(user.address.as_ref(), user.phone.as_deref());
        let new_order = NewOrder {
            user_id,
            items: session
                .lines
                .iter()
                .map(|l| NewOrderItem {
                    book_id: l.book_id,
                    title: l.title.clone(),
                    cover_path: l.cover_path.clone(),
                    quantity: l.quantity,
                    price: l.unit_price,
                })
                .collect(),
            subtotal: session.subtotal,
            discount: session.discount,
            total_amount: session.amount,
            coupon_code: session.coupon_code.clone(),
            gateway_order_id: payment.gateway_order_id.clone(),
            gateway_payment_id: payment.gateway_payment_id.clone(),
            estimated_delivery_date: estimate_delivery(&shipping.state, now),
            shipping,
            initial_event: TrackingEvent {
                status: "Pending".into(),
                message: "Your order has been placed successfully.".into(),
                created_at: now,
            },
        };

        let order_id = self.orders.place(&new_order).await.map_err(|err| {
            tracing::error!(
                error = ?err,
                user_id = %user_id,
                gateway_order_id = %payment.gateway_order_id,
                gateway_payment_id = %payment.gateway_payment_id,
                "order_persist_failed"
            );
            CheckoutError::Persist(err)
        })?;
        tracing::info!(order_id = %order_id, user_id = %user_id, total = %session.amount, "order_placed");
        Ok(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::cart_repository::CartRepository;
    use crate::application::testing::{FakeGateway, InMemoryStore, sample_book, sample_user};
    use crate::application::use_cases::payment::create_order::CreateCheckoutOrder;
    use crate::domain::orders::order::{DeliveryStatus, PaymentStatus};
    use crate::domain::users::user::Address;
    use rust_decimal::Decimal;

    fn confirmation(gateway: &FakeGateway, order_id: &str) -> PaymentConfirmation {
        PaymentConfirmation {
            gateway_order_id: order_id.into(),
            gateway_payment_id: "pay_123".into(),
            signature: gateway.sign(order_id, "pay_123"),
        }
    }

    #[tokio::test]
    async fn verified_payment_materializes_order_and_clears_cart() {
        let store = InMemoryStore::default();
        let gateway = FakeGateway::new("shh");
        let mut user = sample_user("Rina");
        user.address = Some(Address {
            street: "12 College St".into(),
            city: "Kolkata".into(),
            state: "West Bengal".into(),
            zip_code: "700073".into(),
        });
        let user = store.insert_user(user);
        let book = store.insert_book(sample_book("Pather Dabi", "Sarat Chandra", 210));
        store.add_item(user.id, book.id, 2).await.unwrap();

        let checkout = CreateCheckoutOrder {
            carts: &store,
            coupons: &store,
            gateway: &gateway,
            checkouts: &store,
            currency: "INR",
        }
        .execute(user.id, None)
        .await
        .unwrap();

        let uc = VerifyPayment {
            users: &store,
            orders: &store,
            checkouts: &store,
            gateway: &gateway,
        };
        let order_id = uc
            .execute(user.id, &confirmation(&gateway, &checkout.gateway_order_id))
            .await
            .unwrap();

        let order = store.get_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(order.total_amount, Decimal::new(420, 0));
        assert_eq!(order.payment_status, PaymentStatus::Success);
        assert_eq!(order.delivery_status, DeliveryStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.shipping.city, "Kolkata");
        assert_eq!(order.tracking_history.len(), 1);
        let eta = order.estimated_delivery_date.unwrap() - order.created_at;
        assert!(eta.num_days() >= 2 && eta.num_days() <= 3);
        assert!(store.lines_for_user(user.id).await.unwrap().is_none());

        let again = uc
            .execute(user.id, &confirmation(&gateway, &checkout.gateway_order_id))
            .await
            .unwrap();
        assert_eq!(again, order_id);
    }

    #[tokio::test]
    async fn tampered_signature_is_rejected_before_touching_the_cart() {
        let store = InMemoryStore::default();
        let gateway = FakeGateway::new("shh");
        let user = store.insert_user(sample_user("Rina"));
        let book = store.insert_book(sample_book("Pather Dabi", "Sarat Chandra", 210));
        store.add_item(user.id, book.id, 1).await.unwrap();

        let mut conf = confirmation(&gateway, "order_1");
        conf.gateway_payment_id = "pay_999".into();
        let err = VerifyPayment {
            users: &store,
            orders: &store,
            checkouts: &store,
            gateway: &gateway,
        }
        .execute(user.id, &conf)
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidSignature));
        assert_eq!(store.lines_for_user(user.id).await.unwrap().unwrap().len(), 1);
    }

    async fn open_checkout(store: &InMemoryStore, gateway: &FakeGateway, user_id: Uuid) -> String {
        CreateCheckoutOrder {
            carts: store,
            coupons: store,
            gateway,
            checkouts: store,
            currency: "INR",
        }
        .execute(user_id, None)
        .await
        .unwrap()
        .gateway_order_id
    }

    #[tokio::test]
    async fn order_uses_lines_priced_at_checkout_not_later_cart_edits() {
        let store = InMemoryStore::default();
        let gateway = FakeGateway::new("shh");
        let user = store.insert_user(sample_user("Rina"));
        let cheap = store.insert_book(sample_book("Srikanta", "Sarat Chandra", 10));
        let dear = store.insert_book(sample_book("Gora", "Rabindranath Tagore", 900));
        store.add_item(user.id, cheap.id, 1).await.unwrap();
        let gateway_order_id = open_checkout(&store, &gateway, user.id).await;

        store.add_item(user.id, dear.id, 5).await.unwrap();

        let order_id = VerifyPayment {
            users: &store,
            orders: &store,
            checkouts: &store,
            gateway: &gateway,
        }
        .execute(user.id, &confirmation(&gateway, &gateway_order_id))
        .await
        .unwrap();

        let order = store.get_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].book_id, Some(cheap.id));
        assert_eq!(order.items[0].quantity, 1);
        let charged: Decimal = order
            .items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();
        assert_eq!(charged, order.total_amount);
        assert_eq!(order.total_amount, Decimal::new(10, 0));
    }

    #[tokio::test]
    async fn another_users_gateway_order_is_refused() {
        let store = InMemoryStore::default();
        let gateway = FakeGateway::new("shh");
        let payer = store.insert_user(sample_user("Rina"));
        let other = store.insert_user(sample_user("Tapan"));
        let book = store.insert_book(sample_book("Gora", "Rabindranath Tagore", 900));
        store.add_item(payer.id, book.id, 1).await.unwrap();
        store.add_item(other.id, book.id, 3).await.unwrap();
        let gateway_order_id = open_checkout(&store, &gateway, payer.id).await;

        let err = VerifyPayment {
            users: &store,
            orders: &store,
            checkouts: &store,
            gateway: &gateway,
        }
        .execute(other.id, &confirmation(&gateway, &gateway_order_id))
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::UnknownCheckout));
        assert!(store.find_by_gateway_order(&gateway_order_id).await.unwrap().is_none());
        assert_eq!(store.lines_for_user(other.id).await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn signed_order_without_a_checkout_session_is_refused() {
        let store = InMemoryStore::default();
        let gateway = FakeGateway::new("shh");
        let user = store.insert_user(sample_user("Rina"));
        let err = VerifyPayment {
            users: &store,
            orders: &store,
            checkouts: &store,
            gateway: &gateway,
        }
        .execute(user.id, &confirmation(&gateway, "order_1"))
        .await
        .unwrap_err();
        assert!(matches!(err, CheckoutError::UnknownCheckout));
    }
}
