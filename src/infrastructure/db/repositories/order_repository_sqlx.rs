use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::domain::orders::order::{
    ChatMessage, ChatSender, DeliveryStatus, NewOrder, Order, OrderItem, OrderWithBuyer,
    PaymentStatus, RefundRequest, RefundStatus, ShippingSnapshot, TrackingEvent,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxOrderRepository {
    pub pool: PgPool,
}

impl SqlxOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads items, tracking and chat for the given order rows in three queries.
    async fn hydrate(&self, rows: &[PgRow]) -> anyhow::Result<Vec<Order>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.get("id")).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut items: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for r in sqlx::query(
            r#"SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, position"#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?
        {
            items.entry(r.get("order_id")).or_default().push(map_item(&r)?);
        }

        let mut tracking: HashMap<Uuid, Vec<TrackingEvent>> = HashMap::new();
        for r in sqlx::query(
            r#"SELECT order_id, status, message, created_at FROM tracking_events
               WHERE order_id = ANY($1) ORDER BY id"#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?
        {
            tracking
                .entry(r.get("order_id"))
                .or_default()
                .push(TrackingEvent {
                    status: r.get("status"),
                    message: r.get("message"),
                    created_at: r.get("created_at"),
                });
        }

        let mut chats: HashMap<Uuid, Vec<ChatMessage>> = HashMap::new();
        for r in sqlx::query(
            r#"SELECT order_id, sender, message, created_at FROM chat_messages
               WHERE order_id = ANY($1) ORDER BY id"#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?
        {
            let sender: String = r.get("sender");
            chats.entry(r.get("order_id")).or_default().push(ChatMessage {
                sender: ChatSender::parse(&sender)
                    .ok_or_else(|| anyhow::anyhow!("unknown chat sender {sender}"))?,
                message: r.get("message"),
                created_at: r.get("created_at"),
            });
        }

        rows.iter()
            .map(|r| {
                let id: Uuid = r.get("id");
                map_order(
                    r,
                    items.remove(&id).unwrap_or_default(),
                    tracking.remove(&id).unwrap_or_default(),
                    chats.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }
}

fn map_item(r: &PgRow) -> anyhow::Result<OrderItem> {
    let status: String = r.get("refund_status");
    Ok(OrderItem {
        id: r.get("id"),
        book_id: r.get("book_id"),
        title: r.get("title"),
        cover_path: r.get("cover_path"),
        quantity: r.get("quantity"),
        price: r.get("price"),
        refund: RefundRequest {
            status: RefundStatus::parse(&status)
                .ok_or_else(|| anyhow::anyhow!("unknown refund status {status}"))?,
            reason: r.get("refund_reason"),
            requested_at: r.get("refund_requested_at"),
        },
    })
}

fn map_order(
    r: &PgRow,
    items: Vec<OrderItem>,
    tracking_history: Vec<TrackingEvent>,
    chat_history: Vec<ChatMessage>,
) -> anyhow::Result<Order> {
    let payment: String = r.get("payment_status");
    let delivery: String = r.get("delivery_status");
    Ok(Order {
        id: r.get("id"),
        user_id: r.get("user_id"),
        items,
        subtotal: r.get("subtotal"),
        discount: r.get("discount"),
        total_amount: r.get("total_amount"),
        coupon_code: r.get("coupon_code"),
        gateway_order_id: r.get("gateway_order_id"),
        gateway_payment_id: r.get("gateway_payment_id"),
        payment_status: PaymentStatus::parse(&payment)
            .ok_or_else(|| anyhow::anyhow!("unknown payment status {payment}"))?,
        delivery_status: DeliveryStatus::parse(&delivery)
            .ok_or_else(|| anyhow::anyhow!("unknown delivery status {delivery}"))?,
        estimated_delivery_date: r.get("estimated_delivery_date"),
        shipping: ShippingSnapshot {
            street: r.get("ship_street"),
            city: r.get("ship_city"),
            state: r.get("ship_state"),
            zip_code: r.get("ship_zip_code"),
            phone: r.get("ship_phone"),
        },
        tracking_history,
        chat_history,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl OrderRepository for SqlxOrderRepository {
    async fn place(&self, order: &NewOrder) -> anyhow::Result<Uuid> {
        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            r#"INSERT INTO orders (
                   user_id, subtotal, discount, total_amount, coupon_code,
                   gateway_order_id, gateway_payment_id, payment_status, delivery_status,
                   estimated_delivery_date, ship_street, ship_city, ship_state, ship_zip_code, ship_phone)
               VALUES ($1, $2, $3, $4, $5, $6, $7, 'success', 'Pending', $8, $9, $10, $11, $12, $13)
               ON CONFLICT (gateway_order_id) DO NOTHING
               RETURNING id"#,
        )
        .bind(order.user_id)
        .bind(order.subtotal)
        .bind(order.discount)
        .bind(order.total_amount)
        .bind(order.coupon_code.as_deref())
        .bind(&order.gateway_order_id)
        .bind(&order.gateway_payment_id)
        .bind(order.estimated_delivery_date)
        .bind(&order.shipping.street)
        .bind(&order.shipping.city)
        .bind(&order.shipping.state)
        .bind(&order.shipping.zip_code)
        .bind(&order.shipping.phone)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = inserted else {
            // Another request already recorded this payment.
            tx.rollback().await?;
            return self
                .find_by_gateway_order(&order.gateway_order_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("order for {} vanished", order.gateway_order_id));
        };
        let order_id: Uuid = row.get("id");

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO order_items (order_id, position, book_id, title, cover_path, quantity, price)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(order_id)
            .bind(position as i32)
            .bind(item.book_id)
            .bind(&item.title)
            .bind(&item.cover_path)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        insert_event(&mut tx, order_id, &order.initial_event).await?;

        sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(order.user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(order_id)
    }

    async fn find_by_gateway_order(
        &self,
        gateway_order_id: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        let row = sqlx::query("SELECT id FROM orders WHERE gateway_order_id = $1")
            .bind(gateway_order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("id")))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let rows = sqlx::query("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(self.hydrate(&rows).await?.into_iter().next())
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        self.hydrate(&rows).await
    }

    async fn list_all(&self) -> anyhow::Result<Vec<OrderWithBuyer>> {
        let rows = sqlx::query(
            r#"SELECT o.*, u.name AS buyer_name, u.email AS buyer_email
               FROM orders o
               LEFT JOIN users u ON u.id = o.user_id
               ORDER BY o.created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        let orders = self.hydrate(&rows).await?;
        Ok(orders
            .into_iter()
            .zip(rows.iter())
            .map(|(order, r)| OrderWithBuyer {
                order,
                buyer_name: r.get("buyer_name"),
                buyer_email: r.get("buyer_email"),
            })
            .collect())
    }

    async fn set_delivery_status(
        &self,
        order_id: Uuid,
        status: DeliveryStatus,
        event: &TrackingEvent,
    ) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            "UPDATE orders SET delivery_status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(order_id)
        .bind(status.as_str())
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            return Ok(false);
        }
        insert_event(&mut tx, order_id, event).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn set_item_refund(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        refund: &RefundRequest,
        event: &TrackingEvent,
    ) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            r#"UPDATE order_items
               SET refund_status = $3, refund_reason = $4, refund_requested_at = $5
               WHERE order_id = $1 AND id = $2"#,
        )
        .bind(order_id)
        .bind(item_id)
        .bind(refund.status.as_str())
        .bind(&refund.reason)
        .bind(refund.requested_at)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            return Ok(false);
        }
        sqlx::query("UPDATE orders SET updated_at = now() WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        insert_event(&mut tx, order_id, event).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn append_chat(&self, order_id: Uuid, message: &ChatMessage) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO chat_messages (order_id, sender, message, created_at)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(order_id)
        .bind(message.sender.as_str())
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn user_purchased_book(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS (
                   SELECT 1 FROM orders o
                   JOIN order_items oi ON oi.order_id = o.id
                   WHERE o.user_id = $1 AND oi.book_id = $2 AND o.payment_status = 'success'
               ) AS purchased"#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("purchased"))
    }
}

async fn insert_event(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    order_id: Uuid,
    event: &TrackingEvent,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"INSERT INTO tracking_events (order_id, status, message, created_at)
           VALUES ($1, $2, $3, $4)"#,
    )
    .bind(order_id)
    .bind(&event.status)
    .bind(&event.message)
    .bind(event.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
