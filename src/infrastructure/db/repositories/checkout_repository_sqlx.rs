use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::checkout_repository::{
    CheckoutLine, CheckoutRepository, CheckoutSession,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxCheckoutRepository {
    pub pool: PgPool,
}

impl SqlxCheckoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckoutRepository for SqlxCheckoutRepository {
    async fn save(&self, s: &CheckoutSession) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            r#"INSERT INTO checkout_sessions
                   (gateway_order_id, user_id, receipt, subtotal, discount, amount, coupon_code, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT (gateway_order_id) DO NOTHING"#,
        )
        .bind(&s.gateway_order_id)
        .bind(s.user_id)
        .bind(&s.receipt)
        .bind(s.subtotal)
        .bind(s.discount)
        .bind(s.amount)
        .bind(s.coupon_code.as_deref())
        .bind(s.created_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        // lines of an already recorded session are immutable
        if inserted > 0 {
            for (position, line) in s.lines.iter().enumerate() {
                sqlx::query(
                    r#"INSERT INTO checkout_session_items
                           (gateway_order_id, position, book_id, title, cover_path, quantity, unit_price)
                       VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
                )
                .bind(&s.gateway_order_id)
                .bind(position as i32)
                .bind(line.book_id)
                .bind(&line.title)
                .bind(&line.cover_path)
                .bind(line.quantity)
                .bind(line.unit_price)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find(
        &self,
        gateway_order_id: &str,
        user_id: Uuid,
    ) -> anyhow::Result<Option<CheckoutSession>> {
        let row = sqlx::query(
            r#"SELECT * FROM checkout_sessions WHERE gateway_order_id = $1 AND user_id = $2"#,
        )
        .bind(gateway_order_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(r) = row else {
            return Ok(None);
        };

        let lines = sqlx::query(
            r#"SELECT book_id, title, cover_path, quantity, unit_price
               FROM checkout_session_items
               WHERE gateway_order_id = $1
               ORDER BY position"#,
        )
        .bind(gateway_order_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|l| CheckoutLine {
            book_id: l.get("book_id"),
            title: l.get("title"),
            cover_path: l.get("cover_path"),
            quantity: l.get("quantity"),
            unit_price: l.get("unit_price"),
        })
        .collect();

        Ok(Some(CheckoutSession {
            gateway_order_id: r.get("gateway_order_id"),
            user_id: r.get("user_id"),
            receipt: r.get("receipt"),
            subtotal: r.get("subtotal"),
            discount: r.get("discount"),
            amount: r.get("amount"),
            coupon_code: r.get("coupon_code"),
            lines,
            created_at: r.get("created_at"),
        }))
    }
}
