use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::cart_repository::CartRepository;
use crate::domain::cart::cart::{CartLine, CartMutation};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::book_repository_sqlx::map_book;

pub struct SqlxCartRepository {
    pub pool: PgPool,
}

impl SqlxCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn cart_id(&self, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let row = sqlx::query("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("id")))
    }
}

#[async_trait]
impl CartRepository for SqlxCartRepository {
    async fn lines_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<Vec<CartLine>>> {
        let Some(cart_id) = self.cart_id(user_id).await? else {
            return Ok(None);
        };
        let rows = sqlx::query(
            r#"SELECT b.*, ci.quantity
               FROM cart_items ci
               JOIN books b ON b.id = ci.book_id
               WHERE ci.cart_id = $1
               ORDER BY ci.added_at ASC"#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(
            rows.iter()
                .map(|r| CartLine {
                    book: map_book(r),
                    quantity: r.get("quantity"),
                })
                .collect(),
        ))
    }

    async fn add_item(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        let cart_id: Uuid = sqlx::query(
            r#"INSERT INTO carts (user_id) VALUES ($1)
               ON CONFLICT (user_id) DO UPDATE SET updated_at = now()
               RETURNING id"#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?
        .get("id");
        sqlx::query(
            r#"INSERT INTO cart_items (cart_id, book_id, quantity) VALUES ($1, $2, $3)
               ON CONFLICT (cart_id, book_id)
               DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity"#,
        )
        .bind(cart_id)
        .bind(book_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn remove_item(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<CartMutation> {
        let Some(cart_id) = self.cart_id(user_id).await? else {
            return Ok(CartMutation::CartMissing);
        };
        let res = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND book_id = $2")
            .bind(cart_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        Ok(if res.rows_affected() > 0 {
            CartMutation::Applied
        } else {
            CartMutation::ItemMissing
        })
    }

    async fn set_quantity(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        quantity: i32,
    ) -> anyhow::Result<CartMutation> {
        let Some(cart_id) = self.cart_id(user_id).await? else {
            return Ok(CartMutation::CartMissing);
        };
        let res =
            sqlx::query("UPDATE cart_items SET quantity = $3 WHERE cart_id = $1 AND book_id = $2")
                .bind(cart_id)
                .bind(book_id)
                .bind(quantity)
                .execute(&self.pool)
                .await?;
        Ok(if res.rows_affected() > 0 {
            CartMutation::Applied
        } else {
            CartMutation::ItemMissing
        })
    }
}
