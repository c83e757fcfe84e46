use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::coupon_repository::CouponRepository;
use crate::domain::coupons::coupon::{Coupon, DiscountType, NewCoupon};
use crate::infrastructure::db::PgPool;

pub struct SqlxCouponRepository {
    pub pool: PgPool,
}

impl SqlxCouponRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_coupon(r: &PgRow) -> anyhow::Result<Coupon> {
    let kind: String = r.get("discount_type");
    Ok(Coupon {
        id: r.get("id"),
        code: r.get("code"),
        discount_type: DiscountType::parse(&kind)
            .ok_or_else(|| anyhow::anyhow!("unknown discount type {kind}"))?,
        discount_value: r.get("discount_value"),
        is_active: r.get("is_active"),
        expires_at: r.get("expires_at"),
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl CouponRepository for SqlxCouponRepository {
    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Coupon>> {
        let row = sqlx::query("SELECT * FROM coupons WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_coupon).transpose()
    }

    async fn create(&self, coupon: &NewCoupon) -> anyhow::Result<Option<Coupon>> {
        let row = sqlx::query(
            r#"INSERT INTO coupons (code, discount_type, discount_value, expires_at)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (code) DO NOTHING
               RETURNING *"#,
        )
        .bind(&coupon.code)
        .bind(coupon.discount_type.as_str())
        .bind(coupon.discount_value)
        .bind(coupon.expires_at)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_coupon).transpose()
    }

    async fn list(&self) -> anyhow::Result<Vec<Coupon>> {
        let rows = sqlx::query("SELECT * FROM coupons ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_coupon).collect()
    }

    async fn toggle_active(&self, id: Uuid) -> anyhow::Result<Option<Coupon>> {
        let row =
            sqlx::query("UPDATE coupons SET is_active = NOT is_active WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.as_ref().map(map_coupon).transpose()
    }
}
