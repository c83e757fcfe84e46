use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::catalog::category::Category;
use crate::infrastructure::db::PgPool;

pub struct SqlxCategoryRepository {
    pub pool: PgPool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query(r#"SELECT id, name, slug, created_at FROM categories ORDER BY name ASC"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: r.get("id"),
                name: r.get("name"),
                slug: r.get("slug"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    async fn create(&self, name: &str, slug: &str) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query(
            r#"INSERT INTO categories (name, slug) VALUES ($1, $2)
               ON CONFLICT (slug) DO NOTHING
               RETURNING id, name, slug, created_at"#,
        )
        .bind(name)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| Category {
            id: r.get("id"),
            name: r.get("name"),
            slug: r.get("slug"),
            created_at: r.get("created_at"),
        }))
    }
}
