use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::domain::catalog::book::{Book, BookPatch, NewBook};
use crate::infrastructure::db::PgPool;

pub struct SqlxBookRepository {
    pub pool: PgPool,
}

impl SqlxBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn map_book(r: &PgRow) -> Book {
    Book {
        id: r.get("id"),
        title: r.get("title"),
        author: r.get("author"),
        description: r.get("description"),
        price: r.get("price"),
        category: r.get("category"),
        cover_path: r.get("cover_path"),
        pdf_path: r.get("pdf_path"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl BookRepository for SqlxBookRepository {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Book>> {
        let rows = if let Some(q) = search.filter(|s| !s.trim().is_empty()) {
            let like = format!("%{}%", escape_like(q.trim()));
            sqlx::query(
                r#"SELECT * FROM books
                   WHERE title ILIKE $1 ESCAPE '\' OR author ILIKE $1 ESCAPE '\'
                   ORDER BY created_at DESC"#,
            )
            .bind(like)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(r#"SELECT * FROM books ORDER BY created_at DESC"#)
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows.iter().map(map_book).collect())
    }

    async fn list_by_category(&self, category: &str) -> anyhow::Result<Vec<Book>> {
        let rows =
            sqlx::query(r#"SELECT * FROM books WHERE category = $1 ORDER BY created_at DESC"#)
                .bind(category)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.iter().map(map_book).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(r#"SELECT * FROM books WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_book))
    }

    async fn create(&self, book: &NewBook) -> anyhow::Result<Book> {
        let row = sqlx::query(
            r#"INSERT INTO books (title, author, description, price, category, cover_path, pdf_path)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.price)
        .bind(&book.category)
        .bind(&book.cover_path)
        .bind(&book.pdf_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_book(&row))
    }

    async fn update(&self, id: Uuid, patch: &BookPatch) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(
            r#"UPDATE books SET
                   title = COALESCE($2, title),
                   author = COALESCE($3, author),
                   description = COALESCE($4, description),
                   price = COALESCE($5, price),
                   category = COALESCE($6, category),
                   updated_at = now()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.author.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.price)
        .bind(patch.category.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_book))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Book>> {
        let row = sqlx::query(r#"DELETE FROM books WHERE id = $1 RETURNING *"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_book))
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
