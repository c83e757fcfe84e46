use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserCredentials, UserRepository};
use crate::domain::users::user::{Address, ProfileUpdate, Role, User};
use crate::infrastructure::db::PgPool;

const USER_COLUMNS: &str = "id, name, email, role, phone, address_street, address_city, \
    address_state, address_zip_code, created_at, updated_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> User {
    let street: Option<String> = r.get("address_street");
    let address = street.map(|street| Address {
        street,
        city: r.get::<Option<String>, _>("address_city").unwrap_or_default(),
        state: r.get::<Option<String>, _>("address_state").unwrap_or_default(),
        zip_code: r.get::<Option<String>, _>("address_zip_code").unwrap_or_default(),
    });
    let role: String = r.get("role");
    User {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        role: Role::parse(&role).unwrap_or(Role::User),
        phone: r.get("phone"),
        address,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| UserCredentials {
            user: map_user(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_user).collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<User>> {
        let address = update.address.as_ref();
        let sql = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address_street = CASE WHEN $4 THEN $5 ELSE address_street END,
                address_city = CASE WHEN $4 THEN $6 ELSE address_city END,
                address_state = CASE WHEN $4 THEN $7 ELSE address_state END,
                address_zip_code = CASE WHEN $4 THEN $8 ELSE address_zip_code END,
                updated_at = now()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.phone.as_deref())
            .bind(address.is_some())
            .bind(address.map(|a| a.street.as_str()))
            .bind(address.map(|a| a.city.as_str()))
            .bind(address.map(|a| a.state.as_str()))
            .bind(address.map(|a| a.zip_code.as_str()))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }
}
