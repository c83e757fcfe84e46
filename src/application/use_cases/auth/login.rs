use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, normalize_email};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` for an unknown email or a wrong password alike.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<User>> {
        let creds = match self
            .repo
            .find_credentials_by_email(&normalize_email(&req.email))
            .await?
        {
            Some(c) => c,
            None => return Ok(None),
        };
        let parsed =
            PasswordHash::new(&creds.password_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(creds.user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::default();
        Register { repo: &store }
            .execute(&RegisterRequest {
                name: "Arjun".into(),
                email: "arjun@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn correct_password_logs_in() {
        let store = seeded().await;
        let user = Login { repo: &store }
            .execute(&LoginRequest {
                email: "ARJUN@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.name), Some("Arjun".to_string()));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_the_same_way() {
        let store = seeded().await;
        let uc = Login { repo: &store };
        let wrong = uc
            .execute(&LoginRequest {
                email: "arjun@example.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        let unknown = uc
            .execute(&LoginRequest {
                email: "ghost@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());
        assert!(unknown.is_none());
    }
}
