use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, normalize_email};

const MIN_PASSWORD_LEN: usize = 6;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("User already exists")]
    EmailTaken,
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, RegisterError> {
        let name = req.name.trim();
        let email = normalize_email(&req.email);
        if name.is_empty() {
            return Err(RegisterError::Invalid("Name is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(RegisterError::Invalid("A valid email is required"));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegisterError::Invalid(
                "Password must be at least 6 characters",
            ));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        self.repo
            .create_user(name, &email, &hash)
            .await?
            .ok_or(RegisterError::EmailTaken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;

    fn req(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Mitali".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn registers_with_normalized_email() {
        let store = InMemoryStore::default();
        let uc = Register { repo: &store };
        let user = uc.execute(&req(" Mitali@Example.com", "secret1")).await.unwrap();
        assert_eq!(user.email, "mitali@example.com");
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryStore::default();
        let uc = Register { repo: &store };
        uc.execute(&req("a@b.in", "secret1")).await.unwrap();
        let err = uc.execute(&req("A@B.in", "secret2")).await.unwrap_err();
        assert!(matches!(err, RegisterError::EmailTaken));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let store = InMemoryStore::default();
        let uc = Register { repo: &store };
        let err = uc.execute(&req("a@b.in", "123")).await.unwrap_err();
        assert!(matches!(err, RegisterError::Invalid(_)));
    }
}
