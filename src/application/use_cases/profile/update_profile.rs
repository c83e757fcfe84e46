use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::profile::ProfileError;
use crate::domain::users::user::{Address, ProfileUpdate, User};

pub struct UpdateProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

fn trim_address(a: Address) -> Address {
    Address {
        street: a.street.trim().to_string(),
        city: a.city.trim().to_string(),
        state: a.state.trim().to_string(),
        zip_code: a.zip_code.trim().to_string(),
    }
}

impl<'a, R: UserRepository + ?Sized> UpdateProfile<'a, R> {
    pub async fn execute(&self, user_id: Uuid, update: ProfileUpdate) -> Result<User, ProfileError> {
        let name = match update.name {
            Some(n) if n.trim().is_empty() => return Err(ProfileError::Invalid("Name cannot be empty")),
            Some(n) => Some(n.trim().to_string()),
            None => None,
        };
        let update = ProfileUpdate {
            name,
            phone: update.phone.map(|p| p.trim().to_string()),
            address: update.address.map(trim_address),
        };
        let user = self
            .repo
            .update_profile(user_id, &update)
            .await?
            .ok_or(ProfileError::NotFound)?;
        tracing::info!(user_id = %user.id, "profile_updated");
        Ok(user)
    }
}
