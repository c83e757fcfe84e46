use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<User>> {
        self.repo.list_all().await
    }
}
