use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::orders::OrderError;
use crate::domain::orders::order::Order;
use crate::domain::users::user::User;

pub struct GetUserDetails<'a, U, O>
where
    U: UserRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    pub users: &'a U,
    pub orders: &'a O,
}

#[derive(Debug)]
pub struct UserDetails {
    pub user: User,
    pub orders: Vec<Order>,
}

impl<'a, U, O> GetUserDetails<'a, U, O>
where
    U: UserRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<UserDetails, OrderError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(OrderError::UserNotFound)?;
        let orders = self.orders.list_for_user(user_id).await?;
        Ok(UserDetails { user, orders })
    }
}
