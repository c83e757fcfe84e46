use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::orders::add_chat::append_message;
use crate::application::use_cases::orders::{OrderError, load_order};
use crate::domain::orders::order::{ChatMessage, ChatSender};

pub struct SendAdminChat<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: OrderRepository + ?Sized> SendAdminChat<'a, R> {
    pub async fn execute(&self, order_id: Uuid, text: &str) -> Result<Vec<ChatMessage>, OrderError> {
        load_order(self.repo, order_id).await?;
        append_message(self.repo, order_id, ChatSender::Admin, text).await
    }
}
