use uuid::Uuid;

use crate::application::ports::order_repository::OrderRepository;
use crate::application::use_cases::orders::{OrderError, load_order, load_owned_order, non_blank};
use crate::domain::orders::order::{ChatMessage, ChatSender};

pub struct AddChat<'a, R: OrderRepository + ?Sized> {
    pub repo: &'a R,
}

/// Appends `text` to the order's chat and returns the updated history.
pub(crate) async fn append_message<R: OrderRepository + ?Sized>(
    repo: &R,
    order_id: Uuid,
    sender: ChatSender,
    text: &str,
) -> Result<Vec<ChatMessage>, OrderError> {
    let message = non_blank(text).ok_or(OrderError::EmptyMessage)?;
    repo.append_chat(
        order_id,
        &ChatMessage {
            sender,
            message,
            created_at: chrono::Utc::now(),
        },
    )
    .await?;
    tracing::debug!(order_id = %order_id, sender = sender.as_str(), "chat_message_added");
    Ok(load_order(repo, order_id).await?.chat_history)
}

impl<'a, R: OrderRepository + ?Sized> AddChat<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        order_id: Uuid,
        text: &str,
    ) -> Result<Vec<ChatMessage>, OrderError> {
        load_owned_order(self.repo, order_id, user_id).await?;
        append_message(self.repo, order_id, ChatSender::User, text).await
    }
}
