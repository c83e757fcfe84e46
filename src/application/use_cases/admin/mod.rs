pub mod get_user_details;
pub mod list_orders;
pub mod list_users;
pub mod send_chat;
pub mod update_delivery_status;
pub mod update_refund_status;
