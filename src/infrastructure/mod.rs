pub mod crypto;
pub mod db;
pub mod payment;
pub mod storage;
