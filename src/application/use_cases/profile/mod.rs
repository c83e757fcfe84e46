pub mod update_profile;

#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
