use thiserror::Error;

use parley_api::ApiError;
use parley_shared::ModelError;
use parley_store::StoreError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Already in a call")]
    AlreadyInCall,

    #[error("Not in a call")]
    NotInCall,

    #[error("Call has already ended")]
    CallEnded,

    #[error("No tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
