use thiserror::Error;

use crate::call::CallStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Record has neither `id` nor `_id`")]
    MissingId,

    #[error("Call cannot move from {from:?} to {to:?}")]
    InvalidCallTransition { from: CallStatus, to: CallStatus },
}
