use thiserror::Error;

use crate::domain::TransactionId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
