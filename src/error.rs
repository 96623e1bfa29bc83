//! Error types for the Kukulcan engine

use crate::core::DeckViolation;
use crate::game::Rejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KukulcanError {
    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Card not found in catalog: {0}")]
    UnknownCard(String),

    #[error("Deck '{deck}' is not legal: {violation}")]
    InvalidDeck { deck: String, violation: DeckViolation },

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for KukulcanError {
    fn from(err: serde_json::Error) -> Self {
        KukulcanError::SerializationError(err.to_string())
    }
}

impl From<Rejection> for KukulcanError {
    fn from(rejection: Rejection) -> Self {
        KukulcanError::InvalidAction(rejection.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KukulcanError>;
