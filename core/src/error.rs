use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card count must be an even number between 4 and 100")]
    InvalidConfiguration,
    #[error("Card index out of bounds")]
    InvalidIndex,
}

pub type Result<T> = core::result::Result<T, GameError>;
