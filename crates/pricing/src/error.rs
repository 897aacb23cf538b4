use thiserror::Error;

pub type Result<T> = std::result::Result<T, PricingError>;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Diagram line decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
