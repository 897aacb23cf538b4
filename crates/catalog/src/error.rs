use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
