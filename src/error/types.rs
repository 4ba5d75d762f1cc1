use thiserror::Error;

/// Unified result type for the tilegrid crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by the tile-grid engine.
///
/// Only the catalog initializer produces hard errors; interaction misuse at
/// runtime (self-drops, stray pointer events) is ignored rather than raised.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("tile catalog is empty")]
    EmptyCatalog,
    #[error("duplicate tile id `{0}` in catalog")]
    DuplicateTile(String),
    #[error("tile `{id}` has invalid dimensions {width}x{height}")]
    InvalidDimensions {
        id: String,
        width: u16,
        height: u16,
    },
    #[error("catalog parse failure: {0}")]
    CatalogParse(#[from] serde_json::Error),
}
