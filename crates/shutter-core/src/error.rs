use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtlasError {
    #[error("Atlas is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Atlas {width}x{height} does not divide into a {columns}x{rows} tile grid")]
    UnevenGrid {
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    },
}

pub type Result<T> = std::result::Result<T, AtlasError>;
