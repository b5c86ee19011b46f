#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("invalid atom type at offset {offset}")]
    InvalidAtomType { offset: u64 },
    #[error(
        "invalid atom size {size} at offset {offset} (header {header_size}, {remaining} bytes remaining)"
    )]
    InvalidAtomSize {
        offset: u64,
        size: u64,
        header_size: u64,
        remaining: u64,
    },
    #[error("container at offset {offset} nested deeper than {limit} levels")]
    NestingTooDeep { offset: u64, limit: usize },
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("range {start}..{end} out of bounds (available up to {len})")]
    OutOfRange { start: u64, end: u64, len: u64 },
    #[error("unsupported source type: {0}")]
    UnsupportedSourceType(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
