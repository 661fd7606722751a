use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Invalid window size: {0} (must be at least 1 byte)")]
    InvalidWindowSize(usize),

    #[error("Invalid chunk size: {0} (must be at least 1 byte)")]
    InvalidChunkSize(usize),

    #[error("Invalid {field} width: 0 (must be at least 1 bit)")]
    ZeroFieldWidth { field: &'static str },

    #[error("Invalid {field} width: {width} exceeds maximum {max} bits")]
    FieldWidthTooLarge { field: &'static str, width: u32, max: u32 },

    // Stream format errors
    #[error("Leading code word must encode a literal, got flag {0}")]
    LeadingWordNotLiteral(u64),

    #[error("Truncated code word: stream ended after the flag was consumed")]
    TruncatedCodeWord,

    #[error("Back-reference length {length} exceeds window capacity {capacity}")]
    ReferenceTooLong { length: u64, capacity: usize },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Bit buffer underrun; the decoder translates this into TruncatedCodeWord
    // before it can reach a caller
    #[error("Requested {requested} bits with only {available} buffered")]
    InsufficientBits { requested: u32, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
