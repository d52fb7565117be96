use thiserror::Error;

/// The result type threaded through every fallible operation in this crate family.
pub type RainbowResult<T> = std::result::Result<T, RainbowError>;

/// Crate-wide error type. Every fallible public function in `raintable-commons`
/// and `raintable-cpu` returns this, so callers only ever match on one enum.
#[derive(Error, Debug)]
pub enum RainbowError {
    #[error("charset contains a duplicate character")]
    DuplicateCharset,

    #[error("password length must be at least 1")]
    EmptyPasswordLength,

    #[error("password length {0} exceeds the maximum supported length of {1}")]
    PasswordTooLong(usize, usize),

    #[error("unable to access the table file")]
    Io(#[from] std::io::Error),

    #[error("the file does not start with a recognized table magic")]
    BadMagic,

    #[error("declared row count {expected} does not match the {actual} rows found in the file")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("declared password length {expected} does not match stored seed length {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown hash function id {0}")]
    UnknownHash(u32),

    #[error("unrecognized hash function name {0:?}")]
    UnknownHashName(String),

    #[error("refusing to save an empty table")]
    EmptyTable,

    #[error("malformed text table: {0}")]
    MalformedText(String),

    #[error("thread count must be at least 1")]
    ZeroThreads,
}
