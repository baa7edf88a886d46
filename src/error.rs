/// Reasons a serialized [`Gurl`](crate::Gurl) blob is rejected as corrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CorruptKind {
    /// The leading length token is missing or not a decimal number
    #[error("missing length prefix")]
    MissingLength,
    /// The length prefix does not match the payload that follows it
    #[error("length prefix {expected} does not match payload length {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// A token that should hold an integer does not
    #[error("invalid integer token")]
    BadInteger,
    /// A token that should hold `true`/`false` does not
    #[error("invalid boolean token")]
    BadBoolean,
    /// The token stream ended early
    #[error("token stream ended early")]
    MissingToken,
    /// Tokens remain after a complete component table
    #[error("unexpected data after component table")]
    TrailingData,
    /// Inner component tables are nested deeper than any parser produces
    #[error("inner component tables nested too deeply")]
    NestingTooDeep,
    /// A component range points outside the spec
    #[error("component range outside of spec")]
    ComponentOutOfRange,
}

/// Errors raised while decoding a serialized [`Gurl`](crate::Gurl)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeserializeError {
    /// The blob was written by a different serializer version
    #[error("unsupported serializer version {found}")]
    BadVersion { found: i32 },
    /// The blob is truncated or malformed
    #[error("corrupt serialized URL: {0}")]
    Corrupt(#[from] CorruptKind),
}

/// Errors raised when choosing the process-wide authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InstallError {
    /// Some caller already forced the default authority into existence
    #[error("URL authority already initialized")]
    AlreadyInitialized,
}

/// Result type for deserialization operations
pub type Result<T> = core::result::Result<T, DeserializeError>;
