use std::fmt;

/// Convenience result type used across gifgrid.
pub type GridResult<T> = Result<T, GridError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// Invalid user-provided settings or source data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source container yielded no usable frames or could not be parsed.
    #[error("decode error: {0}")]
    Decode(String),

    /// The external encoder reported a failure or never became ready.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A user-requested abort. Distinct from [`GridError::Encode`]: no output
    /// artifact exists and nothing went wrong.
    #[error("operation cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridError {
    /// Build a [`GridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`GridError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` when this error is the cooperative-cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Non-fatal configuration advisory.
///
/// Warnings never stop processing: the engine proceeds with clamped or
/// adjusted values and hands these to the caller as advisory text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The requested column count exceeded the supported maximum and was
    /// clamped before layout.
    ColumnsClamped {
        /// Column count as requested by the caller.
        requested: u32,
        /// Maximum column count actually used.
        max: u32,
    },
    /// The output canvas resolution is large enough to slow processing down.
    HighResolution {
        /// Output canvas width in pixels.
        width: u32,
        /// Output canvas height in pixels.
        height: u32,
    },
    /// Resolution times frame count crosses the heavy-workload threshold.
    HeavyWorkload {
        /// Pixels per output frame.
        pixels: u64,
        /// Number of output frames in the run.
        frames: u64,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnsClamped { requested, max } => write!(
                f,
                "column count {requested} exceeds the maximum of {max}; using {max}"
            ),
            Self::HighResolution { width, height } => write!(
                f,
                "output resolution {width}x{height} is high; processing may be slow"
            ),
            Self::HeavyWorkload { pixels, frames } => write!(
                f,
                "workload of {pixels} pixels x {frames} frames is large; generation may take a while"
            ),
        }
    }
}
