use enough::StopReason;

/// Everything that can go wrong while rendering a frame
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error(
        "source is truncated at plane {plane}, expected at least {needed} bytes but only got {got}"
    )]
    TruncatedSource {
        plane: usize,
        needed: usize,
        got: usize,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    #[error("unsupported bit depth {bits} for {format}")]
    UnsupportedBitDepth { format: &'static str, bits: u32 },

    #[error("output buffer too small, need {needed} bytes but got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendering cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for RenderError {
    fn from(reason: StopReason) -> Self {
        RenderError::Cancelled(reason)
    }
}

/// Width, height or strides that cannot describe a valid frame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("width or height must not be zero")]
    ZeroDimensions,

    #[error("dimensions {width}x{height} overflow the addressable size")]
    Overflow { width: usize, height: usize },

    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: usize,
        minimum: usize,
        got: usize,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("got invalid number of planes, expected {expected} but got {got}")]
pub struct InvalidNumberOfPlanesError {
    pub expected: usize,
    pub got: usize,
}

/// An operation observed a cancellation request and stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Failure inside a [`FileFormatParser`](crate::FileFormatParser)
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("parsing was cancelled")]
    Cancelled,
}

impl From<StopReason> for ParseError {
    fn from(_: StopReason) -> Self {
        ParseError::Cancelled
    }
}

impl From<Cancelled> for ParseError {
    fn from(_: Cancelled) -> Self {
        ParseError::Cancelled
    }
}
