//! Recovering [`RenderingProfile`]s from container headers.
//!
//! A [`FileFormatParser`] only knows how to read its format from an already opened stream.
//! [`ProfileParser`] owns everything around that: opening the [`DataSource`], racing the
//! parse against a [`CancellationToken`], closing the stream on every path and turning
//! failures into "no profile".

use crate::source::{DataSource, StreamAccess};
use crate::{CancellationToken, Cancelled, ParseError, RenderingProfile};
use std::future::Future;
use tokio::io::{AsyncRead, AsyncSeek};

pub mod y4m;

pub use y4m::Y4mParser;

const DEFAULT_LOG_TARGET: &str = "rawview::parser";

/// Parses the rendering profile of one file format
pub trait FileFormatParser: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Parse the profile from `stream`, positioned at the start of the file.
    ///
    /// `Ok(None)` means the stream is not in this parser's format. Long running parsers should
    /// check `token` between steps.
    fn parse<S>(
        &self,
        stream: &mut S,
        token: &CancellationToken,
    ) -> impl Future<Output = Result<Option<RenderingProfile>, ParseError>> + Send
    where
        S: AsyncRead + AsyncSeek + Unpin + Send;
}

/// Runs a [`FileFormatParser`] against data sources
#[derive(Debug, Clone)]
pub struct ProfileParser<P> {
    parser: P,
    log_target: &'static str,
}

impl<P: FileFormatParser> ProfileParser<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            log_target: DEFAULT_LOG_TARGET,
        }
    }

    /// Log through `target` instead of the default `rawview::parser`
    pub fn with_log_target(mut self, target: &'static str) -> Self {
        self.log_target = target;
        self
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn log_target(&self) -> &'static str {
        self.log_target
    }

    /// See [`parse_rendering_profile`]
    pub async fn parse(
        &self,
        source: &impl DataSource,
        token: &CancellationToken,
    ) -> Result<Option<RenderingProfile>, Cancelled> {
        parse_rendering_profile(self, source, token).await
    }
}

/// Open `source` and parse its rendering profile.
///
/// Returns `Ok(None)` if the source cannot be opened or the parser fails, `Err(Cancelled)`
/// whenever `token` was cancelled before a profile was produced. The opened stream is closed
/// before this returns.
pub async fn parse_rendering_profile<P, D>(
    parser: &ProfileParser<P>,
    source: &D,
    token: &CancellationToken,
) -> Result<Option<RenderingProfile>, Cancelled>
where
    P: FileFormatParser,
    D: DataSource,
{
    let target = parser.log_target;
    let name = parser.parser.name();

    if token.is_cancelled() {
        return Err(Cancelled);
    }

    let opened = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(Cancelled),
        opened = source.open_stream(StreamAccess::Read) => opened,
    };

    let mut stream = match opened {
        Ok(stream) => stream,
        Err(_) if token.is_cancelled() => return Err(Cancelled),
        Err(e) => {
            log::debug!(target: target, "{name}: failed to open stream: {e}");
            return Ok(None);
        }
    };

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => Err(ParseError::Cancelled),
        result = parser.parser.parse(&mut stream, token) => result,
    };

    drop(stream);

    match result {
        Ok(profile) => {
            if let Some(profile) = &profile {
                log::debug!(target: target, "{name}: parsed profile {:?}", profile.name);
            }

            Ok(profile)
        }
        Err(_) if token.is_cancelled() => Err(Cancelled),
        Err(e) => {
            log::warn!(target: target, "{name}: failed to parse rendering profile: {e}");
            Ok(None)
        }
    }
}
