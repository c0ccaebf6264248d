use rawview::{
    CancellationToken, Cancelled, DataSource, FileFormatParser, MemoryDataSource, ParseError,
    ProfileParser, RenderOptions, RenderingProfile, StreamAccess, Y4mParser,
    parse_rendering_profile,
};
use std::io::{self, Cursor, SeekFrom};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncSeek, ReadBuf};

/// Counts opened and still open streams
#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    live: AtomicUsize,
}

struct TrackedStream {
    inner: Cursor<Vec<u8>>,
    counters: Arc<Counters>,
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AsyncRead for TrackedStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncSeek for TrackedStream {
    fn start_seek(mut self: Pin<&mut Self>, position: SeekFrom) -> io::Result<()> {
        Pin::new(&mut self.inner).start_seek(position)
    }

    fn poll_complete(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        Pin::new(&mut self.inner).poll_complete(cx)
    }
}

struct TrackedSource {
    data: Vec<u8>,
    fail_open: bool,
    open_delay: Duration,
    counters: Arc<Counters>,
}

impl TrackedSource {
    fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            fail_open: false,
            open_delay: Duration::ZERO,
            counters: Arc::default(),
        }
    }

    fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }
}

impl DataSource for TrackedSource {
    type Stream = TrackedStream;

    async fn open_stream(&self, _access: StreamAccess) -> io::Result<TrackedStream> {
        tokio::time::sleep(self.open_delay).await;

        if self.fail_open {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such source"));
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);

        Ok(TrackedStream {
            inner: Cursor::new(self.data.clone()),
            counters: self.counters.clone(),
        })
    }
}

/// Never finishes unless cancelled
struct StallingParser;

impl FileFormatParser for StallingParser {
    fn name(&self) -> &'static str {
        "stalling"
    }

    async fn parse<S>(
        &self,
        _stream: &mut S,
        _token: &CancellationToken,
    ) -> Result<Option<RenderingProfile>, ParseError>
    where
        S: AsyncRead + AsyncSeek + Unpin + Send,
    {
        std::future::pending().await
    }
}

/// Always fails
struct BrokenParser;

impl FileFormatParser for BrokenParser {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn parse<S>(
        &self,
        _stream: &mut S,
        _token: &CancellationToken,
    ) -> Result<Option<RenderingProfile>, ParseError>
    where
        S: AsyncRead + AsyncSeek + Unpin + Send,
    {
        Err(ParseError::InvalidFormat("broken on purpose".into()))
    }
}

/// Gives up on its own, without anyone cancelling the token
struct SelfCancellingParser;

impl FileFormatParser for SelfCancellingParser {
    fn name(&self) -> &'static str {
        "self-cancelling"
    }

    async fn parse<S>(
        &self,
        _stream: &mut S,
        _token: &CancellationToken,
    ) -> Result<Option<RenderingProfile>, ParseError>
    where
        S: AsyncRead + AsyncSeek + Unpin + Send,
    {
        Err(ParseError::Cancelled)
    }
}

const Y4M: &[u8] = b"YUV4MPEG2 W4 H2 F25:1 C422 XCOLORRANGE=FULL\nFRAME\n";

#[tokio::test]
async fn parses_y4m_and_closes_stream() {
    let mut data = Y4M.to_vec();
    data.extend_from_slice(&[0u8; 16]);

    let source = TrackedSource::new(data);
    let parser = ProfileParser::new(Y4mParser).with_log_target("tests::parser");

    let profile = parser
        .parse(&source, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(source.opened(), 1);
    assert_eq!(source.live(), 0);

    assert_eq!(profile.format_name.as_deref(), Some("I422"));
    assert_eq!(profile.width, Some(4));
    assert_eq!(profile.height, Some(2));
    assert_eq!(profile.frame_rate, Some((25, 1)));
    assert_eq!(profile.data_offset, Y4M.len() as u64);

    let options: RenderOptions = profile.to_options();
    assert!(options.full_range);
    assert_eq!(options.bit_depth, Some(8));
}

#[tokio::test]
async fn cancelled_before_open() {
    let source = TrackedSource::new(Y4M);
    let token = CancellationToken::new();
    token.cancel();

    let result = parse_rendering_profile(&ProfileParser::new(Y4mParser), &source, &token).await;

    assert_eq!(result, Err(Cancelled));
    assert_eq!(source.opened(), 0);
}

#[tokio::test]
async fn cancelled_while_opening() {
    let source = TrackedSource {
        open_delay: Duration::from_secs(60),
        ..TrackedSource::new(Y4M)
    };
    let token = CancellationToken::new();

    tokio::spawn({
        let token = token.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        }
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        parse_rendering_profile(&ProfileParser::new(Y4mParser), &source, &token),
    )
    .await
    .unwrap();

    assert_eq!(result, Err(Cancelled));
    assert_eq!(source.live(), 0);
}

#[tokio::test]
async fn cancelled_while_parsing_closes_stream() {
    let source = TrackedSource::new(Y4M);
    let token = CancellationToken::new();

    tokio::spawn({
        let token = token.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        }
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        parse_rendering_profile(&ProfileParser::new(StallingParser), &source, &token),
    )
    .await
    .unwrap();

    assert_eq!(result, Err(Cancelled));
    assert_eq!(source.opened(), 1);
    assert_eq!(source.live(), 0);
}

#[tokio::test]
async fn open_failure_is_no_profile() {
    let source = TrackedSource {
        fail_open: true,
        ..TrackedSource::new(Y4M)
    };

    let result = ProfileParser::new(Y4mParser)
        .parse(&source, &CancellationToken::new())
        .await;

    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn parse_failure_is_no_profile() {
    let source = TrackedSource::new(Y4M);

    let result = ProfileParser::new(BrokenParser)
        .parse(&source, &CancellationToken::new())
        .await;

    assert_eq!(result, Ok(None));
    assert_eq!(source.opened(), 1);
    assert_eq!(source.live(), 0);
}

#[tokio::test]
async fn unrelated_data_is_no_profile() {
    let source = MemoryDataSource::new(b"RIFF\0\0\0\0WAVEfmt ".to_vec());

    let result = ProfileParser::new(Y4mParser)
        .parse(&source, &CancellationToken::new())
        .await;

    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn profile_drives_rendering() {
    let mut data = b"YUV4MPEG2 W2 H1 Cmono\nFRAME\n".to_vec();
    data.extend_from_slice(&[0, 255]);

    let source = MemoryDataSource::new(data);
    let profile = ProfileParser::new(Y4mParser)
        .parse(&source, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    let renderer = profile.renderer().unwrap();
    let options = profile.to_options();

    let mut dst = vec![0u8; 2 * 4];
    renderer
        .render_source(
            &source,
            profile.data_offset,
            &mut dst,
            profile.width.unwrap(),
            profile.height.unwrap(),
            &options,
        )
        .await
        .unwrap();

    assert_eq!(dst, [0, 0, 0, 255, 255, 255, 255, 255]);
}

#[tokio::test]
async fn inner_cancellation_without_request_is_no_profile() {
    let source = TrackedSource::new(Y4M);
    let token = CancellationToken::new();

    let parser = ProfileParser::new(SelfCancellingParser);
    let result = parse_rendering_profile(&parser, &source, &token).await;

    assert!(!token.is_cancelled());
    assert_eq!(result, Ok(None));
    assert_eq!(source.live(), 0);
}
