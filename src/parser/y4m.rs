//! YUV4MPEG2 stream headers.
//!
//! ```text
//! YUV4MPEG2 W1920 H1080 F30000:1001 Ip A1:1 C420jpeg XCOLORRANGE=LIMITED\n
//! FRAME\n
//! <frame data>
//! ```

use super::FileFormatParser;
use crate::{ByteOrder, CancellationToken, ParseError, RenderingProfile};
use enough::Stop;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncSeek, BufReader};

const MAGIC: &[u8] = b"YUV4MPEG2";
const FRAME: &[u8] = b"FRAME";

/// Header lines are short, anything longer is not a Y4M stream
const MAX_LINE_LEN: u64 = 1024;

#[derive(Debug, Default, Clone, Copy)]
pub struct Y4mParser;

impl FileFormatParser for Y4mParser {
    fn name(&self) -> &'static str {
        "YUV4MPEG2"
    }

    async fn parse<S>(
        &self,
        stream: &mut S,
        token: &CancellationToken,
    ) -> Result<Option<RenderingProfile>, ParseError>
    where
        S: AsyncRead + AsyncSeek + Unpin + Send,
    {
        let mut reader = BufReader::new(stream);

        let header = read_line(&mut reader).await?;
        if !header.starts_with(MAGIC) {
            return Ok(None);
        }

        token.check()?;

        let mut profile = parse_header(&header)?;

        let frame = read_line(&mut reader).await?;
        if !frame.starts_with(FRAME) {
            return Err(ParseError::InvalidFormat(
                "missing FRAME header after stream header".into(),
            ));
        }

        // Both lines plus their terminating newlines
        profile.data_offset = (header.len() + 1 + frame.len() + 1) as u64;

        Ok(Some(profile))
    }
}

async fn read_line<R>(reader: &mut R) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    (&mut *reader)
        .take(MAX_LINE_LEN)
        .read_until(b'\n', &mut line)
        .await?;

    if line.pop() != Some(b'\n') {
        return Err(ParseError::InvalidFormat(
            "header line is unterminated or too long".into(),
        ));
    }

    Ok(line)
}

/// Parse the stream header line, without its newline
pub(crate) fn parse_header(line: &[u8]) -> Result<RenderingProfile, ParseError> {
    let line = std::str::from_utf8(line)
        .map_err(|_| ParseError::InvalidFormat("stream header is not ASCII".into()))?;

    let mut tokens = line.split(' ').filter(|token| !token.is_empty());

    if tokens.next() != Some("YUV4MPEG2") {
        return Err(ParseError::InvalidFormat("missing YUV4MPEG2 signature".into()));
    }

    let mut profile = RenderingProfile::new("YUV4MPEG2");
    let mut colorspace = "420jpeg";

    for token in tokens {
        let Some((tag, value)) = token.split_at_checked(1) else {
            continue;
        };

        match tag {
            "W" => profile.width = Some(parse_dimension("width", value)?),
            "H" => profile.height = Some(parse_dimension("height", value)?),
            "F" => profile.frame_rate = Some(parse_ratio(value)?),
            "C" => colorspace = value,
            "X" => match value {
                "COLORRANGE=FULL" => profile.full_range = Some(true),
                "COLORRANGE=LIMITED" => profile.full_range = Some(false),
                _ => {}
            },
            // Interlacing, aspect ratio and comments don't affect rendering
            _ => {}
        }
    }

    if profile.width.is_none() || profile.height.is_none() {
        return Err(ParseError::InvalidFormat("missing frame dimensions".into()));
    }

    let (format, bits) = match colorspace {
        "420jpeg" | "420paldv" | "420mpeg2" | "420" => ("I420", 8),
        "422" => ("I422", 8),
        "444" => ("I444", 8),
        "420p10" => ("I010", 10),
        "422p10" => ("I210", 10),
        "422p12" => ("I212", 12),
        "444p10" => ("I410", 10),
        "422p16" => ("P216", 16),
        "mono" => ("L8", 8),
        "mono16" => ("L16", 16),
        other => {
            return Err(ParseError::InvalidFormat(format!(
                "unsupported colorspace {other}"
            )));
        }
    };

    profile.format_name = Some(format.into());
    profile.bit_depth = Some(bits);

    // Samples wider than a byte are always little endian
    profile.byte_order = Some(ByteOrder::LittleEndian);

    Ok(profile)
}

fn parse_dimension(what: &str, value: &str) -> Result<usize, ParseError> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(ParseError::InvalidFormat(format!("invalid {what} {value:?}"))),
        Ok(v) => Ok(v),
    }
}

fn parse_ratio(value: &str) -> Result<(u32, u32), ParseError> {
    let invalid = || ParseError::InvalidFormat(format!("invalid frame rate {value:?}"));

    let (num, den) = value.split_once(':').ok_or_else(invalid)?;

    Ok((
        num.parse().map_err(|_| invalid())?,
        den.parse().map_err(|_| invalid())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn full_header() {
        let profile =
            parse_header(b"YUV4MPEG2 W1920 H1080 F30000:1001 Ip A1:1 C422p10 XCOLORRANGE=FULL")
                .unwrap();

        assert_eq!(profile.width, Some(1920));
        assert_eq!(profile.height, Some(1080));
        assert_eq!(profile.frame_rate, Some((30000, 1001)));
        assert_eq!(profile.format_name.as_deref(), Some("I210"));
        assert_eq!(profile.bit_depth, Some(10));
        assert_eq!(profile.full_range, Some(true));
    }

    #[test]
    fn default_colorspace_is_420() {
        let profile = parse_header(b"YUV4MPEG2 W4 H2").unwrap();

        assert_eq!(profile.format_name.as_deref(), Some("I420"));
        assert_eq!(profile.full_range, None);
    }

    #[test]
    fn rejects_bad_headers() {
        for header in [
            &b"YUV4MPEG2 H2"[..],
            b"YUV4MPEG2 W0 H2",
            b"YUV4MPEG2 Wx H2",
            b"YUV4MPEG2 W4 H2 C411",
            b"YUV4MPEG2 W4 H2 F30",
        ] {
            assert!(
                matches!(parse_header(header), Err(ParseError::InvalidFormat(_))),
                "{}",
                String::from_utf8_lossy(header)
            );
        }
    }

    #[tokio::test]
    async fn reports_first_frame_offset() {
        let header = b"YUV4MPEG2 W2 H2 Cmono\nFRAME\n";
        let mut data = header.to_vec();
        data.extend_from_slice(&[1, 2, 3, 4]);

        let profile = Y4mParser
            .parse(&mut Cursor::new(data), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profile.data_offset, header.len() as u64);
        assert_eq!(profile.format_name.as_deref(), Some("L8"));
    }

    #[tokio::test]
    async fn other_formats_are_not_recognized() {
        let profile = Y4mParser
            .parse(&mut Cursor::new(b"\x89PNG\r\n\x1a\n".to_vec()), &CancellationToken::new())
            .await
            .unwrap();

        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn missing_frame_header() {
        let result = Y4mParser
            .parse(
                &mut Cursor::new(b"YUV4MPEG2 W2 H2\nGARBAGE\n".to_vec()),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }
}
