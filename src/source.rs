//! Asynchronous byte sources that renderers and parsers read from.

use std::future::Future;
use std::io::{self, Cursor};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncSeek};

/// How a stream is opened.
///
/// Rendering and parsing only ever open with [`StreamAccess::Read`]. `ReadWrite` is part of
/// the source contract for callers that patch headers in place. Sources that cannot be
/// written to refuse it with [`io::ErrorKind::PermissionDenied`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamAccess {
    #[default]
    Read,
    ReadWrite,
}

/// A logical source of bytes that can be opened any number of times.
///
/// Every call to [`open_stream`](DataSource::open_stream) yields an independent stream
/// positioned at the start of the source. Dropping the stream closes it.
pub trait DataSource: Send + Sync {
    type Stream: AsyncRead + AsyncSeek + Unpin + Send;

    fn open_stream(
        &self,
        access: StreamAccess,
    ) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// A file on disk, opened through tokio
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl DataSource for FileDataSource {
    type Stream = tokio::fs::File;

    async fn open_stream(&self, access: StreamAccess) -> io::Result<Self::Stream> {
        tokio::fs::OpenOptions::new()
            .read(true)
            .write(access == StreamAccess::ReadWrite)
            .open(&self.path)
            .await
    }
}

/// Bytes held in memory, shared between all opened streams
#[derive(Debug, Clone)]
pub struct MemoryDataSource {
    data: Arc<[u8]>,
}

impl MemoryDataSource {
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl DataSource for MemoryDataSource {
    type Stream = Cursor<Arc<[u8]>>;

    async fn open_stream(&self, access: StreamAccess) -> io::Result<Self::Stream> {
        if access == StreamAccess::ReadWrite {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "memory data source is read only",
            ));
        }

        Ok(Cursor::new(self.data.clone()))
    }
}
