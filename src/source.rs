//! Byte sources the parser reads from.
//!
//! Every source answers `read_range(start, end)` with exactly `end - start`
//! bytes or an error. The call returns a future: in-memory sources resolve
//! immediately, file handles may suspend. The parser treats both the same way.

use crate::error::{ParseError, Result};
use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll, Waker};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

pub trait ByteSource {
    /// Total number of bytes available.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes in `[start, end)`.
    fn read_range(&mut self, start: u64, end: u64) -> impl Future<Output = Result<Vec<u8>>>;
}

fn check_range(start: u64, end: u64, len: u64) -> Result<()> {
    if start > end || end > len {
        return Err(ParseError::OutOfRange { start, end, len });
    }
    Ok(())
}

fn slice_range(data: &[u8], start: u64, end: u64) -> Result<Vec<u8>> {
    check_range(start, end, data.len() as u64)?;
    Ok(data[start as usize..end as usize].to_vec())
}

impl ByteSource for &[u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    async fn read_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        slice_range(*self, start, end)
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> u64 {
        Vec::len(self) as u64
    }

    async fn read_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        slice_range(self, start, end)
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn len(&self) -> u64 {
        self.get_ref().as_ref().len() as u64
    }

    async fn read_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        slice_range(self.get_ref().as_ref(), start, end)
    }
}

/// Synchronous file-like handle (`File`, `BufReader<File>`, ...).
pub struct ReaderSource<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> ReaderSource<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self { inner, len })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for ReaderSource<R> {
    fn len(&self) -> u64 {
        self.len
    }

    async fn read_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        check_range(start, end, self.len)?;
        self.inner.seek(SeekFrom::Start(start))?;
        let mut v = vec![0u8; (end - start) as usize];
        self.inner.read_exact(&mut v)?;
        Ok(v)
    }
}

/// Asynchronous file-like handle. Reads suspend on the underlying I/O.
pub struct AsyncSource<R> {
    inner: R,
    len: u64,
}

impl<R: AsyncRead + AsyncSeek + Unpin> AsyncSource<R> {
    /// Wraps a handle whose total length is already known.
    pub fn new(inner: R, len: u64) -> Self {
        Self { inner, len }
    }

    /// Wraps a handle, asking it for its length by seeking to the end.
    pub async fn from_handle(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0)).await?;
        Ok(Self { inner, len })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl AsyncSource<tokio::fs::File> {
    /// Opens a regular file. Directories and other non-file paths are rejected.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(ParseError::UnsupportedSourceType(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        Ok(Self::new(file, meta.len()))
    }
}

impl<R: AsyncRead + AsyncSeek + Unpin> ByteSource for AsyncSource<R> {
    fn len(&self) -> u64 {
        self.len
    }

    async fn read_range(&mut self, start: u64, end: u64) -> Result<Vec<u8>> {
        check_range(start, end, self.len)?;
        self.inner.seek(SeekFrom::Start(start)).await?;
        let mut v = vec![0u8; (end - start) as usize];
        self.inner.read_exact(&mut v).await?;
        Ok(v)
    }
}

/// Drives a future that never suspends, such as a read from memory or from a
/// blocking `Read + Seek` handle.
pub(crate) fn resolve_ready<F: Future>(fut: F) -> F::Output {
    let mut cx = Context::from_waker(Waker::noop());
    match pin!(fut).poll(&mut cx) {
        Poll::Ready(out) => out,
        Poll::Pending => unreachable!("synchronous byte source suspended"),
    }
}
