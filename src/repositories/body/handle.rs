//! Shared seekable byte stream.

use bytes::Bytes;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;

/// Any readable, seekable byte source that can be moved across threads.
///
/// Blanket-implemented; `std::fs::File` and `std::io::Cursor` both qualify.
pub trait SeekableRead: Read + Seek + Send {}

impl<T: Read + Seek + Send> SeekableRead for T {}

/// A seekable byte stream shared between every clone of the handle.
///
/// Clones point at the same underlying stream and therefore the same cursor
/// position: reading through one clone moves the position seen by the others.
/// Two handles compare equal only when they wrap the same stream.
///
/// The handle does not close anything on its own; the underlying resource is
/// released when the last clone is dropped.
///
/// # Examples
///
/// ```
/// use tavern_http::StreamHandle;
///
/// let stream = StreamHandle::memory("Howdy");
/// let alias = stream.clone();
///
/// assert_eq!(stream.read_to_end().unwrap(), b"Howdy");
/// // The alias shares the position, which is now at the end.
/// assert!(alias.read_to_end().unwrap().is_empty());
///
/// alias.rewind().unwrap();
/// assert_eq!(stream.read_to_end().unwrap(), b"Howdy");
/// assert_eq!(stream, alias);
/// ```
#[derive(Clone)]
pub struct StreamHandle {
    inner: Arc<Mutex<Box<dyn SeekableRead>>>,
}

impl StreamHandle {
    /// Wrap a raw readable resource
    pub fn new<R>(resource: R) -> Self
    where
        R: Read + Seek + Send + 'static,
    {
        Self::from_boxed(Box::new(resource))
    }

    /// Wrap an already boxed resource
    pub fn from_boxed(resource: Box<dyn SeekableRead>) -> Self {
        StreamHandle {
            inner: Arc::new(Mutex::new(resource)),
        }
    }

    /// In-memory stream positioned at offset 0
    pub fn memory(content: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(content.into()))
    }

    /// Read everything from the current position to the end.
    ///
    /// Leaves the position at the end of the stream.
    pub fn read_to_end(&self) -> io::Result<Vec<u8>> {
        let mut stream = self.inner.lock();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read the remainder of the stream, then seek back to offset 0.
    ///
    /// The rewind is attempted even when the read fails; the read error wins.
    pub fn read_remaining_and_rewind(&self) -> io::Result<Bytes> {
        let mut stream = self.inner.lock();
        let mut buf = Vec::new();
        let read = stream.read_to_end(&mut buf);
        let rewound = stream.seek(SeekFrom::Start(0));
        read?;
        rewound?;
        Ok(Bytes::from(buf))
    }

    /// Seek back to offset 0
    pub fn rewind(&self) -> io::Result<()> {
        self.inner.lock().seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Move the cursor
    pub fn seek(&self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.lock().seek(pos)
    }

    /// Current cursor position
    pub fn tell(&self) -> io::Result<u64> {
        self.inner.lock().stream_position()
    }

    /// Total length in bytes; the cursor position is preserved
    pub fn size(&self) -> io::Result<u64> {
        let mut stream = self.inner.lock();
        let current = stream.stream_position()?;
        let end = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(current))?;
        Ok(end)
    }

    /// Whether both handles wrap the same underlying stream
    pub fn ptr_eq(&self, other: &StreamHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for StreamHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for StreamHandle {}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("stream", &Arc::as_ptr(&self.inner))
            .finish()
    }
}
