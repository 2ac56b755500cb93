//! Input sources for the chunked reader
//!
//! A [`ChunkSource`] is a byte source of known size that can be read at an
//! arbitrary offset. The walk never holds a whole source in memory unless the
//! source itself is in memory ([`MemorySource`], used in tests). Piped input is
//! spooled to a temporary file and read through [`FileSource::from_file`].

pub mod chunked;

pub use chunked::{Chunk, ChunkedReader, LineFragment, LineKind};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Random-access byte source with a size known up front.
pub trait ChunkSource {
    /// Display name, used for change detection and logging.
    fn name(&self) -> &str;

    /// Total size in bytes.
    fn total_size(&self) -> u64;

    /// Fill `buf` completely with the bytes starting at `offset`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn total_size(&self) -> u64 {
        (**self).total_size()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
        (**self).read_at(offset, buf)
    }
}

/// File on disk, read with seek + `read_exact`.
pub struct FileSource {
    name: String,
    size: u64,
    file: File,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let source = Self::from_file(name, File::open(path)?)?;
        log::debug!("Opened {} ({} bytes)", path.display(), source.size);
        Ok(source)
    }

    /// Wraps an already open file, e.g. an anonymous spool file.
    pub fn from_file<N: Into<String>>(name: N, file: File) -> std::io::Result<Self> {
        let size = file.metadata()?.len();
        Ok(Self {
            name: name.into(),
            size,
            file,
        })
    }
}

impl ChunkSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn total_size(&self) -> u64 {
        self.size
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)
    }
}

/// In-memory source.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new<N: Into<String>, D: Into<Vec<u8>>>(name: N, data: D) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl ChunkSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn total_size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "offset out of range"))?;
        let end = start
            .checked_add(buf.len())
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "read past end of source"))?;

        buf.copy_from_slice(&self.data[start..end]);
        Ok(())
    }
}
