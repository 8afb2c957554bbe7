use crate::core::error::Result;
use crate::index::descriptor::PostingSegment;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Receives a finished shard file once `MultiFileWriter` rolls over to the
/// next block. The object-store upload step itself is out of scope for this
/// crate; `NoopSink` is the default and every production use of this type
/// plugs in an implementation that ships the file to durable storage.
pub trait UploadSink {
    fn upload(&mut self, path: &Path) -> Result<()>;
}

pub struct NoopSink;

impl UploadSink for NoopSink {
    fn upload(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Sequential binary writer that rolls over to a new file every
/// `block_size` bytes, numbered `{prefix}_{block:03}.bin`. Returns the
/// `(file_name, offset)` locations a write landed at so the caller can
/// record them in an `IndexDescriptor`.
pub struct MultiFileWriter<S: UploadSink = NoopSink> {
    dir: PathBuf,
    prefix: String,
    block_size: u64,
    block: u32,
    file: File,
    position: u64,
    sink: S,
}

impl MultiFileWriter<NoopSink> {
    pub fn new(dir: PathBuf, prefix: impl Into<String>, block_size: u64) -> Result<Self> {
        Self::with_sink(dir, prefix, block_size, NoopSink)
    }
}

impl<S: UploadSink> MultiFileWriter<S> {
    pub fn with_sink(dir: PathBuf, prefix: impl Into<String>, block_size: u64, sink: S) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        let prefix = prefix.into();
        let file = File::create(dir.join(Self::block_name(&prefix, 0)))?;
        Ok(MultiFileWriter {
            dir,
            prefix,
            block_size,
            block: 0,
            file,
            position: 0,
            sink,
        })
    }

    fn block_name(prefix: &str, block: u32) -> String {
        format!("{prefix}_{block:03}.bin")
    }

    fn current_file_name(&self) -> String {
        Self::block_name(&self.prefix, self.block)
    }

    fn roll_over(&mut self) -> Result<()> {
        self.file.sync_all()?;
        let finished = self.dir.join(self.current_file_name());
        self.sink.upload(&finished)?;

        self.block += 1;
        self.position = 0;
        self.file = File::create(self.dir.join(self.current_file_name()))?;
        Ok(())
    }

    /// Write `bytes`, splitting across block boundaries as needed, and
    /// return the segment locations the caller must keep to read it back.
    pub fn write(&mut self, mut bytes: &[u8]) -> Result<Vec<PostingSegment>> {
        let mut locations = Vec::new();
        while !bytes.is_empty() {
            let remaining = self.block_size - self.position;
            if remaining == 0 {
                self.roll_over()?;
                continue;
            }
            let take = remaining.min(bytes.len() as u64) as usize;
            self.file.write_all(&bytes[..take])?;
            locations.push(PostingSegment::new(self.current_file_name(), self.position));
            self.position += take as u64;
            bytes = &bytes[take..];
        }
        Ok(locations)
    }

    pub fn finish(mut self) -> Result<()> {
        self.file.sync_all()?;
        let finished = self.dir.join(self.current_file_name());
        self.sink.upload(&finished)?;
        Ok(())
    }
}

/// Sequential binary reader across however many shard files a term's
/// posting list was split over, caching one open file handle per name for
/// the lifetime of the reader.
pub struct MultiFileReader {
    dir: PathBuf,
    block_size: u64,
    open_files: HashMap<String, File>,
}

impl MultiFileReader {
    pub fn new(dir: PathBuf, block_size: u64) -> Self {
        MultiFileReader {
            dir,
            block_size,
            open_files: HashMap::new(),
        }
    }

    /// Read `n_bytes` total across `segments`, in order, tolerating a short
    /// final read rather than erroring (a caller handed a stale or
    /// corrupted descriptor gets back fewer bytes, not a crash).
    pub fn read(&mut self, segments: &[PostingSegment], mut n_bytes: u64) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(n_bytes as usize);
        for segment in segments {
            if n_bytes == 0 {
                break;
            }
            if !self.open_files.contains_key(&segment.file_name) {
                let file = File::open(self.dir.join(&segment.file_name))?;
                self.open_files.insert(segment.file_name.clone(), file);
            }
            let file = self.open_files.get_mut(&segment.file_name).expect("just inserted");
            file.seek(SeekFrom::Start(segment.offset))?;

            let available = self.block_size.saturating_sub(segment.offset);
            let to_read = n_bytes.min(available) as usize;
            let mut buf = vec![0u8; to_read];
            let read = file.read(&mut buf)?;
            buf.truncate(read);
            n_bytes -= read as u64;
            out.extend_from_slice(&buf);
        }
        Ok(out)
    }
}
