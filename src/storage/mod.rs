pub mod layout;
pub mod multifile;

pub use layout::StorageLayout;
pub use multifile::{MultiFileReader, MultiFileWriter, NoopSink, UploadSink};
