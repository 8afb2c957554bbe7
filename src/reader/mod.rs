pub mod posting_reader;

pub use posting_reader::PostingReader;
