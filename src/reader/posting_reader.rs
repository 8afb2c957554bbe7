use crate::core::types::{FieldKind, Term};
use crate::index::descriptor::IndexDescriptor;
use crate::index::posting::{decode_all, Posting, POSTING_SIZE};
use crate::storage::layout::StorageLayout;
use crate::storage::multifile::MultiFileReader;

/// Reads posting lists for one field, caching open file handles for its own
/// lifetime. Each query gets its own `PostingReader` per field rather than
/// sharing one across requests: the file handle cache is not thread-safe,
/// and per-request isolation keeps a slow or corrupt read from one query
/// from blocking another.
pub struct PostingReader<'a> {
    descriptor: &'a IndexDescriptor,
    reader: MultiFileReader,
}

impl<'a> PostingReader<'a> {
    pub fn new(field: FieldKind, layout: &StorageLayout, descriptor: &'a IndexDescriptor, block_size: u64) -> Self {
        PostingReader {
            descriptor,
            reader: MultiFileReader::new(layout.field_dir(field), block_size),
        }
    }

    /// Read `term`'s posting list, capped to `max_docs_to_read` entries. A
    /// term absent from the descriptor yields an empty list rather than an
    /// error — an unknown term is simply a query with zero matches, not a
    /// failure. A read failure against a present term (`PostingReadFailure`
    /// territory: a missing or truncated shard file) is logged and also
    /// yields an empty list, so a single bad posting list degrades the
    /// query instead of failing it outright.
    pub fn read(&mut self, term: &Term, max_docs_to_read: u32) -> Vec<Posting> {
        let Some(df) = self.descriptor.document_frequency(term) else {
            return Vec::new();
        };
        let Some(segments) = self.descriptor.segments(term) else {
            return Vec::new();
        };

        let capped_df = df.min(max_docs_to_read);
        let need = capped_df as u64 * POSTING_SIZE as u64;

        match self.reader.read(segments, need) {
            Ok(bytes) => decode_all(&bytes),
            Err(err) => {
                log::warn!("posting read failed for term '{term}': {err}");
                Vec::new()
            }
        }
    }

    pub fn document_frequency(&self, term: &Term) -> Option<u32> {
        self.descriptor.document_frequency(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::pipeline::FieldIndexBuilder;
    use crate::core::config::Config;
    use crate::core::types::{DocId, FieldDoc};

    #[test]
    fn reads_back_what_the_builder_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let config = Config::default();

        let docs = vec![
            FieldDoc::new(DocId(1), "wikipedia encyclopedia"),
            FieldDoc::new(DocId(2), "wikipedia article"),
        ];
        let builder = FieldIndexBuilder::new(FieldKind::Title, &layout, &config);
        let descriptor = builder.build(&docs).unwrap();

        let mut reader = PostingReader::new(FieldKind::Title, &layout, &descriptor, config.block_size);
        let postings = reader.read(&Term::new("wikipedia"), config.max_docs_to_read);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].doc_id, DocId(1));
        assert_eq!(postings[1].doc_id, DocId(2));
    }

    #[test]
    fn unknown_term_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let descriptor = IndexDescriptor::new();
        let mut reader = PostingReader::new(FieldKind::Body, &layout, &descriptor, 1_999_998);
        assert!(reader.read(&Term::new("absent"), 15_000).is_empty());
    }

    #[test]
    fn caps_results_at_max_docs_to_read() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let config = Config::default();

        let docs: Vec<FieldDoc> = (1..=10u32)
            .map(|id| FieldDoc::new(DocId(id), "common"))
            .collect();
        let builder = FieldIndexBuilder::new(FieldKind::Title, &layout, &config);
        let descriptor = builder.build(&docs).unwrap();

        let mut reader = PostingReader::new(FieldKind::Title, &layout, &descriptor, config.block_size);
        let postings = reader.read(&Term::new("common"), 3);
        assert_eq!(postings.len(), 3);
    }
}
