use crate::analysis::tokenize;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::{DocId, FieldDoc, FieldKind, Term};
use crate::index::descriptor::IndexDescriptor;
use crate::index::posting::Posting;
use crate::index::shard::shard_of;
use crate::storage::layout::StorageLayout;
use crate::storage::multifile::MultiFileWriter;
use rayon::prelude::*;
use std::collections::HashMap;

/// Builds one field's `IndexDescriptor` and posting shards from a stream of
/// `FieldDoc`s. One instance is used per field (body, title, anchor); the
/// anchor field's doc-id-as-target and tf-as-cross-anchor-count
/// specialization is baked into the `FieldDoc`s handed in, not into this
/// builder.
pub struct FieldIndexBuilder<'a> {
    field: FieldKind,
    layout: &'a StorageLayout,
    config: &'a Config,
}

impl<'a> FieldIndexBuilder<'a> {
    pub fn new(field: FieldKind, layout: &'a StorageLayout, config: &'a Config) -> Self {
        FieldIndexBuilder {
            field,
            layout,
            config,
        }
    }

    /// Tokenize every document, accumulate per-term posting lists sorted by
    /// doc_id, shard the term dictionary, and persist both the shard files
    /// and the resulting descriptor.
    pub fn build(&self, docs: &[FieldDoc]) -> Result<IndexDescriptor> {
        let per_doc_counts: Vec<(DocId, HashMap<Term, u32>)> = docs
            .par_iter()
            .map(|doc| (doc.doc_id, term_counts(&doc.text)))
            .collect();

        let mut postings_by_term: HashMap<Term, Vec<(DocId, u32)>> = HashMap::new();
        for (doc_id, counts) in per_doc_counts {
            for (term, count) in counts {
                postings_by_term.entry(term).or_default().push((doc_id, count));
            }
        }

        for list in postings_by_term.values_mut() {
            list.sort_by_key(|(doc_id, _)| *doc_id);
        }

        if matches!(self.field, FieldKind::Body) {
            let before = postings_by_term.len();
            postings_by_term.retain(|_, list| list.len() as u32 >= self.config.body_df_floor);
            let dropped = before - postings_by_term.len();
            if dropped > 0 {
                log::debug!(
                    "body descriptor: dropped {dropped} terms with df < {}",
                    self.config.body_df_floor
                );
            }
        }

        let mut terms_by_shard: HashMap<u32, Vec<Term>> = HashMap::new();
        for term in postings_by_term.keys() {
            let shard_id = shard_of(term, self.config.shard_count);
            terms_by_shard.entry(shard_id).or_default().push(term.clone());
        }

        let mut descriptor = IndexDescriptor::new();
        let dir = self.layout.field_dir(self.field);

        for (shard_id, mut terms) in terms_by_shard {
            terms.sort();
            let mut writer = MultiFileWriter::new(dir.clone(), shard_id.to_string(), self.config.block_size)?;

            for term in terms {
                let postings = &postings_by_term[&term];
                let mut bytes = Vec::with_capacity(postings.len() * crate::index::posting::POSTING_SIZE);
                for (doc_id, count) in postings {
                    bytes.extend_from_slice(&Posting::from_count(*doc_id, *count as usize).encode());
                }
                let segments = writer.write(&bytes)?;
                descriptor.insert(term, postings.len() as u32, segments);
            }

            writer.finish()?;
        }

        log::info!(
            "built {} descriptor: {} terms across {} shards",
            self.field.folder_name(),
            descriptor.term_count(),
            self.config.shard_count
        );

        descriptor.save(&self.layout.descriptor_path(self.field))?;
        Ok(descriptor)
    }
}

fn term_counts(text: &str) -> HashMap<Term, u32> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
