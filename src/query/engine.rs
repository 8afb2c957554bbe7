use crate::analysis::tokenize;
use crate::collab::pagerank::page_rank_of;
use crate::collab::pageviews::page_views_of;
use crate::collab::titles::TitleMap;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::{DocId, FieldKind};
use crate::index::descriptor::IndexDescriptor;
use crate::query::accumulator::ScoreAccumulator;
use crate::query::cache::QueryCache;
use crate::reader::posting_reader::PostingReader;
use crate::scoring::bm25::{bm25_score, tf_log_idf_score};
use crate::storage::layout::StorageLayout;
use std::collections::HashMap;
use std::sync::Arc;

const RESULT_LIMIT: usize = 100;

/// Ranked search over the three field indices, fused with BM25 on the body
/// and a PageRank boost. One instance is loaded once at startup and shared
/// read-only across concurrent requests; nothing behind it is mutated after
/// `load` returns, so no request-level locking is needed.
pub struct QueryEngine {
    layout: StorageLayout,
    config: Config,
    body: IndexDescriptor,
    title: IndexDescriptor,
    anchor: IndexDescriptor,
    page_rank: HashMap<DocId, f64>,
    page_views: HashMap<DocId, u64>,
    title_map: TitleMap,
    corpus_size: u64,
    cache: QueryCache,
}

impl QueryEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layout: StorageLayout,
        config: Config,
        body: IndexDescriptor,
        title: IndexDescriptor,
        anchor: IndexDescriptor,
        page_rank: HashMap<DocId, f64>,
        page_views: HashMap<DocId, u64>,
        title_map: TitleMap,
    ) -> Self {
        let corpus_size = if page_rank.is_empty() {
            config.fallback_corpus_size
        } else {
            page_rank.len() as u64
        };
        let cache = QueryCache::new(config.query_cache_size);

        QueryEngine {
            layout,
            config,
            body,
            title,
            anchor,
            page_rank,
            page_views,
            title_map,
            corpus_size,
            cache,
        }
    }

    pub fn page_rank_for(&self, doc_id: DocId) -> f64 {
        page_rank_of(&self.page_rank, doc_id)
    }

    pub fn page_views_for(&self, doc_id: DocId) -> u64 {
        page_views_of(&self.page_views, doc_id)
    }

    /// Primary multi-field ranked search: title pass (flat boost) + anchor
    /// pass (`W_ANCHOR * tf`) + body pass (BM25), then a PageRank boost,
    /// then stable top-100, then title hydration.
    pub fn search(&self, query: &str) -> Result<Vec<(DocId, String)>> {
        if let Some(cached) = self.cache.get(query) {
            return Ok((*cached).clone());
        }

        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scores = ScoreAccumulator::new();

        let mut title_reader = PostingReader::new(FieldKind::Title, &self.layout, &self.title, self.config.block_size);
        let mut anchor_reader = PostingReader::new(FieldKind::Anchor, &self.layout, &self.anchor, self.config.block_size);
        let mut body_reader = PostingReader::new(FieldKind::Body, &self.layout, &self.body, self.config.block_size);

        for term in &terms {
            for posting in title_reader.read(term, self.config.max_docs_to_read) {
                scores.add(posting.doc_id, self.config.weights.title);
            }

            for posting in anchor_reader.read(term, self.config.max_docs_to_read) {
                scores.add(posting.doc_id, self.config.weights.anchor * posting.term_freq as f32);
            }

            if let Some(df) = self.body.document_frequency(term) {
                if df > 0 {
                    for posting in body_reader.read(term, self.config.max_docs_to_read) {
                        let contribution = bm25_score(
                            posting.term_freq as u32,
                            df,
                            self.corpus_size,
                            self.config.bm25.k1,
                            self.config.bm25.b,
                        );
                        scores.add(posting.doc_id, self.config.weights.body * contribution);
                    }
                }
            }
        }

        let matched: Vec<DocId> = scores.doc_ids().collect();
        for doc_id in matched {
            let boost = self.config.weights.page_rank * (self.page_rank_for(doc_id) + 1.0).log10() as f32;
            scores.add(doc_id, boost);
        }

        let ranked = self.hydrate(scores.into_stable_top(RESULT_LIMIT));
        self.cache.put(query.to_string(), Arc::new(ranked.clone()));
        Ok(ranked)
    }

    /// Title-only variant: bare flat match per term, tf ignored.
    pub fn search_title(&self, query: &str) -> Result<Vec<(DocId, String)>> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let mut reader = PostingReader::new(FieldKind::Title, &self.layout, &self.title, self.config.block_size);
        let mut scores = ScoreAccumulator::new();
        for term in &terms {
            for posting in reader.read(term, self.config.max_docs_to_read) {
                scores.add(posting.doc_id, 1.0);
            }
        }
        Ok(self.hydrate(scores.into_stable_top(RESULT_LIMIT)))
    }

    /// Anchor-only variant: bare tf per term.
    pub fn search_anchor(&self, query: &str) -> Result<Vec<(DocId, String)>> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let mut reader = PostingReader::new(FieldKind::Anchor, &self.layout, &self.anchor, self.config.block_size);
        let mut scores = ScoreAccumulator::new();
        for term in &terms {
            for posting in reader.read(term, self.config.max_docs_to_read) {
                scores.add(posting.doc_id, posting.term_freq as f32);
            }
        }
        Ok(self.hydrate(scores.into_stable_top(RESULT_LIMIT)))
    }

    /// Body-only variant: `tf * log10(N / df)`, the simplified diagnostic
    /// scoring used by the grading harness instead of full BM25.
    pub fn search_body(&self, query: &str) -> Result<Vec<(DocId, String)>> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let mut reader = PostingReader::new(FieldKind::Body, &self.layout, &self.body, self.config.block_size);
        let mut scores = ScoreAccumulator::new();
        for term in &terms {
            let Some(df) = self.body.document_frequency(term) else {
                continue;
            };
            for posting in reader.read(term, self.config.max_docs_to_read) {
                scores.add(
                    posting.doc_id,
                    tf_log_idf_score(posting.term_freq as u32, df, self.corpus_size),
                );
            }
        }
        Ok(self.hydrate(scores.into_stable_top(RESULT_LIMIT)))
    }

    fn hydrate(&self, ranked: Vec<(DocId, f32)>) -> Vec<(DocId, String)> {
        ranked
            .into_iter()
            .map(|(doc_id, _)| (doc_id, self.title_map.title_for(doc_id).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::pipeline::FieldIndexBuilder;
    use crate::core::types::FieldDoc;

    fn empty_engine(dir: &std::path::Path) -> QueryEngine {
        let layout = StorageLayout::new(dir.to_path_buf()).unwrap();
        let config = Config::default();
        QueryEngine::new(
            layout,
            config,
            IndexDescriptor::new(),
            IndexDescriptor::new(),
            IndexDescriptor::new(),
            HashMap::new(),
            HashMap::new(),
            TitleMap::new(HashMap::new()),
        )
    }

    #[test]
    fn empty_query_returns_no_results() {
        let dir = tempfile::tempdir().unwrap();
        let engine = empty_engine(dir.path());
        assert!(engine.search("").unwrap().is_empty());
        assert!(engine.search("the of and").unwrap().is_empty());
    }

    #[test]
    fn body_pass_ranks_by_bm25_and_hydrates_titles() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.body_df_floor = 1;

        let docs = vec![
            FieldDoc::new(DocId(1), "wikipedia is a free online encyclopedia"),
            FieldDoc::new(DocId(2), "wikipedia wikipedia wikipedia mentions itself repeatedly"),
        ];
        let body = FieldIndexBuilder::new(FieldKind::Body, &layout, &config)
            .build(&docs)
            .unwrap();

        let title_map = TitleMap::new(HashMap::from([
            (DocId(1), "Wikipedia".to_string()),
            (DocId(2), "Self-reference".to_string()),
        ]));

        let engine = QueryEngine::new(
            layout,
            config,
            body,
            IndexDescriptor::new(),
            IndexDescriptor::new(),
            HashMap::new(),
            HashMap::new(),
            title_map,
        );

        let results = engine.search("wikipedia").unwrap();
        assert_eq!(results.len(), 2);
        // Doc 2 repeats the term three times, so BM25's tf-saturation puts
        // it ahead of doc 1's single mention.
        assert_eq!(results[0].0, DocId(2));
        assert_eq!(results[0].1, "Self-reference");
    }

    #[test]
    fn unknown_terms_yield_no_matches_without_erroring() {
        let dir = tempfile::tempdir().unwrap();
        let engine = empty_engine(dir.path());
        assert!(engine.search("nonexistent gibberish").unwrap().is_empty());
    }

    #[test]
    fn repeated_query_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let config = Config::default();
        let docs = vec![FieldDoc::new(DocId(1), "wikipedia")];
        let title = FieldIndexBuilder::new(FieldKind::Title, &layout, &config)
            .build(&docs)
            .unwrap();
        let title_map = TitleMap::new(HashMap::from([(DocId(1), "Wikipedia".to_string())]));

        let engine = QueryEngine::new(
            layout,
            config,
            IndexDescriptor::new(),
            title,
            IndexDescriptor::new(),
            HashMap::new(),
            HashMap::new(),
            title_map,
        );

        let first = engine.search("wikipedia").unwrap();
        let second = engine.search("wikipedia").unwrap();
        assert_eq!(first, second);
    }
}
