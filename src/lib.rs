//! ```text
//!            +----------------+        +----------------+
//! raw text ->| analysis       |------->| builder        |--+
//!            | (tokenizer,    |        | (per-field      |  |
//!            |  stopwords)    |        |  pipeline)       |  |
//!            +----------------+        +----------------+  |
//!                                                ^          v
//!                                                |    +-----------+
//!            +----------------+        +---------+    | storage   |
//! query text ->| query::engine |<------>| index     |<-| (layout,  |
//!            | (fusion, cache)|        | (posting, |  |  multifile)|
//!            +----------------+        |  shard,   |  +-----------+
//!                    ^                 |  descriptor)|
//!                    |                 +-----------+
//!            +----------------+
//!            | collab          |  pagerank / titles / pageviews
//!            +----------------+
//! ```
//!
//! The builder and the query engine never talk to each other directly:
//! both go through the same posting codec (`index::posting`), the same
//! shard router (`index::shard`) and the same on-disk layout
//! (`storage::layout`), so a build and a later query agree on where a
//! term's postings live without any shared in-memory state.

pub mod analysis;
pub mod builder;
pub mod collab;
pub mod core;
pub mod index;
pub mod query;
pub mod reader;
pub mod scoring;
pub mod storage;

use crate::collab::{pagerank, pageviews, titles};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::FieldKind;
use crate::index::descriptor::IndexDescriptor;
use crate::query::engine::QueryEngine;
use crate::storage::layout::StorageLayout;

/// Everything a running server needs, loaded once at startup. `Engine::load`
/// only returns `Ok` once every step in the startup ordering has succeeded
/// (descriptors, PageRank, page views, titles); nothing downstream declares
/// itself healthy before that.
pub struct Engine {
    query: QueryEngine,
}

impl Engine {
    pub fn load(config: Config) -> Result<Self> {
        let layout = StorageLayout::new(config.storage_root.clone())?;

        let body = load_descriptor(&layout, FieldKind::Body)?;
        let title = load_descriptor(&layout, FieldKind::Title)?;
        let anchor = load_descriptor(&layout, FieldKind::Anchor)?;

        let page_rank = load_page_rank(&layout)?;
        let page_views = load_page_views(&layout)?;
        let title_map = titles::load_title_map(&layout.title_map_path())?;

        log::info!(
            "engine loaded: {} body terms, {} title terms, {} anchor terms, {} pagerank entries",
            body.term_count(),
            title.term_count(),
            anchor.term_count(),
            page_rank.len(),
        );

        Ok(Engine {
            query: QueryEngine::new(layout, config, body, title, anchor, page_rank, page_views, title_map),
        })
    }

    pub fn search(&self, query: &str) -> Result<Vec<(core::types::DocId, String)>> {
        self.query.search(query)
    }

    pub fn search_title(&self, query: &str) -> Result<Vec<(core::types::DocId, String)>> {
        self.query.search_title(query)
    }

    pub fn search_anchor(&self, query: &str) -> Result<Vec<(core::types::DocId, String)>> {
        self.query.search_anchor(query)
    }

    pub fn search_body(&self, query: &str) -> Result<Vec<(core::types::DocId, String)>> {
        self.query.search_body(query)
    }

    pub fn page_rank(&self, doc_id: core::types::DocId) -> f64 {
        self.query.page_rank_for(doc_id)
    }

    pub fn page_views(&self, doc_id: core::types::DocId) -> u64 {
        self.query.page_views_for(doc_id)
    }
}

fn load_descriptor(layout: &StorageLayout, field: FieldKind) -> Result<IndexDescriptor> {
    let path = layout.descriptor_path(field);
    IndexDescriptor::load(&path).map_err(|e| {
        Error::new(
            ErrorKind::IndexLoadFailure,
            format!("{}: {}", field.folder_name(), e.context),
        )
    })
}

fn load_page_rank(layout: &StorageLayout) -> Result<std::collections::HashMap<core::types::DocId, f64>> {
    let dir = layout.page_rank_dir();
    let mut scores = std::collections::HashMap::new();
    let entries = std::fs::read_dir(&dir)?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            scores.extend(pagerank::load_pagerank_csv_gz(&path)?);
        }
    }
    Ok(scores)
}

fn load_page_views(layout: &StorageLayout) -> Result<std::collections::HashMap<core::types::DocId, u64>> {
    let path = layout.pageviews_path();
    if path.exists() {
        pageviews::load_pageview_map(&path)
    } else {
        Ok(std::collections::HashMap::new())
    }
}
