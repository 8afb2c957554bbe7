use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const UNKNOWN_TITLE: &str = "N/A";

/// `doc_id -> title` lookup, persisted as a bincode blob. There is no
/// "original pickle" to stay bug-compatible with here: the parquet pipeline
/// that produces titles is out of scope, so this crate defines its own
/// on-disk shape for the map it both writes (via tooling, not shown here)
/// and reads at query time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleMap {
    titles: HashMap<DocId, String>,
}

impl TitleMap {
    pub fn new(titles: HashMap<DocId, String>) -> Self {
        TitleMap { titles }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            Error::new(ErrorKind::IndexLoadFailure, format!("reading title map {}: {e}", path.display()))
        })?;
        let titles: HashMap<DocId, String> = bincode::deserialize(&bytes)?;
        Ok(TitleMap { titles })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(&self.titles)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Title for `doc_id`, or the `"N/A"` sentinel for an unknown id — never
    /// an error, since title hydration is a display concern and the spec
    /// says an unknown doc_id degrades, it doesn't fail the query.
    pub fn title_for(&self, doc_id: DocId) -> &str {
        self.titles.get(&doc_id).map(String::as_str).unwrap_or(UNKNOWN_TITLE)
    }
}

pub fn load_title_map(path: &Path) -> Result<TitleMap> {
    TitleMap::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_doc_id_yields_sentinel() {
        let map = TitleMap::new(HashMap::from([(DocId(1), "Wikipedia".to_string())]));
        assert_eq!(map.title_for(DocId(1)), "Wikipedia");
        assert_eq!(map.title_for(DocId(999)), "N/A");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.bin");
        let map = TitleMap::new(HashMap::from([(DocId(42), "Rust".to_string())]));
        map.save(&path).unwrap();

        let loaded = load_title_map(&path).unwrap();
        assert_eq!(loaded.title_for(DocId(42)), "Rust");
    }
}
