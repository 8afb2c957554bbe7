use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Term;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// On-disk format tag. Bumped whenever the encoding of `IndexDescriptor`
/// changes incompatibly; `IndexDescriptor::load` refuses to open a
/// descriptor written by a different version instead of guessing.
pub const DESCRIPTOR_VERSION: u32 = 1;

/// Where one term's posting list lives: a shard file name and a byte offset
/// into it. The length of the list is `df * POSTING_SIZE` bytes, read from
/// `IndexDescriptor::df`, so it is not duplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingSegment {
    pub file_name: String,
    pub offset: u64,
}

impl PostingSegment {
    pub fn new(file_name: impl Into<String>, offset: u64) -> Self {
        PostingSegment {
            file_name: file_name.into(),
            offset,
        }
    }
}

/// The term dictionary for one field: document frequency and posting
/// locations per term. One `IndexDescriptor` is built and persisted per
/// field (body, title, anchor); the three are structurally identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDescriptor {
    version: u32,
    df: HashMap<Term, u32>,
    posting_locs: HashMap<Term, Vec<PostingSegment>>,
}

impl IndexDescriptor {
    pub fn new() -> Self {
        IndexDescriptor {
            version: DESCRIPTOR_VERSION,
            df: HashMap::new(),
            posting_locs: HashMap::new(),
        }
    }

    /// Record one term's final document frequency and the segments its
    /// posting list was split across. Called once per term during a build;
    /// a second call for the same term overwrites the first.
    pub fn insert(&mut self, term: Term, df: u32, segments: Vec<PostingSegment>) {
        self.df.insert(term.clone(), df);
        self.posting_locs.insert(term, segments);
    }

    pub fn document_frequency(&self, term: &Term) -> Option<u32> {
        self.df.get(term).copied()
    }

    pub fn segments(&self, term: &Term) -> Option<&[PostingSegment]> {
        self.posting_locs.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.df.contains_key(term)
    }

    pub fn term_count(&self) -> usize {
        self.df.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.df.keys()
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let descriptor: IndexDescriptor = bincode::deserialize(bytes)?;
        if descriptor.version != DESCRIPTOR_VERSION {
            return Err(Error::new(
                ErrorKind::IndexLoadFailure,
                format!(
                    "descriptor version {} does not match expected {}",
                    descriptor.version, DESCRIPTOR_VERSION
                ),
            ));
        }
        Ok(descriptor)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut file = std::fs::File::open(path).map_err(|e| {
            Error::new(
                ErrorKind::IndexLoadFailure,
                format!("opening descriptor {}: {e}", path.display()),
            )
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            Error::new(
                ErrorKind::IndexLoadFailure,
                format!("reading descriptor {}: {e}", path.display()),
            )
        })?;
        Self::decode(&bytes).map_err(|e| {
            Error::new(
                ErrorKind::IndexLoadFailure,
                format!("decoding descriptor {}: {}", path.display(), e.context),
            )
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for IndexDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IndexDescriptor {
        let mut d = IndexDescriptor::new();
        d.insert(
            Term::new("wikipedia"),
            3,
            vec![PostingSegment::new("3_000.bin", 0)],
        );
        d.insert(
            Term::new("rust"),
            1,
            vec![PostingSegment::new("7_002.bin", 1_999_992)],
        );
        d
    }

    #[test]
    fn round_trips_through_bincode() {
        let original = sample();
        let bytes = original.encode().unwrap();
        let decoded = IndexDescriptor::decode(&bytes).unwrap();
        assert_eq!(decoded.document_frequency(&Term::new("wikipedia")), Some(3));
        assert_eq!(
            decoded.segments(&Term::new("rust")),
            Some(&[PostingSegment::new("7_002.bin", 1_999_992)][..])
        );
        assert!(!decoded.contains(&Term::new("absent")));
    }

    #[test]
    fn rejects_mismatched_version() {
        let mut descriptor = sample();
        descriptor.version = DESCRIPTOR_VERSION + 1;
        let bytes = bincode::serialize(&descriptor).unwrap();
        let err = IndexDescriptor::decode(&bytes).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IndexLoadFailure));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.descriptor");
        let original = sample();
        original.save(&path).unwrap();
        let loaded = IndexDescriptor::load(&path).unwrap();
        assert_eq!(loaded.term_count(), original.term_count());
    }
}
