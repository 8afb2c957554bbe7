use serde::{Deserialize, Serialize};

/// Document identifier, unique across the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);

impl DocId {
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

/// A normalized term, already lowercase and stopword-filtered.
///
/// Newtype over `String` rather than `Vec<u8>`: the tokenizer only ever
/// produces valid UTF-8, so there is no separate byte/str split to maintain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term(pub String);

impl Term {
    pub fn new(text: impl Into<String>) -> Self {
        Term(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three indexed fields, sharing one codec and one shard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Body,
    Title,
    Anchor,
}

impl FieldKind {
    pub fn folder_name(&self) -> &'static str {
        match self {
            FieldKind::Body => "postings_body",
            FieldKind::Title => "postings_title",
            FieldKind::Anchor => "postings_anchor",
        }
    }

    pub const ALL: [FieldKind; 3] = [FieldKind::Body, FieldKind::Title, FieldKind::Anchor];
}

/// One field's raw text for one document, as handed to the builder.
///
/// For the anchor field, `doc_id` is the *target* of the anchor and `text`
/// is the concatenation of all inbound anchor texts for that target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDoc {
    pub doc_id: DocId,
    pub text: String,
}

impl FieldDoc {
    pub fn new(doc_id: DocId, text: impl Into<String>) -> Self {
        FieldDoc {
            doc_id,
            text: text.into(),
        }
    }
}
