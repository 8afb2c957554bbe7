use crate::core::types::DocId;

/// Size in bytes of one encoded posting.
pub const POSTING_SIZE: usize = 6;

/// A single (doc_id, term_freq) entry in a term's posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u16,
}

impl Posting {
    pub fn new(doc_id: DocId, term_freq: u16) -> Self {
        Posting { doc_id, term_freq }
    }

    /// Build a posting from a raw occurrence count, saturating at `u16::MAX`
    /// rather than wrapping or failing.
    pub fn from_count(doc_id: DocId, count: usize) -> Self {
        let term_freq = u16::try_from(count).unwrap_or(u16::MAX);
        Posting { doc_id, term_freq }
    }

    /// Encode as 6 big-endian bytes: the 48-bit word
    /// `(doc_id << 16) | (term_freq & 0xFFFF)`. Since `doc_id` occupies the
    /// high 32 bits of that word and `term_freq` the low 16, this reduces to
    /// concatenating the two values' big-endian byte forms.
    pub fn encode(&self) -> [u8; POSTING_SIZE] {
        let mut buf = [0u8; POSTING_SIZE];
        buf[0..4].copy_from_slice(&self.doc_id.0.to_be_bytes());
        buf[4..6].copy_from_slice(&self.term_freq.to_be_bytes());
        buf
    }

    /// Decode from exactly 6 bytes: a 4-byte big-endian doc_id followed by a
    /// 2-byte big-endian term_freq.
    pub fn decode(bytes: &[u8; POSTING_SIZE]) -> Self {
        let doc_id = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let term_freq = u16::from_be_bytes([bytes[4], bytes[5]]);
        Posting {
            doc_id: DocId(doc_id),
            term_freq,
        }
    }
}

/// Decode a byte slice into postings, truncating the tail down to a
/// multiple of `POSTING_SIZE` rather than erroring on a short final
/// segment — the spec tolerates a short read instead of crashing.
pub fn decode_all(bytes: &[u8]) -> Vec<Posting> {
    let usable = bytes.len() - (bytes.len() % POSTING_SIZE);
    bytes[..usable]
        .chunks_exact(POSTING_SIZE)
        .map(|chunk| {
            let array: [u8; POSTING_SIZE] = chunk.try_into().expect("chunk is POSTING_SIZE bytes");
            Posting::decode(&array)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let p = Posting::new(DocId(305_419_896), 65534);
        let bytes = p.encode();
        assert_eq!(bytes, [0x12, 0x34, 0x56, 0x78, 0xFF, 0xFE]);
        assert_eq!(Posting::decode(&bytes), p);
    }

    #[test]
    fn saturates_term_freq() {
        let p = Posting::from_count(DocId(1), 200_000);
        assert_eq!(p.term_freq, u16::MAX);
    }

    #[test]
    fn decode_all_tolerates_short_tail() {
        let mut bytes = Posting::new(DocId(1), 1).encode().to_vec();
        bytes.extend(Posting::new(DocId(2), 2).encode());
        bytes.push(0xAB); // a stray trailing byte, not a full posting
        let postings = decode_all(&bytes);
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].doc_id, DocId(1));
        assert_eq!(postings[1].doc_id, DocId(2));
    }

    #[test]
    fn round_trip_property_like_sample() {
        for (doc_id, tf) in [(0u32, 0u16), (1, 1), (u32::MAX, u16::MAX), (42, 1000)] {
            let p = Posting::new(DocId(doc_id), tf);
            assert_eq!(Posting::decode(&p.encode()), p);
        }
    }
}
