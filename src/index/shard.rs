use crate::core::types::Term;
use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};

const DIGEST_SIZE: usize = 5;

/// `shard(term) = blake2b(utf8(term), digest_size=5) as a big-endian
/// unsigned integer, mod shard_count`.
///
/// Deterministic and stateless: two independent builds, or a build and a
/// later query, always agree on which shard a term lives in. Changing
/// `DIGEST_SIZE` or the hash function invalidates every on-disk artifact.
pub fn shard_of(term: &Term, shard_count: u32) -> u32 {
    let mut hasher = Blake2bVar::new(DIGEST_SIZE).expect("digest size is within blake2b's range");
    hasher.update(term.as_str().as_bytes());

    let mut digest = [0u8; DIGEST_SIZE];
    hasher
        .finalize_variable(&mut digest)
        .expect("buffer is exactly DIGEST_SIZE bytes");

    let mut widened = [0u8; 8];
    widened[8 - DIGEST_SIZE..].copy_from_slice(&digest);
    let value = u64::from_be_bytes(widened);

    (value % shard_count as u64) as u32
}
