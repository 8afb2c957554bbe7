pub mod descriptor;
pub mod posting;
pub mod shard;

pub use descriptor::{IndexDescriptor, PostingSegment};
pub use posting::{Posting, POSTING_SIZE};
pub use shard::shard_of;
