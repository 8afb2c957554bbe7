pub mod bm25;

pub use bm25::{bm25_score, idf, tf_log_idf_score};
