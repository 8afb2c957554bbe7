pub mod pagerank;
pub mod pageviews;
pub mod titles;

pub use pagerank::load_pagerank_csv_gz;
pub use pageviews::load_pageview_map;
pub use titles::{load_title_map, TitleMap};
