use std::path::PathBuf;

/// Bytes per shard file before the `MultiFileWriter` rolls over to the next.
pub const BLOCK_SIZE: u64 = 1_999_998;

/// Number of term shards. Coupled to the 5-byte blake2b digest used by the
/// bucket router; changing this invalidates every on-disk artifact.
pub const SHARD_COUNT: u32 = 124;

/// Body-only term filter: terms with fewer postings than this are dropped
/// from the body descriptor to curb the inverted-index tail. Terms with
/// df <= 50 are dropped, so the minimum surviving df is 51.
pub const BODY_DF_FLOOR: u32 = 51;

/// Pruning cap applied to every posting read: caps latency by truncating
/// the (doc_id-sorted, not score-sorted) head of very common terms' lists.
pub const MAX_DOCS_TO_READ: u32 = 15_000;

/// Fallback corpus size used for IDF when the PageRank map is empty.
pub const FALLBACK_CORPUS_SIZE: u64 = 6_348_910;

#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    pub k1: f32,
    /// Length normalization strength. Fixed at 0: document lengths are not
    /// persisted, so normalizing by them is not possible here.
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.2, b: 0.0 }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FusionWeights {
    pub title: f32,
    pub anchor: f32,
    pub body: f32,
    pub page_rank: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        FusionWeights {
            title: 0.1,
            anchor: 0.1,
            body: 25.0,
            page_rank: 0.01,
        }
    }
}

/// Top-level configuration, in the manner of a plain struct with a
/// `Default` impl and optional environment-variable overrides rather than
/// a config-file format.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the on-disk layout, e.g. the directory containing
    /// `postings_gcp/`, `pr/`.
    pub storage_root: PathBuf,
    pub shard_count: u32,
    pub block_size: u64,
    pub body_df_floor: u32,
    pub max_docs_to_read: u32,
    pub fallback_corpus_size: u64,
    pub bm25: Bm25Params,
    pub weights: FusionWeights,
    pub query_cache_size: usize,
    pub builder_workers: usize,

    /// Object-store credentials path; only checked at startup, never read
    /// by this crate directly (the object-store client is out of scope).
    pub credentials_path: Option<PathBuf>,
    pub bucket_name: Option<String>,
    pub listen_host: String,
    pub listen_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_root: PathBuf::from("./data"),
            shard_count: SHARD_COUNT,
            block_size: BLOCK_SIZE,
            body_df_floor: BODY_DF_FLOOR,
            max_docs_to_read: MAX_DOCS_TO_READ,
            fallback_corpus_size: FALLBACK_CORPUS_SIZE,
            bm25: Bm25Params::default(),
            weights: FusionWeights::default(),
            query_cache_size: 1024,
            builder_workers: num_cpus::get(),
            credentials_path: None,
            bucket_name: None,
            listen_host: "0.0.0.0".to_string(),
            listen_port: 8080,
        }
    }
}

impl Config {
    /// Overlay environment-variable overrides onto the defaults, matching
    /// the environment surface named in the spec's external interfaces
    /// (credentials path, bucket name, listener host/port).
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(root) = std::env::var("WIKIDEX_STORAGE_ROOT") {
            config.storage_root = PathBuf::from(root);
        }
        if let Ok(creds) = std::env::var("WIKIDEX_CREDENTIALS_PATH") {
            config.credentials_path = Some(PathBuf::from(creds));
        }
        if let Ok(bucket) = std::env::var("WIKIDEX_BUCKET_NAME") {
            config.bucket_name = Some(bucket);
        }
        if let Ok(host) = std::env::var("WIKIDEX_LISTEN_HOST") {
            config.listen_host = host;
        }
        if let Ok(port) = std::env::var("WIKIDEX_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        config
    }
}
