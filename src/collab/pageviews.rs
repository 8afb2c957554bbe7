use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Reads the plain `id count` whitespace-separated text format, one
/// document per line. An absent id has 0 page views at lookup, never an
/// error — page views are a ranking signal, not a required field.
pub fn load_pageview_map(path: &Path) -> Result<HashMap<DocId, u64>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let mut views = HashMap::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let id: u32 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed_line(line_no, line))?;
        let count: u64 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed_line(line_no, line))?;
        views.insert(DocId(id), count);
    }
    Ok(views)
}

fn malformed_line(line_no: usize, line: &str) -> Error {
    Error::new(ErrorKind::Parse, format!("malformed pageview line {line_no}: '{line}'"))
}

pub fn page_views_of(views: &HashMap<DocId, u64>, doc_id: DocId) -> u64 {
    views.get(&doc_id).copied().unwrap_or(0)
}
