use crate::core::error::Result;
use crate::core::types::DocId;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Loads a gzip'd, headerless `doc_id,score` CSV into a lookup map. A
/// document absent from the map has PageRank 0, never an error — PageRank
/// is a ranking boost, not a required field.
pub fn load_pagerank_csv_gz(path: &Path) -> Result<HashMap<DocId, f64>> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(file);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(decoder);

    let mut scores = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let doc_id: u32 = record
            .get(0)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed_row(&record))?;
        let score: f64 = record
            .get(1)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed_row(&record))?;
        scores.insert(DocId(doc_id), score);
    }
    Ok(scores)
}

fn malformed_row(record: &csv::StringRecord) -> crate::core::error::Error {
    crate::core::error::Error::new(
        crate::core::error::ErrorKind::Parse,
        format!("malformed pagerank row: {record:?}"),
    )
}

pub fn page_rank_of(scores: &HashMap<DocId, f64>, doc_id: DocId) -> f64 {
    scores.get(&doc_id).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn loads_scores_and_defaults_absent_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part-00000.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        writeln!(encoder, "1,12.5").unwrap();
        writeln!(encoder, "2,0.75").unwrap();
        encoder.finish().unwrap();

        let scores = load_pagerank_csv_gz(&path).unwrap();
        assert_eq!(page_rank_of(&scores, DocId(1)), 12.5);
        assert_eq!(page_rank_of(&scores, DocId(999)), 0.0);
    }
}
