/// BM25 with `b = 0`: document lengths are never persisted, so length
/// normalization is not available and is fixed off rather than faked with
/// an assumed average length.
///
/// `idf = ln(1 + (N - df + 0.5) / (df + 0.5))`
/// `saturation = tf * (k1 + 1) / (tf + k1)`
/// `score = idf * saturation`
pub fn bm25_score(tf: u32, df: u32, corpus_size: u64, k1: f32, b: f32) -> f32 {
    debug_assert_eq!(b, 0.0, "length normalization is unsupported without persisted doc lengths");
    let idf = idf(df, corpus_size);
    let tf = tf as f32;
    let saturation = tf * (k1 + 1.0) / (tf + k1);
    idf * saturation
}

pub fn idf(df: u32, corpus_size: u64) -> f32 {
    let n = corpus_size as f32;
    let df = df as f32;
    (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
}

/// Single-field relevance score used for the title and anchor passes:
/// `tf * log10(N / df)`. Unlike the body pass, title hits don't use tf at
/// all (a flat boost is applied by the caller instead); this helper backs
/// the anchor pass, where tf is the cross-anchor-text occurrence count.
pub fn tf_log_idf_score(tf: u32, df: u32, corpus_size: u64) -> f32 {
    let n = corpus_size as f32;
    let df = df.max(1) as f32;
    tf as f32 * (n / df).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_decreases_as_df_rises() {
        let rare = idf(1, 1_000_000);
        let common = idf(500_000, 1_000_000);
        assert!(rare > common);
    }

    #[test]
    fn bm25_score_is_positive_for_typical_inputs() {
        let score = bm25_score(5, 1_000, 1_000_000, 1.2, 0.0);
        assert!(score > 0.0);
    }

    #[test]
    fn bm25_score_saturates_with_high_tf() {
        let low = bm25_score(1, 1_000, 1_000_000, 1.2, 0.0);
        let high = bm25_score(1_000, 1_000, 1_000_000, 1.2, 0.0);
        // Saturation caps the tf contribution well below a linear scaling.
        assert!(high < low * 1_000.0);
        assert!(high > low);
    }

    #[test]
    fn tf_log_idf_score_scales_with_tf() {
        let one = tf_log_idf_score(1, 10, 1_000_000);
        let two = tf_log_idf_score(2, 10, 1_000_000);
        assert!((two - 2.0 * one).abs() < 1e-4);
    }
}
