use crate::core::types::DocId;
use std::collections::HashMap;

/// Accumulates additive per-document scores in first-seen order, so that a
/// later stable sort by score breaks ties by insertion order rather than by
/// `DocId`'s own `Ord` or by hash-map iteration order (which a plain
/// `HashMap<DocId, f32>` would not preserve at all).
#[derive(Debug, Default)]
pub struct ScoreAccumulator {
    index: HashMap<DocId, usize>,
    order: Vec<DocId>,
    scores: Vec<f32>,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        ScoreAccumulator::default()
    }

    pub fn add(&mut self, doc_id: DocId, delta: f32) {
        if let Some(&i) = self.index.get(&doc_id) {
            self.scores[i] += delta;
        } else {
            let i = self.order.len();
            self.index.insert(doc_id, i);
            self.order.push(doc_id);
            self.scores.push(delta);
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<f32> {
        self.index.get(&doc_id).map(|&i| self.scores[i])
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.order.iter().copied()
    }

    /// The top `n` (doc_id, score) pairs, sorted by score descending, ties
    /// broken by insertion order. `sort_by` is a stable sort and `order`
    /// already lists documents in insertion order, so this holds without
    /// any extra bookkeeping.
    pub fn into_stable_top(self, n: usize) -> Vec<(DocId, f32)> {
        let mut ranked: Vec<(DocId, f32)> = self
            .order
            .into_iter()
            .zip(self.scores)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_repeated_additions() {
        let mut acc = ScoreAccumulator::new();
        acc.add(DocId(1), 1.0);
        acc.add(DocId(1), 2.0);
        assert_eq!(acc.get(DocId(1)), Some(3.0));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut acc = ScoreAccumulator::new();
        acc.add(DocId(3), 5.0);
        acc.add(DocId(1), 5.0);
        acc.add(DocId(2), 5.0);
        let top = acc.into_stable_top(10);
        let ids: Vec<u32> = top.iter().map(|(d, _)| d.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn higher_score_sorts_first_regardless_of_insertion_order() {
        let mut acc = ScoreAccumulator::new();
        acc.add(DocId(1), 1.0);
        acc.add(DocId(2), 9.0);
        let top = acc.into_stable_top(10);
        assert_eq!(top[0].0, DocId(2));
    }

    #[test]
    fn truncates_to_requested_size() {
        let mut acc = ScoreAccumulator::new();
        for i in 0..200u32 {
            acc.add(DocId(i), i as f32);
        }
        assert_eq!(acc.into_stable_top(100).len(), 100);
    }
}
