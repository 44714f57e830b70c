use crate::models::{Citation, ResultItem, Topic};

/// Seam between the resolver and whatever produces evidence.
///
/// The demo ships a static [`crate::Corpus`] behind this trait; a production
/// deployment implements it over a live retrieval backend and enforces the
/// same ingestion invariants there.
pub trait EvidenceSource {
    /// Evidence for one topic, in significance order. Never reordered by
    /// callers.
    fn fetch(&self, topic: Topic) -> Vec<ResultItem>;

    /// Provenance record for one citation id, if the store knows it.
    fn citation(&self, id: u32) -> Option<Citation>;
}
