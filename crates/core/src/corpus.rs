use crate::error::{CorpusError, ResolveError};
use crate::models::{Citation, QueryBucket, ResultItem, Topic};
use crate::resolver::DEFAULT_TOPIC;
use crate::traits::EvidenceSource;
use serde::Deserialize;
use std::collections::BTreeMap;

const DEMO_CORPUS_JSON: &str = include_str!("../data/demo_corpus.json");

#[derive(Debug, Deserialize)]
struct CorpusFile {
    buckets: Vec<QueryBucket>,
    citations: BTreeMap<u32, Citation>,
}

/// The static evidence tables: four topic buckets plus the citation store.
///
/// Loaded once at process start and immutable afterwards. Validation runs at
/// load time so every invariant the view layer relies on (no dangling
/// citation ids, confidence within [0, 1], non-empty buckets) holds for the
/// whole process lifetime.
#[derive(Debug, Clone)]
pub struct Corpus {
    buckets: BTreeMap<Topic, QueryBucket>,
    citations: BTreeMap<u32, Citation>,
}

impl Corpus {
    /// The embedded demo corpus.
    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_json(DEMO_CORPUS_JSON)
    }

    /// Parse and validate a corpus from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, CorpusError> {
        let file: CorpusFile = serde_json::from_str(raw)?;
        let corpus = Self {
            buckets: file
                .buckets
                .into_iter()
                .map(|bucket| (bucket.topic, bucket))
                .collect(),
            citations: file.citations,
        };
        corpus.validate()?;
        Ok(corpus)
    }

    fn validate(&self) -> Result<(), CorpusError> {
        if !self.buckets.contains_key(&DEFAULT_TOPIC) {
            return Err(CorpusError::MissingDefaultBucket(DEFAULT_TOPIC));
        }

        for bucket in self.buckets.values() {
            if bucket.items.is_empty() {
                return Err(CorpusError::EmptyBucket(bucket.topic));
            }

            for item in &bucket.items {
                if !(0.0..=1.0).contains(&item.confidence) {
                    return Err(CorpusError::ConfidenceOutOfRange {
                        topic: bucket.topic,
                        source_name: item.source.clone(),
                        confidence: item.confidence,
                    });
                }

                for id in &item.citations {
                    if !self.citations.contains_key(id) {
                        return Err(CorpusError::DanglingCitation {
                            topic: bucket.topic,
                            source_name: item.source.clone(),
                            id: *id,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Evidence for one topic in significance order. Topics absent from the
    /// corpus yield an empty slice; the builtin corpus carries all four.
    pub fn bucket(&self, topic: Topic) -> &[ResultItem] {
        self.buckets
            .get(&topic)
            .map(|bucket| bucket.items.as_slice())
            .unwrap_or(&[])
    }

    /// Keyed lookup into the citation store.
    ///
    /// Ids drawn from a validated `ResultItem` always resolve; ids from
    /// anywhere else (a stale view, user input) may not, and callers are
    /// expected to recover rather than crash.
    pub fn resolve_citation(&self, id: u32) -> Result<&Citation, ResolveError> {
        self.citations
            .get(&id)
            .ok_or(ResolveError::CitationNotFound(id))
    }

    pub fn citation_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.citations.keys().copied()
    }

    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.buckets.keys().copied()
    }
}

impl EvidenceSource for Corpus {
    fn fetch(&self, topic: Topic) -> Vec<ResultItem> {
        self.bucket(topic).to_vec()
    }

    fn citation(&self, id: u32) -> Option<Citation> {
        self.resolve_citation(id).ok().cloned()
    }
}
