use crate::models::{MatchOrigin, Resolution, Topic};
use crate::traits::EvidenceSource;
use tracing::debug;

/// Served whenever no trigger group matches, so the demo always has
/// something to show.
pub const DEFAULT_TOPIC: Topic = Topic::FinancialReport;

/// Trigger groups in priority order. Groups are tested sequentially and the
/// first match wins, which keeps classification deterministic even when a
/// query contains triggers from several groups.
pub const TRIGGER_GROUPS: [(Topic, &[&str]); 4] = [
    (
        Topic::FinancialReport,
        &["financial", "revenue", "quarterly", "earnings"],
    ),
    (
        Topic::ProductSpecifications,
        &["product", "specification", "processor", "architecture", "benchmark"],
    ),
    (
        Topic::MarketAnalysis,
        &["market", "analysis", "trend", "growth", "industry"],
    ),
    (
        Topic::ResearchPaper,
        &["research", "paper", "model", "multimodal", "learning"],
    ),
];

/// Classify a query by case-folded substring containment against the trigger
/// groups. Returns the winning topic and the trigger that fired, or `None`
/// when nothing matched.
pub fn classify(query: &str) -> Option<(Topic, &'static str)> {
    let folded = query.to_lowercase();
    for (topic, triggers) in TRIGGER_GROUPS {
        if let Some(trigger) = triggers
            .iter()
            .copied()
            .find(|trigger| folded.contains(trigger))
        {
            return Some((topic, trigger));
        }
    }
    None
}

/// Maps free-text queries onto evidence from an [`EvidenceSource`].
///
/// Resolution is total over all string inputs: unmatched queries fall back
/// to [`DEFAULT_TOPIC`] instead of returning empty, and the fallback is
/// recorded in [`Resolution::origin`] so the view layer can label it
/// honestly instead of passing it off as a confident hit.
pub struct QueryResolver<S: EvidenceSource> {
    source: S,
}

impl<S: EvidenceSource> QueryResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve one query. The bucket's item order is preserved: no
    /// re-ranking, no slicing.
    pub fn resolve(&self, query: &str) -> Resolution {
        let (topic, origin) = match classify(query) {
            Some((topic, trigger)) => (topic, MatchOrigin::Trigger(trigger.to_string())),
            None => {
                debug!(query, fallback = %DEFAULT_TOPIC, "no trigger matched, serving default bucket");
                (DEFAULT_TOPIC, MatchOrigin::Fallback)
            }
        };

        Resolution {
            query: query.to_string(),
            topic,
            origin,
            items: self.source.fetch(topic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Citation, Locator, Modality, ResultItem};
    use std::collections::BTreeMap;

    struct FakeSource;

    impl EvidenceSource for FakeSource {
        fn fetch(&self, topic: Topic) -> Vec<ResultItem> {
            vec![ResultItem {
                kind: Modality::Text,
                content: format!("evidence for {topic}"),
                source: "fake.pdf".to_string(),
                locator: Locator::Page(1),
                confidence: 0.5,
                citations: vec![1],
                highlight: None,
                transcript: None,
                description: None,
            }]
        }

        fn citation(&self, _id: u32) -> Option<Citation> {
            Some(Citation {
                kind: crate::models::CitationKind::Document,
                title: "fake".to_string(),
                body: "fake".to_string(),
                metadata: BTreeMap::new(),
            })
        }
    }

    #[test]
    fn triggers_classify_regardless_of_casing_and_context() {
        let cases = [
            ("show me QUARTERLY numbers", Topic::FinancialReport),
            ("Revenue please", Topic::FinancialReport),
            ("what does the benchmark say", Topic::ProductSpecifications),
            ("processor deep dive", Topic::ProductSpecifications),
            ("industry overview for 2024", Topic::MarketAnalysis),
            ("any Growth trajectory?", Topic::MarketAnalysis),
            ("multimodal learning survey", Topic::ResearchPaper),
            ("that NeurIPS paper", Topic::ResearchPaper),
        ];

        for (query, expected) in cases {
            let (topic, _) = classify(query).expect("query should classify");
            assert_eq!(topic, expected, "query: {query}");
        }
    }

    #[test]
    fn earlier_groups_win_when_triggers_overlap() {
        // "revenue" (financial) and "growth" (market) both appear; the
        // financial group is tested first.
        let (topic, trigger) = classify("Q3 revenue growth").expect("should classify");
        assert_eq!(topic, Topic::FinancialReport);
        assert_eq!(trigger, "revenue");
    }

    #[test]
    fn unmatched_query_falls_back_to_default() {
        assert!(classify("xyzzy unrelated").is_none());

        let resolver = QueryResolver::new(FakeSource);
        let resolution = resolver.resolve("xyzzy unrelated");
        assert_eq!(resolution.topic, DEFAULT_TOPIC);
        assert_eq!(resolution.origin, MatchOrigin::Fallback);
        assert!(!resolution.items.is_empty());
    }

    #[test]
    fn resolution_records_the_firing_trigger() {
        let resolver = QueryResolver::new(FakeSource);
        let resolution = resolver.resolve("compare earnings by segment");
        assert_eq!(resolution.topic, Topic::FinancialReport);
        assert_eq!(
            resolution.origin,
            MatchOrigin::Trigger("earnings".to_string())
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        let resolver = QueryResolver::new(FakeSource);
        let first = resolver.resolve("market trends");
        let second = resolver.resolve("market trends");
        assert_eq!(first.topic, second.topic);
        assert_eq!(first.origin, second.origin);
        assert_eq!(first.items, second.items);
    }

    #[test]
    fn builtin_scenario_q3_revenue_growth() {
        let corpus = crate::Corpus::builtin().expect("embedded corpus must be valid");
        let resolver = QueryResolver::new(corpus);

        let resolution = resolver.resolve("Q3 revenue growth");
        assert_eq!(resolution.topic, Topic::FinancialReport);

        let first = &resolution.items[0];
        assert_eq!(first.kind, Modality::Text);
        assert_eq!(first.confidence, 0.94);
        assert_eq!(first.citations, vec![1, 2]);
    }

    #[test]
    fn builtin_fallback_serves_the_financial_bucket() {
        let corpus = crate::Corpus::builtin().expect("embedded corpus must be valid");
        let resolver = QueryResolver::new(corpus);

        let matched = resolver.resolve("Q3 revenue growth");
        let fallback = resolver.resolve("xyzzy unrelated");
        assert_eq!(fallback.topic, matched.topic);
        assert_eq!(fallback.items, matched.items);
        assert!(fallback.origin.is_fallback());
        assert!(!matched.origin.is_fallback());
    }

    #[test]
    fn every_resolved_citation_id_is_resolvable() {
        let corpus = crate::Corpus::builtin().expect("embedded corpus must be valid");
        let resolver = QueryResolver::new(corpus);

        for query in crate::models::SAMPLE_QUERIES {
            let resolution = resolver.resolve(query);
            for item in &resolution.items {
                for id in &item.citations {
                    assert!(
                        resolver.source().resolve_citation(*id).is_ok(),
                        "citation {id} from query '{query}' must resolve"
                    );
                }
            }
        }
    }
}
