use crate::models::{CitationKind, Modality, ResultItem};
use crate::traits::EvidenceSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Coarse severity classification of a confidence score, for color-coding
/// only. Thresholds follow the demo UI: above 0.9 is high, above 0.8 is
/// medium, everything else is low.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_score(score: f64) -> Self {
        if score > 0.9 {
            ConfidenceBand::High
        } else if score > 0.8 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    /// Terminal color name used by the CLI renderer.
    pub fn color(self) -> &'static str {
        match self {
            ConfidenceBand::High => "green",
            ConfidenceBand::Medium => "yellow",
            ConfidenceBand::Low => "red",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceBand::High => write!(formatter, "high"),
            ConfidenceBand::Medium => write!(formatter, "medium"),
            ConfidenceBand::Low => write!(formatter, "low"),
        }
    }
}

/// One run of display text, either plain or emphasized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Plain(String),
    Emphasis(String),
}

/// A clickable citation marker, in the item's declared order. `title` and
/// `kind` are `None` when the id did not resolve; the marker still renders
/// as a degraded placeholder rather than disappearing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationBadge {
    pub id: u32,
    pub title: Option<String>,
    pub kind: Option<CitationKind>,
}

impl CitationBadge {
    pub fn is_resolved(&self) -> bool {
        self.title.is_some()
    }
}

/// Render-ready form of one result item. Everything the view needs is
/// precomputed here so the view layer stays free of business rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedItem {
    pub modality: Modality,
    pub segments: Vec<Segment>,
    pub source: String,
    pub locator: String,
    pub confidence: f64,
    pub band: ConfidenceBand,
    pub badges: Vec<CitationBadge>,
    pub transcript: Option<String>,
    pub description: Option<String>,
}

/// Split an item's content into plain and emphasized segments around its
/// highlight span. A span that is not a literal substring degrades to a
/// single plain segment.
pub fn highlight_segments(content: &str, highlight: Option<&str>) -> Vec<Segment> {
    let Some(span) = highlight else {
        return vec![Segment::Plain(content.to_string())];
    };

    match content.find(span) {
        Some(start) if !span.is_empty() => {
            let end = start + span.len();
            let mut segments = Vec::with_capacity(3);
            if start > 0 {
                segments.push(Segment::Plain(content[..start].to_string()));
            }
            segments.push(Segment::Emphasis(span.to_string()));
            if end < content.len() {
                segments.push(Segment::Plain(content[end..].to_string()));
            }
            segments
        }
        _ => {
            warn!(span, "highlight span is not a substring of content, rendering unhighlighted");
            vec![Segment::Plain(content.to_string())]
        }
    }
}

/// Produce the render-ready structure for one item against a citation
/// source. Missing citation ids are logged and rendered as placeholders;
/// they never abort the render.
pub fn render_item<S: EvidenceSource>(item: &ResultItem, source: &S) -> RenderedItem {
    let segments = match item.kind {
        Modality::Text => highlight_segments(&item.content, item.highlight.as_deref()),
        Modality::Image | Modality::Audio => vec![Segment::Plain(item.content.clone())],
    };

    let badges = item
        .citations
        .iter()
        .map(|id| match source.citation(*id) {
            Some(citation) => CitationBadge {
                id: *id,
                title: Some(citation.title),
                kind: Some(citation.kind),
            },
            None => {
                warn!(id, "citation id did not resolve, rendering placeholder badge");
                CitationBadge {
                    id: *id,
                    title: None,
                    kind: None,
                }
            }
        })
        .collect();

    RenderedItem {
        modality: item.kind,
        segments,
        source: item.source.clone(),
        locator: item.locator.to_string(),
        confidence: item.confidence,
        band: ConfidenceBand::from_score(item.confidence),
        badges,
        transcript: item.transcript.clone(),
        description: item.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Citation, Locator, ResultItem, Topic};
    use std::collections::BTreeMap;

    struct EmptySource;

    impl EvidenceSource for EmptySource {
        fn fetch(&self, _topic: Topic) -> Vec<ResultItem> {
            Vec::new()
        }

        fn citation(&self, _id: u32) -> Option<Citation> {
            None
        }
    }

    fn text_item(content: &str, highlight: Option<&str>) -> ResultItem {
        ResultItem {
            kind: Modality::Text,
            content: content.to_string(),
            source: "doc.pdf".to_string(),
            locator: Locator::Page(1),
            confidence: 0.85,
            citations: vec![7],
            highlight: highlight.map(str::to_string),
            transcript: None,
            description: None,
        }
    }

    #[test]
    fn band_thresholds_match_the_demo_ui() {
        assert_eq!(ConfidenceBand::from_score(0.94), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.91), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_score(0.9), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_score(0.85), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_score(0.8), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_score(0.1), ConfidenceBand::Low);
    }

    #[test]
    fn highlight_splits_content_into_three_segments() {
        let segments = highlight_segments(
            "The quarterly revenue increased by 23% overall.",
            Some("revenue increased by 23%"),
        );
        assert_eq!(
            segments,
            vec![
                Segment::Plain("The quarterly ".to_string()),
                Segment::Emphasis("revenue increased by 23%".to_string()),
                Segment::Plain(" overall.".to_string()),
            ]
        );
    }

    #[test]
    fn highlight_at_content_start_has_no_leading_plain_segment() {
        let segments = highlight_segments("revenue grew", Some("revenue"));
        assert_eq!(
            segments,
            vec![
                Segment::Emphasis("revenue".to_string()),
                Segment::Plain(" grew".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_highlight_degrades_to_plain_rendering() {
        let segments = highlight_segments("actual content", Some("not in there"));
        assert_eq!(segments, vec![Segment::Plain("actual content".to_string())]);
    }

    #[test]
    fn missing_citation_renders_a_placeholder_badge() {
        let item = text_item("anything", None);
        let rendered = render_item(&item, &EmptySource);
        assert_eq!(rendered.badges.len(), 1);
        assert_eq!(rendered.badges[0].id, 7);
        assert!(!rendered.badges[0].is_resolved());
    }

    #[test]
    fn rendered_badges_keep_declared_order() {
        let corpus = crate::Corpus::builtin().expect("embedded corpus must be valid");
        let item = &corpus.bucket(Topic::FinancialReport)[0];
        let rendered = render_item(item, &corpus);

        let ids: Vec<u32> = rendered.badges.iter().map(|badge| badge.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(rendered.badges.iter().all(CitationBadge::is_resolved));
        assert_eq!(rendered.band, ConfidenceBand::High);
    }

    #[test]
    fn audio_items_carry_their_transcript_through() {
        let corpus = crate::Corpus::builtin().expect("embedded corpus must be valid");
        let audio = corpus
            .bucket(Topic::FinancialReport)
            .iter()
            .find(|item| item.kind == Modality::Audio)
            .expect("financial bucket has an audio item")
            .clone();

        let rendered = render_item(&audio, &corpus);
        assert_eq!(rendered.modality, Modality::Audio);
        assert_eq!(rendered.locator, "at 12:34");
        assert!(rendered.transcript.is_some());
    }
}
