use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The modality of one retrieved unit of evidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Audio,
}

impl fmt::Display for Modality {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => write!(formatter, "text"),
            Modality::Image => write!(formatter, "image"),
            Modality::Audio => write!(formatter, "audio"),
        }
    }
}

/// Where inside the source document the evidence was found. Text and image
/// evidence carries a page number; audio evidence carries a clip timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    Page(u32),
    Timestamp(String),
}

impl fmt::Display for Locator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Page(page) => write!(formatter, "page {page}"),
            Locator::Timestamp(stamp) => write!(formatter, "at {stamp}"),
        }
    }
}

/// One retrieved unit of evidence, as handed to the view layer.
///
/// `content` is the primary payload: the display text for [`Modality::Text`],
/// the caption for [`Modality::Image`], the clip label for [`Modality::Audio`].
/// `citations` is ordered and every id in it must resolve against the
/// corpus citation store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    pub kind: Modality,
    pub content: String,
    pub source: String,
    pub locator: Locator,
    pub confidence: f64,
    pub citations: Vec<u32>,
    /// Substring of `content` to emphasize; rendering degrades to an
    /// unhighlighted display when it is not a literal substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    /// Full transcript for audio evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Supplementary text for image evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Document,
    Image,
    Audio,
}

impl fmt::Display for CitationKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationKind::Document => write!(formatter, "document"),
            CitationKind::Image => write!(formatter, "image"),
            CitationKind::Audio => write!(formatter, "audio"),
        }
    }
}

/// Open-ended metadata value attached to a citation. Used for detail
/// rendering only; no business rules are keyed on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetaValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Integer(value) => write!(formatter, "{value}"),
            MetaValue::Number(value) => write!(formatter, "{value}"),
            MetaValue::Text(value) => write!(formatter, "{value}"),
        }
    }
}

/// Provenance record for a piece of retrieved evidence, keyed by an integer
/// id that is stable and unique within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    pub kind: CitationKind,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, MetaValue>,
}

/// The fixed demo topics. Each topic owns one pre-ranked bucket of evidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    #[serde(rename = "financial report")]
    FinancialReport,
    #[serde(rename = "product specifications")]
    ProductSpecifications,
    #[serde(rename = "market analysis")]
    MarketAnalysis,
    #[serde(rename = "research paper")]
    ResearchPaper,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::FinancialReport,
        Topic::ProductSpecifications,
        Topic::MarketAnalysis,
        Topic::ResearchPaper,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Topic::FinancialReport => "financial report",
            Topic::ProductSpecifications => "product specifications",
            Topic::MarketAnalysis => "market analysis",
            Topic::ResearchPaper => "research paper",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// One topic's ordered evidence. Items are stored in significance order
/// (most relevant first) and are never reordered downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryBucket {
    pub topic: Topic,
    pub items: Vec<ResultItem>,
}

/// How a query ended up on its topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// The query contained this trigger word.
    Trigger(String),
    /// No trigger group matched; the default bucket was served.
    Fallback,
}

impl MatchOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, MatchOrigin::Fallback)
    }
}

/// The outcome of resolving one query: the classified topic, how the
/// classification happened, and the topic's evidence in bucket order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub query: String,
    pub topic: Topic,
    pub origin: MatchOrigin,
    pub items: Vec<ResultItem>,
}

/// Headline counters shown in the demo status panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub documents_indexed: u64,
    pub images_processed: u64,
    pub audio_files_transcribed: u64,
    pub total_queries: u64,
    pub average_response_time: String,
    pub system_uptime: String,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            documents_indexed: 1_247,
            images_processed: 3_456,
            audio_files_transcribed: 89,
            total_queries: 15_678,
            average_response_time: "1.2s".to_string(),
            system_uptime: "99.9%".to_string(),
        }
    }
}

/// Canned queries surfaced by the demo UI.
pub const SAMPLE_QUERIES: [&str; 8] = [
    "Show me the financial performance for Q3",
    "What are the technical specifications of the new processor?",
    "Analyze the market trends for AI infrastructure",
    "Find research papers on multimodal learning",
    "Compare revenue growth across different segments",
    "Show me the architecture diagram for the AI model",
    "What did the CEO say about quarterly performance?",
    "Find benchmark results for machine learning workloads",
];
