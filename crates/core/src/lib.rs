pub mod corpus;
pub mod display;
pub mod error;
pub mod models;
pub mod resolver;
pub mod session;
pub mod traits;

pub use corpus::Corpus;
pub use display::{
    highlight_segments, render_item, CitationBadge, ConfidenceBand, RenderedItem, Segment,
};
pub use error::{CorpusError, ResolveError};
pub use models::{
    Citation, CitationKind, Locator, MatchOrigin, MetaValue, Modality, QueryBucket, Resolution,
    ResultItem, SystemMetrics, Topic, SAMPLE_QUERIES,
};
pub use resolver::{classify, QueryResolver, DEFAULT_TOPIC, TRIGGER_GROUPS};
pub use session::{RecentQuery, Session, DEFAULT_RECENT_CAPACITY};
pub use traits::EvidenceSource;
