// Domain types and value objects
pub mod chat;
pub mod position;
pub mod requests;
pub mod table;
pub mod tokens;
pub mod units;

// Re-export commonly used types
pub use chat::ChatLog;
pub use position::{PositionRecord, Recommendations};
pub use requests::{AnalysisKind, RecommendationQuery};
pub use tokens::{Chain, Exchange};
pub use units::Ratio;
