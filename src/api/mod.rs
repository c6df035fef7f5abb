// Backend transport and stream framing
pub mod client;
pub mod errors;
pub mod stream;

// Re-export commonly used types
pub use client::ApiClient;
pub use errors::ApiError;
pub use stream::{StreamOutcome, StreamUpdate, consume_stream};
