// Pure text shaping: the recommendations report, the markdown parser and code tokens
pub mod formatter;
pub mod highlight;
pub mod markdown;

pub use formatter::format_recommendations;
