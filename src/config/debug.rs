//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. All of them are further gated by `cfg(debug_assertions)`.

/// Emit every raw `data:` line as it is decoded from a stream.
pub const PRINT_STREAM_FRAMES: bool = false;

/// Emit a summary line when a stream completes (chars received, elapsed).
pub const PRINT_STREAM_SUMMARY: bool = true;

/// Emit UI interaction logs (tab switches, submissions, row expansion).
pub const PRINT_UI_INTERACTIONS: bool = true;

/// Emit the normalized shape of every recommendations response.
pub const PRINT_RECOMMENDATION_SHAPE: bool = false;

/// Emit shutdown app messages.
pub const PRINT_SHUTDOWN: bool = false;
