//! Accumulator for `data: {json}` line streams.
//!
//! The backend streams newline-delimited text. Meaningful lines carry the
//! literal prefix `data: ` followed by a JSON object with either a `content`
//! string (appended to the running text) or an `error` string (terminal,
//! replaces the running text). Everything else is ignored.
//!
//! Bytes are buffered until a full line is available, so frames split across
//! network reads, and multi-byte characters split across blocks, are
//! reassembled before decoding.

use std::ops::ControlFlow;

use futures::{Stream, StreamExt};
use serde_json::Value;

use crate::config::API;
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_STREAM_FRAMES;

/// One decoded line of the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    Content(String),
    Error(String),
    /// Not a `data:` line, malformed JSON, or an object without a known field
    Unrecognized,
}

impl StreamChunk {
    pub fn parse_line(line: &str) -> Self {
        let Some(body) = line.strip_prefix(API.framing.data_prefix) else {
            return StreamChunk::Unrecognized;
        };
        let Ok(Value::Object(frame)) = serde_json::from_str::<Value>(body) else {
            return StreamChunk::Unrecognized;
        };

        if let Some(Value::String(error)) = frame.get("error") {
            return StreamChunk::Error(error.clone());
        }
        match frame.get("content") {
            Some(Value::String(content)) => StreamChunk::Content(content.clone()),
            _ => StreamChunk::Unrecognized,
        }
    }
}

/// Splits a byte stream into complete text lines.
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
}

impl LineDecoder {
    /// Lines completed by `bytes`, without their terminator
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            lines.push(decode_line(&self.pending[start..end]));
            start = end + 1;
        }
        self.pending.drain(..start);
        lines
    }

    /// Whatever is left once the stream has ended
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = decode_line(&self.pending);
        self.pending.clear();
        Some(line)
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// What the UI should show after a recognized frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamUpdate {
    /// The full running text so far
    Partial(String),
    /// Terminal error text, replacing everything received before
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed(String),
    Failed(String),
    /// The consumer stopped reading before the stream ended
    Abandoned,
}

#[derive(Debug, Default)]
pub struct StreamAccumulator {
    decoder: LineDecoder,
    text: String,
    failure: Option<String>,
}

impl StreamAccumulator {
    /// Feed one network block. Nothing is processed after an error frame.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamUpdate> {
        if self.is_terminated() {
            return Vec::new();
        }
        let lines = self.decoder.push(bytes);
        self.apply_lines(lines)
    }

    /// Flush a trailing unterminated line at end of stream.
    pub fn finish(&mut self) -> Vec<StreamUpdate> {
        if self.is_terminated() {
            return Vec::new();
        }
        let tail = self.decoder.finish();
        self.apply_lines(tail)
    }

    fn apply_lines(&mut self, lines: impl IntoIterator<Item = String>) -> Vec<StreamUpdate> {
        let mut updates = Vec::new();
        for line in lines {
            #[cfg(debug_assertions)]
            if PRINT_STREAM_FRAMES {
                log::debug!("[stream] line: {:?}", line);
            }

            match StreamChunk::parse_line(&line) {
                StreamChunk::Content(content) => {
                    self.text.push_str(&content);
                    updates.push(StreamUpdate::Partial(self.text.clone()));
                }
                StreamChunk::Error(error) => {
                    self.failure = Some(error.clone());
                    updates.push(StreamUpdate::Failed(error));
                    break;
                }
                StreamChunk::Unrecognized => {}
            }
        }
        updates
    }

    pub fn is_terminated(&self) -> bool {
        self.failure.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_outcome(self) -> StreamOutcome {
        match self.failure {
            Some(error) => StreamOutcome::Failed(error),
            None => StreamOutcome::Completed(self.text),
        }
    }
}

/// Drive `stream` to completion, calling `on_update` after every recognized frame.
///
/// Returning `ControlFlow::Break` from the callback stops reading and drops
/// the stream. A transport error from the stream aborts the loop and is
/// returned as-is.
pub async fn consume_stream<S, B, E, F>(mut stream: S, mut on_update: F) -> Result<StreamOutcome, E>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    F: FnMut(&StreamUpdate) -> ControlFlow<()>,
{
    let mut accumulator = StreamAccumulator::default();

    while let Some(block) = stream.next().await {
        let block = block?;
        for update in accumulator.feed(block.as_ref()) {
            if on_update(&update).is_break() {
                return Ok(StreamOutcome::Abandoned);
            }
        }
        if accumulator.is_terminated() {
            return Ok(accumulator.into_outcome());
        }
    }

    for update in accumulator.finish() {
        if on_update(&update).is_break() {
            return Ok(StreamOutcome::Abandoned);
        }
    }
    Ok(accumulator.into_outcome())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn blocks(parts: &[&str]) -> impl Stream<Item = Result<Vec<u8>, String>> + Unpin {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(p.as_bytes().to_vec()))
                .collect::<Vec<_>>(),
        )
    }

    async fn collect(parts: &[&str]) -> (Vec<StreamUpdate>, Result<StreamOutcome, String>) {
        let mut seen = Vec::new();
        let outcome = consume_stream(blocks(parts), |update| {
            seen.push(update.clone());
            ControlFlow::Continue(())
        })
        .await;
        (seen, outcome)
    }

    #[test]
    fn chunk_parsing() {
        assert_eq!(
            StreamChunk::parse_line(r#"data: {"content":"hi"}"#),
            StreamChunk::Content("hi".into())
        );
        assert_eq!(
            StreamChunk::parse_line(r#"data: {"error":"boom","content":"x"}"#),
            StreamChunk::Error("boom".into())
        );
        assert_eq!(StreamChunk::parse_line("data: not-json"), StreamChunk::Unrecognized);
        assert_eq!(StreamChunk::parse_line(r#"{"content":"hi"}"#), StreamChunk::Unrecognized);
        assert_eq!(StreamChunk::parse_line(r#"data: {"content":7}"#), StreamChunk::Unrecognized);
        assert_eq!(StreamChunk::parse_line(r#"data: ["content"]"#), StreamChunk::Unrecognized);
    }

    #[test]
    fn decoder_reassembles_split_lines_and_characters() {
        let mut decoder = LineDecoder::default();
        let euro = "€".as_bytes();

        assert!(decoder.push(b"data: {\"content\":\"").is_empty());
        assert!(decoder.push(&euro[..1]).is_empty());
        let lines = decoder.push(&[&euro[1..], b"\"}\r\nnext".as_slice()].concat());
        assert_eq!(lines, vec!["data: {\"content\":\"€\"}".to_string()]);
        assert_eq!(decoder.finish(), Some("next".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[tokio::test]
    async fn content_frames_concatenate_with_running_prefixes() {
        let (seen, outcome) = collect(&[
            "data: {\"content\":\"Hel\"}\n",
            "data: {\"content\":\"lo\"}\ndata: {\"content\":\" world\"}\n",
        ])
        .await;

        assert_eq!(
            seen,
            vec![
                StreamUpdate::Partial("Hel".into()),
                StreamUpdate::Partial("Hello".into()),
                StreamUpdate::Partial("Hello world".into()),
            ]
        );
        assert_eq!(outcome, Ok(StreamOutcome::Completed("Hello world".into())));
    }

    #[tokio::test]
    async fn error_frame_replaces_text_and_stops() {
        let (seen, outcome) = collect(&[
            "data: {\"content\":\"partial\"}\n",
            "data: {\"error\":\"model unavailable\"}\ndata: {\"content\":\"ignored\"}\n",
            "data: {\"content\":\"also ignored\"}\n",
        ])
        .await;

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], StreamUpdate::Failed("model unavailable".into()));
        assert_eq!(outcome, Ok(StreamOutcome::Failed("model unavailable".into())));
    }

    #[tokio::test]
    async fn noise_never_triggers_callback() {
        let (seen, outcome) = collect(&[
            ": keep-alive\n",
            "event: message\n\n",
            "data: not-json\n",
            "data: {\"content\":\"ok\"}\n",
            "data: {\"unrelated\":true}\n",
        ])
        .await;

        assert_eq!(seen, vec![StreamUpdate::Partial("ok".into())]);
        assert_eq!(outcome, Ok(StreamOutcome::Completed("ok".into())));
    }

    #[tokio::test]
    async fn frame_split_across_reads() {
        let (seen, outcome) = collect(&["data: {\"con", "tent\":\"joined\"", "}\n"]).await;
        assert_eq!(seen, vec![StreamUpdate::Partial("joined".into())]);
        assert_eq!(outcome, Ok(StreamOutcome::Completed("joined".into())));
    }

    #[tokio::test]
    async fn unterminated_last_line_is_flushed() {
        let (seen, outcome) = collect(&["data: {\"content\":\"a\"}\ndata: {\"content\":\"b\"}"]).await;
        assert_eq!(seen.len(), 2);
        assert_eq!(outcome, Ok(StreamOutcome::Completed("ab".into())));
    }

    #[tokio::test]
    async fn empty_stream_completes_empty() {
        let (seen, outcome) = collect(&[]).await;
        assert!(seen.is_empty());
        assert_eq!(outcome, Ok(StreamOutcome::Completed(String::new())));
    }

    #[tokio::test]
    async fn transport_error_aborts() {
        let parts = stream::iter(vec![
            Ok(b"data: {\"content\":\"a\"}\n".to_vec()),
            Err("connection reset".to_string()),
            Ok(b"data: {\"content\":\"b\"}\n".to_vec()),
        ]);
        let mut calls = 0;
        let outcome = consume_stream(parts, |_| {
            calls += 1;
            ControlFlow::Continue(())
        })
        .await;

        assert_eq!(calls, 1);
        assert_eq!(outcome, Err("connection reset".to_string()));
    }

    #[tokio::test]
    async fn break_abandons_stream() {
        let mut calls = 0;
        let outcome = consume_stream(
            blocks(&["data: {\"content\":\"a\"}\ndata: {\"content\":\"b\"}\n"]),
            |_| {
                calls += 1;
                ControlFlow::Break(())
            },
        )
        .await;

        assert_eq!(calls, 1);
        assert_eq!(outcome, Ok(StreamOutcome::Abandoned));
    }

    #[test]
    fn accumulator_skips_unrecognized_lines() {
        let mut acc = StreamAccumulator::default();
        let updates = acc.feed(b"data: {\"content\":\"x\"}\ndata: nope\n");
        assert_eq!(updates, vec![StreamUpdate::Partial("x".into())]);
        assert_eq!(acc.text(), "x");
        assert!(!acc.is_terminated());
    }
}
