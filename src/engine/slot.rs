//! Generation-guarded result slots.
//!
//! A panel owns a [`ResultSlot`] and reads it every frame. Each submission
//! calls [`ResultSlot::begin`], which bumps the generation and hands out a
//! [`ResultSink`] for the background task. Sinks from an older generation
//! can no longer write, and tell their reader to stop.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub text: String,
    pub loading: bool,
    pub failed: bool,
}

#[derive(Debug, Default)]
struct SlotInner {
    generation: u64,
    state: SlotState,
}

#[derive(Debug, Clone, Default)]
pub struct ResultSlot {
    inner: Arc<Mutex<SlotInner>>,
}

fn lock(inner: &Mutex<SlotInner>) -> MutexGuard<'_, SlotInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResultSlot {
    /// Start a new submission, superseding whatever was in flight.
    pub fn begin(&self) -> ResultSink {
        let mut inner = lock(&self.inner);
        inner.generation += 1;
        inner.state = SlotState {
            text: String::new(),
            loading: true,
            failed: false,
        };
        ResultSink {
            slot: Arc::clone(&self.inner),
            generation: inner.generation,
        }
    }

    /// Show a result that needed no request (validation errors and the like).
    pub fn set_immediate(&self, text: impl Into<String>, failed: bool) {
        let mut inner = lock(&self.inner);
        inner.generation += 1;
        inner.state = SlotState {
            text: text.into(),
            loading: false,
            failed,
        };
    }

    pub fn clear(&self) {
        self.set_immediate(String::new(), false);
    }

    pub fn snapshot(&self) -> SlotState {
        lock(&self.inner).state.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner).state.loading
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).state.text.is_empty()
    }
}

/// Write handle held by one background task
#[derive(Debug)]
pub struct ResultSink {
    slot: Arc<Mutex<SlotInner>>,
    generation: u64,
}

impl ResultSink {
    pub fn is_current(&self) -> bool {
        lock(&self.slot).generation == self.generation
    }

    /// Replace the displayed text. `Break` means this sink was superseded.
    pub fn update(&self, text: &str) -> ControlFlow<()> {
        let mut inner = lock(&self.slot);
        if inner.generation != self.generation {
            return ControlFlow::Break(());
        }
        inner.state.text.clear();
        inner.state.text.push_str(text);
        ControlFlow::Continue(())
    }

    /// Terminal failure text. Returns false if superseded.
    pub fn fail(&self, text: impl Into<String>) -> bool {
        let mut inner = lock(&self.slot);
        if inner.generation != self.generation {
            return false;
        }
        inner.state = SlotState {
            text: text.into(),
            loading: false,
            failed: true,
        };
        true
    }

    /// Successful end. Returns false if superseded.
    pub fn finish(&self) -> bool {
        let mut inner = lock(&self.slot);
        if inner.generation != self.generation {
            return false;
        }
        inner.state.loading = false;
        true
    }

    pub fn complete(&self, text: &str) -> bool {
        self.update(text).is_continue() && self.finish()
    }
}

impl Drop for ResultSink {
    // A task that ends without finishing (panic, dropped future) must not
    // leave the panel spinning forever.
    fn drop(&mut self) {
        let mut inner = lock(&self.slot);
        if inner.generation == self.generation {
            inner.state.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::formatter::INPUT_ERROR_PREFIX;
    use std::collections::HashMap;

    #[test]
    fn sink_writes_until_finished() {
        let slot = ResultSlot::default();
        let sink = slot.begin();
        assert!(slot.is_loading());

        assert!(sink.update("Hel").is_continue());
        assert!(sink.update("Hello").is_continue());
        assert!(sink.finish());

        let state = slot.snapshot();
        assert_eq!(state.text, "Hello");
        assert!(!state.loading);
        assert!(!state.failed);
    }

    #[test]
    fn superseded_generation_cannot_write() {
        let slot = ResultSlot::default();
        let old = slot.begin();
        assert!(old.update("old text").is_continue());

        let new = slot.begin();
        assert!(!old.is_current());
        assert!(old.update("late").is_break());
        assert!(!old.fail("late error"));
        assert!(!old.finish());
        assert_eq!(slot.snapshot().text, "");
        assert!(slot.is_loading());

        drop(old);
        assert!(slot.is_loading());

        assert!(new.complete("fresh"));
        assert_eq!(slot.snapshot().text, "fresh");
    }

    #[test]
    fn dropped_sink_clears_loading() {
        let slot = ResultSlot::default();
        let sink = slot.begin();
        assert!(sink.update("half").is_continue());
        drop(sink);

        let state = slot.snapshot();
        assert!(!state.loading);
        assert_eq!(state.text, "half");
    }

    #[test]
    fn immediate_result_supersedes_in_flight() {
        let slot = ResultSlot::default();
        let sink = slot.begin();
        slot.set_immediate(format!("{}expected value at line 1 column 1", INPUT_ERROR_PREFIX), true);

        assert!(sink.update("stream text").is_break());
        let state = slot.snapshot();
        assert!(state.failed);
        assert!(!state.loading);
        assert!(state.text.starts_with(INPUT_ERROR_PREFIX));
    }

    #[test]
    fn row_slots_are_independent() {
        let mut rows: HashMap<(String, usize), ResultSlot> = HashMap::new();
        let first = rows.entry(("top".into(), 0)).or_default().begin();
        let second = rows.entry(("top".into(), 1)).or_default().begin();

        assert!(first.complete("row zero"));
        assert!(rows[&("top".to_string(), 1)].is_loading());
        assert!(second.fail("ERROR: timeout"));
        assert_eq!(rows[&("top".to_string(), 0)].snapshot().text, "row zero");
    }
}
