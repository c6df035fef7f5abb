//! Background request jobs that write into a [`ResultSink`].


use eframe::egui;
use serde_json::Value;

use crate::api::client::{ApiClient, buffered_query};
use crate::api::stream::{StreamOutcome, StreamUpdate, consume_stream};
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_STREAM_SUMMARY;
use crate::engine::runtime::spawn;
use crate::engine::slot::ResultSink;
use crate::report::formatter::analysis_result_text;
use crate::utils::app_time::{elapsed_secs, now};

/// A POST whose answer is displayed as text
#[derive(Debug, Clone)]
pub struct TextJob {
    pub endpoint: &'static str,
    pub payload: Value,
    /// Prepended to transport failures and `{error}` bodies
    pub error_prefix: &'static str,
    pub streaming: bool,
}

impl TextJob {
    pub fn streaming(endpoint: &'static str, payload: Value, error_prefix: &'static str) -> Self {
        Self {
            endpoint,
            payload,
            error_prefix,
            streaming: true,
        }
    }

    pub fn buffered(endpoint: &'static str, payload: Value, error_prefix: &'static str) -> Self {
        Self {
            streaming: false,
            ..Self::streaming(endpoint, payload, error_prefix)
        }
    }
}

pub fn spawn_text_job(client: ApiClient, job: TextJob, sink: ResultSink, ctx: egui::Context) {
    spawn(async move {
        if job.streaming {
            run_stream_job(&client, &job, &sink, &ctx).await;
        } else {
            run_buffered_job(&client, &job, &sink).await;
        }
        ctx.request_repaint();
    });
}

async fn run_stream_job(client: &ApiClient, job: &TextJob, sink: &ResultSink, ctx: &egui::Context) {
    let started = now();

    let stream = match client.request_stream(job.endpoint, &[], &job.payload).await {
        Ok(stream) => stream,
        Err(e) => {
            log::warn!("{} failed to open stream: {}", job.endpoint, e);
            sink.fail(format!("{}{}", job.error_prefix, e));
            return;
        }
    };
    if !sink.is_current() {
        log::debug!("{} superseded before the first frame, stream dropped", job.endpoint);
        return;
    }

    let outcome = consume_stream(stream, |update| {
        let flow = match update {
            StreamUpdate::Partial(text) | StreamUpdate::Failed(text) => sink.update(text),
        };
        ctx.request_repaint();
        flow
    })
    .await;

    match outcome {
        Ok(StreamOutcome::Completed(text)) => {
            sink.finish();
            #[cfg(debug_assertions)]
            if PRINT_STREAM_SUMMARY {
                log::info!(
                    "[stream] {} done: {} chars in {:.2}s",
                    job.endpoint,
                    text.chars().count(),
                    elapsed_secs(started)
                );
            }
            #[cfg(not(debug_assertions))]
            let _ = (text, started);
        }
        Ok(StreamOutcome::Failed(error)) => {
            log::warn!("{} reported an error: {}", job.endpoint, error);
            sink.fail(error);
        }
        Ok(StreamOutcome::Abandoned) => {
            log::debug!(
                "{} superseded after {:.2}s, stream dropped",
                job.endpoint,
                elapsed_secs(started)
            );
        }
        Err(e) => {
            log::warn!("{} stream broke: {}", job.endpoint, e);
            sink.fail(format!("{}{}", job.error_prefix, e));
        }
    }
}

async fn run_buffered_job(client: &ApiClient, job: &TextJob, sink: &ResultSink) {
    match client
        .request_json(job.endpoint, &buffered_query(), &job.payload)
        .await
    {
        Ok(body) => match analysis_result_text(&body, job.error_prefix) {
            Ok(text) => {
                sink.complete(&text);
            }
            Err(error) => {
                sink.fail(error);
            }
        },
        Err(e) => {
            log::warn!("{} failed: {}", job.endpoint, e);
            sink.fail(format!("{}{}", job.error_prefix, e));
        }
    }
}
