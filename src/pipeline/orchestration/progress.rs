use super::orchestrator::AnalysisOrchestrator;
use super::stage::{AnalysisStage, StageObserver};
use crate::common::AnalysisRequest;
use crate::config::Configuration;
use crate::pipeline::domain::AnalysisReport;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

pub const DEFAULT_BUFFER_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub stage: AnalysisStage,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Box<AnalysisReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressEvent {
    pub fn started(stage: AnalysisStage, progress: u8) -> Self {
        Self {
            stage,
            progress,
            report: None,
            message: None,
        }
    }

    pub fn finished(report: AnalysisReport) -> Self {
        Self {
            stage: AnalysisStage::Finished,
            progress: 100,
            report: Some(Box::new(report)),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>, progress: u8) -> Self {
        Self {
            stage: AnalysisStage::Error,
            progress,
            report: None,
            message: Some(message.into()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }
}

/// Forwards stage starts into the subscriber's channel.
struct ChannelObserver {
    events: mpsc::Sender<ProgressEvent>,
    last_progress: AtomicU8,
}

impl ChannelObserver {
    fn new(events: mpsc::Sender<ProgressEvent>) -> Self {
        Self {
            events,
            last_progress: AtomicU8::new(0),
        }
    }

    async fn emit(&self, event: ProgressEvent) {
        let stage = event.stage;
        if self.events.send(event).await.is_err() {
            debug!("Progress subscriber went away before {}", stage.as_str());
        }
    }

    fn last_progress(&self) -> u8 {
        self.last_progress.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StageObserver for ChannelObserver {
    async fn stage_started(&self, stage: AnalysisStage) {
        let progress = stage.progress().unwrap_or_else(|| self.last_progress());
        self.last_progress.store(progress, Ordering::Relaxed);
        self.emit(ProgressEvent::started(stage, progress)).await;
    }
}

async fn run_to_terminal(
    orchestrator: &AnalysisOrchestrator,
    request: &AnalysisRequest,
    observer: &ChannelObserver,
) {
    observer.stage_started(AnalysisStage::Initializing).await;

    let terminal = match orchestrator.try_analyze(request, observer).await {
        Ok(report) => ProgressEvent::finished(report),
        Err(e) => {
            warn!("Streaming analysis {} failed: {}", request.request_id(), e);
            ProgressEvent::error(e.to_string(), observer.last_progress())
        }
    };
    observer.emit(terminal).await;
}

/// Runs the same stages as [`AnalysisOrchestrator::analyze`] while streaming
/// stage events. No deadline is applied; the stream ends after exactly one
/// terminal event.
pub struct StreamingProgressReporter {
    orchestrator: Arc<AnalysisOrchestrator>,
    buffer_size: usize,
}

impl StreamingProgressReporter {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self {
            orchestrator,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn with_configuration(self, configuration: &Configuration) -> Self {
        self.with_buffer_size(configuration.progress_buffer_size)
    }

    pub fn stream(&self, request: AnalysisRequest) -> ReceiverStream<ProgressEvent> {
        let (events_tx, events_rx) = mpsc::channel(self.buffer_size);
        let orchestrator = self.orchestrator.clone();

        tokio::spawn(async move {
            let observer = ChannelObserver::new(events_tx);
            tokio::select! {
                _ = observer.events.closed() => {
                    debug!("Progress stream for {} dropped, abandoning analysis", request.request_id());
                }
                _ = run_to_terminal(&orchestrator, &request, &observer) => {}
            }
        });

        ReceiverStream::new(events_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Capability;
    use crate::pipeline::orchestration::mock::{MockCapabilities, photo, shared};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio_stream::StreamExt;

    fn reporter(mock: MockCapabilities, concurrent: bool) -> StreamingProgressReporter {
        let orchestrator = AnalysisOrchestrator::builder()
            .capabilities(shared(mock))
            .concurrent_capture(concurrent)
            .build()
            .unwrap();
        StreamingProgressReporter::new(Arc::new(orchestrator))
    }

    fn stages(events: &[ProgressEvent]) -> Vec<(AnalysisStage, u8)> {
        events.iter().map(|event| (event.stage, event.progress)).collect()
    }

    #[tokio::test]
    async fn successful_run_streams_every_stage_then_the_report() {
        for concurrent in [true, false] {
            let events: Vec<_> = reporter(MockCapabilities::keris(), concurrent)
                .stream(photo())
                .collect()
                .await;

            assert_eq!(
                stages(&events),
                vec![
                    (AnalysisStage::Initializing, 0),
                    (AnalysisStage::VisionAnalysis, 20),
                    (AnalysisStage::TextExtraction, 40),
                    (AnalysisStage::GroundingSearch, 60),
                    (AnalysisStage::Finished, 100),
                ]
            );
            assert_eq!(events.iter().filter(|event| event.is_terminal()).count(), 1);
            let report = events.last().and_then(|event| event.report.as_ref()).unwrap();
            assert_eq!(report.object_recognition.category, "keris");
        }
    }

    #[tokio::test]
    async fn failure_ends_with_a_single_error_event() {
        let events: Vec<_> = reporter(MockCapabilities::keris().failing(Capability::Search), true)
            .stream(photo())
            .collect()
            .await;

        assert_eq!(events.iter().filter(|event| event.is_terminal()).count(), 1);
        let last = events.last().unwrap();
        assert_eq!(last.stage, AnalysisStage::Error);
        assert_eq!(last.progress, 60);
        assert!(last.report.is_none());
        assert!(last.message.as_deref().unwrap().contains("search"));
    }

    #[tokio::test]
    async fn sequential_vision_failure_stops_before_text_extraction() {
        let events: Vec<_> = reporter(MockCapabilities::keris().failing(Capability::Vision), false)
            .stream(photo())
            .collect()
            .await;

        assert_eq!(
            stages(&events),
            vec![
                (AnalysisStage::Initializing, 0),
                (AnalysisStage::VisionAnalysis, 20),
                (AnalysisStage::Error, 20),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_stream_abandons_the_analysis() {
        let mock = shared(
            MockCapabilities::keris().slow(Capability::Vision, Duration::from_secs(10)),
        );
        let orchestrator = AnalysisOrchestrator::builder()
            .capabilities(mock.clone())
            .concurrent_capture(false)
            .build()
            .unwrap();
        let mut stream = StreamingProgressReporter::new(Arc::new(orchestrator)).stream(photo());

        assert_eq!(stream.next().await.unwrap().stage, AnalysisStage::Initializing);
        assert_eq!(stream.next().await.unwrap().stage, AnalysisStage::VisionAnalysis);
        drop(stream);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(mock.calls(), vec![Capability::Vision]);
    }

    #[test]
    fn events_serialize_for_the_wire() {
        let value = serde_json::to_value(ProgressEvent::error("vision capability failed", 20)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "stage": "error",
                "progress": 20,
                "message": "vision capability failed"
            })
        );
    }
}
