use super::orchestrator::AnalysisOrchestrator;
use crate::common::AnalysisRequest;
use crate::config::Configuration;
use crate::error::AppError;
use crate::pipeline::domain::AnalysisReport;
use futures::future::BoxFuture;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::util::BoxCloneService;
use tower::{BoxError, Service, ServiceBuilder, ServiceExt};
use tracing::warn;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(15);

/// Tower view of the orchestrator. Always answers with a report.
#[derive(Clone)]
pub struct AnalysisService {
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl AnalysisService {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

impl Service<AnalysisRequest> for AnalysisService {
    type Response = AnalysisReport;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AnalysisRequest) -> Self::Future {
        let orchestrator = self.orchestrator.clone();

        Box::pin(async move { Ok(orchestrator.analyze(&request).await) })
    }
}

/// Transport-facing entry: races each analysis against a fixed deadline and
/// reports expiry as [`AppError::Timeout`] rather than a degraded report.
#[derive(Clone)]
pub struct DeadlineAnalyzer {
    service: BoxCloneService<AnalysisRequest, AnalysisReport, BoxError>,
    deadline: Duration,
}

impl DeadlineAnalyzer {
    pub fn builder(orchestrator: Arc<AnalysisOrchestrator>) -> DeadlineAnalyzerBuilder {
        DeadlineAnalyzerBuilder {
            orchestrator,
            deadline: DEFAULT_DEADLINE,
            concurrency_limit: None,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// The returned future owns its own service handle, so it can be spawned.
    pub fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'static, Result<AnalysisReport, AppError>> {
        let service = self.service.clone();
        let deadline = self.deadline;
        let request_id = request.request_id();

        Box::pin(async move {
            service.oneshot(request).await.map_err(|e| {
                if e.is::<Elapsed>() {
                    warn!("Analysis {} exceeded the {:?} deadline", request_id, deadline);
                    AppError::Timeout(deadline)
                } else {
                    AppError::Service(e.to_string())
                }
            })
        })
    }
}

pub struct DeadlineAnalyzerBuilder {
    orchestrator: Arc<AnalysisOrchestrator>,
    deadline: Duration,
    concurrency_limit: Option<usize>,
}

impl DeadlineAnalyzerBuilder {
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit);
        self
    }

    pub fn configuration(mut self, configuration: &Configuration) -> Self {
        self.deadline = configuration.analysis_deadline();
        self.concurrency_limit = configuration.max_concurrent_analyses;
        self
    }

    pub fn build(self) -> DeadlineAnalyzer {
        let service = ServiceBuilder::new()
            .layer(TimeoutLayer::new(self.deadline))
            .option_layer(self.concurrency_limit.map(ConcurrencyLimitLayer::new))
            .service(AnalysisService::new(self.orchestrator));

        DeadlineAnalyzer {
            service: BoxCloneService::new(service),
            deadline: self.deadline,
        }
    }
}
