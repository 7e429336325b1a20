pub mod metrics;
pub mod request_context;
pub mod state;

pub use metrics::{PipelinePhase, StageTimings};
pub use request_context::RequestContext;
pub use state::{Captured, Grounded, ProcessingState, Submitted, Synthesized};
