pub mod clause_ctx;
pub mod clause_flow;
pub mod event_sink;

pub use clause_ctx::ClauseCtx;
pub use clause_flow::ClauseFlow;
pub use event_sink::EventSink;
