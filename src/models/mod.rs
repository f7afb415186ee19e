pub mod ask;
pub mod clause;
pub mod clause_type;
pub mod event;

pub use ask::{AskClause, AskRequest, AskResponse};
pub use clause::{AnalysisResult, Clause};
pub use clause_type::ClauseType;
pub use event::AnalysisEvent;
