//! Progress engine
//!
//! The store owns the profile; the practice engine feeds it completions.

pub mod store;
pub mod session;

pub use store::{AppliedUpdate, ProgressStore};
pub use session::{CompletionOutcome, PracticeEngine, DEFAULT_SUBMIT_TIMEOUT};
