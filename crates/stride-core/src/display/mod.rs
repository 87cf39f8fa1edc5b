//! Display formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (in [`models`]),
//! producing markdown for rich terminal rendering; newtype wrappers add
//! contextual formatting for collections ([`collections`]) and operation
//! outcomes ([`results`]), so the same data can render differently in a
//! list, a detail view, or a confirmation message. Date and time
//! formatting helpers live in [`datetime`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Display Wrapper │    │   Formatted     │
//! │  (Task, Habit)  │───▶│    Types        │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Habits, PostponeLog, Tasks};
pub use datetime::{DueDate, LocalDateTime};
pub use results::{
    CheckInResult, CompletionResult, CreateResult, OperationStatus, PostponeRunResult,
    StreakReport,
};
