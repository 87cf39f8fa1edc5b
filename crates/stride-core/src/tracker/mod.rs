//! High-level tracker API for managing tasks and habits.
//!
//! This module provides the main [`Tracker`] interface for interacting
//! with the Stride tracking system. The tracker coordinates between the
//! host interface and the store, implementing the business workflows for
//! task, habit, and postpone operations.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (task_handlers, │───▶│ (task_ops,      │───▶│   (via db/)     │
//! │  habit_handlers)│    │  habit_ops)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Host Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with
//!   configuration
//! - [`task_ops`] / [`habit_ops`]: Async wrappers over the store
//! - [`task_handlers`] / [`habit_handlers`]: Composed workflows
//!   (complete-then-recur, auto-postpone runs, streak reports)
//!
//! The store client is constructed exactly once by the builder and shared
//! by reference across all operations; there is no hidden global handle.
//! Each operation runs its store calls on the blocking thread pool.

use std::sync::{Arc, Mutex};

use tokio::task;

// Module declarations
pub mod builder;
pub mod habit_handlers;
pub mod habit_ops;
pub mod task_handlers;
pub mod task_ops;


// Re-export the main types
pub use builder::TrackerBuilder;

use crate::{
    db::Database,
    error::{Result, TrackerError},
};

/// Main tracker interface for managing tasks and habits.
pub struct Tracker {
    pub(crate) db: Arc<Mutex<Database>>,
}

impl Tracker {
    /// Creates a new tracker around an already-initialized store.
    pub(crate) fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Runs a store operation on the blocking thread pool.
    ///
    /// The store handle is shared, so operations serialize on its lock;
    /// each closure runs to completion before the next begins.
    pub(crate) async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || {
            let mut db = db.lock().map_err(|_| TrackerError::Configuration {
                message: "Store mutex poisoned".to_string(),
            })?;
            op(&mut db)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
