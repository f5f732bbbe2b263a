//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod environment;
pub mod invocation;
pub mod priority;

// Re-export commonly used types
pub use environment::Environment;
pub use invocation::ComposeInvocation;
pub use priority::{EntryKind, PriorityMap, ServiceEntry};
