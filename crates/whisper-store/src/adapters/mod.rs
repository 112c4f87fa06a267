//! Outer layer: tasks tying the store to a runtime.

pub mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
