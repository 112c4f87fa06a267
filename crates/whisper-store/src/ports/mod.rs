//! Middle layer: the driving API trait and the driven clock trait.

pub mod inbound;
pub mod outbound;

pub use inbound::MessageBoardApi;
pub use outbound::{MockTimeSource, SystemTimeSource, TimeSource};
