// Public API
pub use position::{Position, Slot, Team};
pub use registry::{LineupRegistry, PlayerId};

pub mod position;
mod registry;
