//! The angler and the gear they fish with.

pub mod equipment;
pub mod player;

pub use equipment::Equipment;
pub use player::Player;
