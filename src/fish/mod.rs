//! Fish: species, behaviour policies and factories.

pub mod behavior;
pub mod factory;
pub mod types;

pub use behavior::{BiteBehavior, FightBehavior, FightCheck};
pub use factory::{FactoryRegistry, FishFactory, FishFactoryProvider};
pub use types::{Fish, Species};
