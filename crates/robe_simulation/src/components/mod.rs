//! ECS Components для Robe симуляции
//!
//! Организация по доменам:
//! - world: сетевые id и объекты мира (NetId, PlayerStatus, Valuable, ExtractionPoint)
//! - movement: навигация (NavAgent, SpeedOverride, NavBounds)
//! - combat: урон и прерывания (HurtVolume, Stunned)

pub mod combat;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use combat::*;
pub use movement::*;
pub use world::*;
