//! Systems module - all ECS systems for the slingshot game.

pub mod collision;
pub mod debug;
pub mod glide;
pub mod input;
pub mod powers;
pub mod slingshot;
pub mod vfx;
