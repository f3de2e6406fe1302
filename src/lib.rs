//! Perllert game library crate.

pub mod app;
pub mod asset;
pub mod audio;
pub mod constants;
pub mod error;
pub mod game;
pub mod map;
pub mod save;
pub mod systems;
