//! Triangle-man adventure: a small arena shooter.
//!
//! The library is the simulation core.  It never touches the terminal; the
//! binary supplies input snapshots, a clock and a `Renderer`.

pub mod assets;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod render;
pub mod timing;
