//! Orrery application framework.
//!
//! Window creation, event routing, and the animation loop.

pub mod window;

pub use window::{OrreryApp, run_with_config};
