//! Scene state and per-frame draw-graph construction.
//!
//! Owns the mutable view state driven by user input, the per-body
//! parameter and color model, and the [`FrameComposer`] that assembles an
//! ordered list of [`DrawSubmission`]s each animation tick, fetching
//! geometry through the fingerprint cache.

mod bodies;
mod color;
mod composer;
mod submission;
mod view_state;

pub use bodies::{BodyKind, BodySpin, SceneParams};
pub use color::{MOON_COLOR, TRACE_COLOR, WIREFRAME_COLOR, earth_colors, flat_colors};
pub use composer::{FrameComposer, FrameState};
pub use submission::{DrawSubmission, Topology};
pub use view_state::ViewState;
