//! # fingertrail
//!
//! Fading finger-drawing overlay engine. Tracks a fixed number of touch
//! contacts, keeps a stroke trail and a highlight circle per contact, fades
//! both out after the contact lifts, and emits draw commands for an external
//! rasterizer at the display's cadence.
//!
//! - [`core`]: decay scheduling and the trail and highlight objects
//! - [`scene`]: the slot array and event routing
//! - [`session`]: start/stop of the decay and redraw workers
//! - [`render`]: draw commands and the [`render::FrameSurface`] seam

pub mod constants;
pub mod core;
pub mod error;
pub mod events;
mod frame;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::core::{
    Color, Decay, DecayConfig, DecayState, EdgeStyle, Highlight, HighlightConfig, Trail,
    TrailConfig,
};
pub use error::{FrameError, SessionError};
pub use events::{ContactEvent, ContactPhase};
pub use render::{DrawCommand, FrameSurface, Polyline, StrokeStyle};
pub use scene::{Scene, Slot};
pub use session::{SessionConfig, SessionController};
