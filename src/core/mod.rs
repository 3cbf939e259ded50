pub mod color;
pub mod decay;
pub mod highlight;
pub mod trail;

pub use color::Color;
pub use decay::{clamp_duration, Decay, DecayConfig, DecayState};
pub use highlight::{Highlight, HighlightConfig};
pub use trail::{EdgeStyle, Trail, TrailConfig};
