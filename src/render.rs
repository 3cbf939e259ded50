//! Draw commands handed to the external rasterizer, and the surface seam.
//!
//! The engine never touches pixels. Each frame it produces an ordered list of
//! [`DrawCommand`]s and passes it to a [`FrameSurface`], which owns the pixel
//! buffer and presents it.

use crate::constants::{DEFAULT_FRAME_INTERVAL_MS, STROKE_CORNER_RADIUS};
use crate::core::Color;
use crate::error::FrameError;
use glam::Vec2;
use smallvec::SmallVec;
use std::time::Duration;

/// Polyline storage; trails rarely exceed a few dozen visible points.
pub type Polyline = SmallVec<[Vec2; 16]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

/// Stroke geometry options forwarded to the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub join: LineJoin,
    pub cap: LineCap,
    /// Radius used to round polyline corners, 0 for sharp corners.
    pub corner_radius: f32,
    pub anti_alias: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            join: LineJoin::Round,
            cap: LineCap::Round,
            corner_radius: STROKE_CORNER_RADIUS,
            anti_alias: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole overlay to transparent.
    Clear,
    StrokePolyline {
        points: Polyline,
        width: f32,
        color: Color,
        alpha: u8,
        style: StrokeStyle,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: u8,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: u8,
        stroke_width: f32,
        style: StrokeStyle,
    },
}

impl DrawCommand {
    pub fn alpha(&self) -> Option<u8> {
        match self {
            DrawCommand::Clear => None,
            DrawCommand::StrokePolyline { alpha, .. }
            | DrawCommand::FillCircle { alpha, .. }
            | DrawCommand::StrokeCircle { alpha, .. } => Some(*alpha),
        }
    }
}

/// Host presentation layer: owns the pixel buffer and presents frames.
///
/// The redraw worker calls [`FrameSurface::acquire_frame`] and, if it
/// succeeds, [`FrameSurface::present`] with the frame's commands, all while
/// holding the scene lock. Errors from either call skip the frame.
pub trait FrameSurface: Send {
    /// Lock the next frame buffer for drawing.
    fn acquire_frame(&mut self) -> Result<(), FrameError>;

    /// Rasterize `commands` into the acquired buffer and present it.
    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), FrameError>;

    /// Delay between redraws.
    fn frame_interval(&self) -> Duration {
        Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS)
    }
}

impl<S: FrameSurface + ?Sized> FrameSurface for Box<S> {
    fn acquire_frame(&mut self) -> Result<(), FrameError> {
        (**self).acquire_frame()
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), FrameError> {
        (**self).present(commands)
    }

    fn frame_interval(&self) -> Duration {
        (**self).frame_interval()
    }
}

#[inline]
pub(crate) fn clamp_alpha(opacity: u32) -> u8 {
    opacity.min(u8::MAX as u32) as u8
}
