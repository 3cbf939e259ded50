//! The two scheduled tasks of a running session.
//!
//! The decay worker ticks every slot each [`MIN_DURATION`] milliseconds. The
//! redraw worker renders at the surface's cadence. They share nothing but the
//! scene lock, and each one exits as soon as its stop channel is signalled or
//! dropped.

use crate::constants::MIN_DURATION;
use crate::error::FrameError;
use crate::render::{DrawCommand, FrameSurface};
use crate::scene::Scene;
use instant::Instant;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Lock `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        log::warn!("[frame] {} lock poisoned, recovering", what);
        poisoned.into_inner()
    })
}

#[inline]
pub(crate) fn lock_scene(scene: &Mutex<Scene>) -> MutexGuard<'_, Scene> {
    lock_or_recover(scene, "scene")
}

/// Milliseconds since `epoch` on the session clock.
#[inline]
pub(crate) fn session_millis(epoch: Instant) -> u64 {
    u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Wait for `period`; false once the stop channel fires or is dropped.
#[inline]
fn wait_or_stop(stop: &Receiver<()>, period: Duration) -> bool {
    matches!(stop.recv_timeout(period), Err(RecvTimeoutError::Timeout))
}

pub(crate) struct DecayWorker {
    pub scene: Arc<Mutex<Scene>>,
    pub epoch: Instant,
    pub stop: Receiver<()>,
}

impl DecayWorker {
    pub fn run(self) {
        let period = Duration::from_millis(u64::from(MIN_DURATION));
        log::debug!("[decay] worker started, period={:?}", period);
        while wait_or_stop(&self.stop, period) {
            let now_ms = session_millis(self.epoch);
            lock_scene(&self.scene).tick(now_ms);
        }
        log::debug!("[decay] worker stopped");
    }
}

pub(crate) struct RedrawWorker {
    pub scene: Arc<Mutex<Scene>>,
    pub surface: Box<dyn FrameSurface>,
    pub stop: Receiver<()>,
}

impl RedrawWorker {
    /// Run until stopped, then hand the surface back for a later restart.
    pub fn run(mut self) -> Box<dyn FrameSurface> {
        let mut commands: Vec<DrawCommand> = Vec::with_capacity(64);
        let mut skipped: u64 = 0;
        log::debug!("[frame] redraw worker started");

        while wait_or_stop(&self.stop, self.surface.frame_interval()) {
            let guard = lock_scene(&self.scene);
            match draw_frame(&guard, self.surface.as_mut(), &mut commands) {
                Ok(()) => {}
                Err(FrameError::Unavailable) => {
                    skipped += 1;
                    log::debug!("[frame] buffer unavailable, skipping frame");
                }
                Err(e) => {
                    skipped += 1;
                    log::warn!("[frame] skipping frame: {}", e);
                }
            }
        }

        log::debug!("[frame] redraw worker stopped, skipped={}", skipped);
        self.surface
    }
}

/// One render pass: acquire, build commands from the scene, present.
/// The caller holds the scene lock for the whole pass.
pub(crate) fn draw_frame(
    scene: &Scene,
    surface: &mut dyn FrameSurface,
    commands: &mut Vec<DrawCommand>,
) -> Result<(), FrameError> {
    surface.acquire_frame()?;
    commands.clear();
    scene.render_into(commands);
    surface.present(commands)
}
