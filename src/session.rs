//! Session controller: owns the scene, routes contact events into it and runs
//! the decay and redraw workers between `start` and `stop`.

use crate::constants::DEFAULT_SLOT_COUNT;
use crate::core::{Highlight, HighlightConfig, Trail, TrailConfig};
use crate::error::SessionError;
use crate::events::ContactEvent;
use crate::frame::{lock_or_recover, lock_scene, session_millis, DecayWorker, RedrawWorker};
use crate::render::{DrawCommand, FrameSurface};
use crate::scene::Scene;
use instant::Instant;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub slots: usize,
    pub trail: TrailConfig,
    pub highlight: HighlightConfig,
    /// Value returned from event handlers, telling the host whether the
    /// event was consumed.
    pub consume_events: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOT_COUNT,
            trail: TrailConfig::default(),
            highlight: HighlightConfig::default(),
            consume_events: true,
        }
    }
}

impl SessionConfig {
    pub fn with_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_trail(mut self, trail: TrailConfig) -> Self {
        self.trail = trail;
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_consume_events(mut self, consume: bool) -> Self {
        self.consume_events = consume;
        self
    }
}

/// What a worker thread hands back: the redraw worker returns its surface,
/// or `None` if it exited before the surface arrived. The decay worker always
/// returns `None`.
type WorkerExit = Option<Box<dyn FrameSurface>>;

struct Workers {
    stop_decay: Sender<()>,
    stop_redraw: Sender<()>,
    decay: JoinHandle<WorkerExit>,
    redraw: JoinHandle<WorkerExit>,
}

impl Workers {
    /// Signal both workers and join them, handing back the surface.
    fn shut_down(self) -> Option<Box<dyn FrameSurface>> {
        // a send error only means the worker already exited
        let _ = self.stop_decay.send(());
        let _ = self.stop_redraw.send(());

        if self.decay.join().is_err() {
            log::warn!("[session] decay worker panicked");
        }
        match self.redraw.join() {
            Ok(surface) => surface,
            Err(_) => {
                log::warn!("[session] redraw worker panicked, surface lost");
                None
            }
        }
    }
}

/// Owns the scene and the worker lifecycle.
///
/// Every method takes `&self`, so the controller can be shared behind an
/// `Arc` between the thread that delivers input and the thread that starts
/// and stops the session. Input never waits on the lifecycle lock.
pub struct SessionController {
    scene: Arc<Mutex<Scene>>,
    epoch: Instant,
    consume_events: AtomicBool,
    running: AtomicBool,
    // parked here while stopped, owned by the redraw worker while running
    surface: Mutex<Option<Box<dyn FrameSurface>>>,
    workers: Mutex<Option<Workers>>,
}

impl SessionController {
    pub fn new<S: FrameSurface + 'static>(config: SessionConfig, surface: S) -> Self {
        let scene = Scene::new(config.slots, config.trail, config.highlight);
        log::info!(
            "[session] created slots={} consume_events={}",
            scene.slot_count(),
            config.consume_events
        );
        Self {
            scene: Arc::new(Mutex::new(scene)),
            epoch: Instant::now(),
            consume_events: AtomicBool::new(config.consume_events),
            running: AtomicBool::new(false),
            surface: Mutex::new(Some(Box::new(surface))),
            workers: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Whether a surface is parked on the controller, i.e. the next `start`
    /// has something to draw into.
    pub fn has_surface(&self) -> bool {
        lock_or_recover(&self.surface, "surface").is_some()
    }

    /// Spawn the decay and redraw workers.
    ///
    /// On failure the session stays stopped and keeps its surface, so a
    /// later `start` can try again.
    pub fn start(&self) -> Result<(), SessionError> {
        let mut workers = lock_or_recover(&self.workers, "workers");
        if workers.is_some() {
            return Err(SessionError::AlreadyRunning);
        }
        let surface = lock_or_recover(&self.surface, "surface")
            .take()
            .ok_or(SessionError::NoSurface)?;

        let spawned = spawn_workers(&self.scene, self.epoch, surface, |name, task| {
            thread::Builder::new().name(name.into()).spawn(task)
        });
        match spawned {
            Ok(w) => {
                *workers = Some(w);
                self.running.store(true, Ordering::Release);
                log::info!("[session] started");
                Ok(())
            }
            Err((e, surface)) => {
                *lock_or_recover(&self.surface, "surface") = Some(surface);
                log::warn!("[session] failed to start: {}", e);
                Err(SessionError::Spawn(e))
            }
        }
    }

    /// Halt both workers and wait for them. No worker callback runs after
    /// this returns. Stopping a stopped session does nothing.
    pub fn stop(&self) {
        let mut workers = lock_or_recover(&self.workers, "workers");
        let Some(active) = workers.take() else {
            return;
        };
        self.running.store(false, Ordering::Release);
        if let Some(surface) = active.shut_down() {
            *lock_or_recover(&self.surface, "surface") = Some(surface);
        }
        log::info!("[session] stopped");
    }

    /// Stop, then start with fresh workers.
    pub fn restart(&self) -> Result<(), SessionError> {
        log::info!("[session] restarting");
        self.stop();
        self.start()
    }

    /// Apply one contact event. Events are ignored while stopped. Returns the
    /// configured consume flag either way.
    pub fn handle_event(&self, event: &ContactEvent) -> bool {
        if self.is_running() {
            lock_scene(&self.scene).apply(event);
        }
        self.consume_events()
    }

    /// Apply a batch (e.g. every contact of one move) under a single lock.
    pub fn handle_events(&self, events: &[ContactEvent]) -> bool {
        if self.is_running() && !events.is_empty() {
            let mut scene = lock_scene(&self.scene);
            for event in events {
                scene.apply(event);
            }
        }
        self.consume_events()
    }

    pub fn consume_events(&self) -> bool {
        self.consume_events.load(Ordering::Relaxed)
    }

    pub fn set_consume_events(&self, consume: bool) {
        self.consume_events.store(consume, Ordering::Relaxed);
    }

    pub fn slot_count(&self) -> usize {
        lock_scene(&self.scene).slot_count()
    }

    /// Change the number of slots. Existing slots keep their state.
    pub fn resize(&self, slot_count: usize) {
        let mut scene = lock_scene(&self.scene);
        let before = scene.slot_count();
        scene.resize(slot_count);
        log::info!("[session] resized slots {} -> {}", before, scene.slot_count());
    }

    pub fn set_trails(&self, trails: Vec<Trail>) {
        lock_scene(&self.scene).set_trails(trails);
    }

    pub fn set_highlights(&self, highlights: Vec<Highlight>) {
        lock_scene(&self.scene).set_highlights(highlights);
    }

    /// Run `f` against the scene under the lock, e.g. to restyle a slot.
    pub fn with_scene<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        f(&mut lock_scene(&self.scene))
    }

    /// Commands the next frame would contain.
    pub fn render_now(&self) -> Vec<DrawCommand> {
        lock_scene(&self.scene).render()
    }

    /// Milliseconds on the session clock, the time base used for ticks.
    pub fn now_ms(&self) -> u64 {
        session_millis(self.epoch)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.stop();
    }
}

type Spawned<T> = std::io::Result<JoinHandle<T>>;

/// Start both workers through `spawn`.
///
/// The redraw worker receives the surface over a channel only after its
/// thread exists, so every failure path hands the surface back to the
/// caller together with the error.
fn spawn_workers<F>(
    scene: &Arc<Mutex<Scene>>,
    epoch: Instant,
    surface: Box<dyn FrameSurface>,
    mut spawn: F,
) -> Result<Workers, (io::Error, Box<dyn FrameSurface>)>
where
    F: FnMut(&str, Box<dyn FnOnce() -> WorkerExit + Send>) -> Spawned<WorkerExit>,
{
    let (stop_decay, decay_rx) = mpsc::channel();
    let decay = DecayWorker {
        scene: Arc::clone(scene),
        epoch,
        stop: decay_rx,
    };
    let decay = match spawn(
        "fingertrail-decay",
        Box::new(move || {
            decay.run();
            None
        }),
    ) {
        Ok(handle) => handle,
        Err(e) => return Err((e, surface)),
    };

    let (stop_redraw, redraw_rx) = mpsc::channel();
    let (surface_tx, surface_rx) = mpsc::channel::<Box<dyn FrameSurface>>();
    let redraw_scene = Arc::clone(scene);
    let redraw = spawn(
        "fingertrail-redraw",
        Box::new(move || {
            let surface = surface_rx.recv().ok()?;
            let worker = RedrawWorker {
                scene: redraw_scene,
                surface,
                stop: redraw_rx,
            };
            Some(worker.run())
        }),
    );
    let redraw = match redraw {
        Ok(handle) => handle,
        Err(e) => {
            drop(stop_decay);
            if decay.join().is_err() {
                log::warn!("[session] decay worker panicked");
            }
            return Err((e, surface));
        }
    };

    if let Err(mpsc::SendError(surface)) = surface_tx.send(surface) {
        let workers = Workers {
            stop_decay,
            stop_redraw,
            decay,
            redraw,
        };
        let _ = workers.shut_down();
        return Err((io::Error::other("redraw worker exited early"), surface));
    }

    Ok(Workers {
        stop_decay,
        stop_redraw,
        decay,
        redraw,
    })
}
