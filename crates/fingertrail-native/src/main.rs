use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use fingertrail::{
    Color, ContactEvent, DrawCommand, EdgeStyle, FrameError, FrameSurface, HighlightConfig,
    SessionConfig, SessionController, TrailConfig,
};
use glam::Vec2;
use rand::prelude::*;

// Replay tuning
const SAMPLE_INTERVAL: Duration = Duration::from_millis(8);
const GESTURE_DURATION: Duration = Duration::from_millis(1500);
const FADE_WAIT: Duration = Duration::from_millis(800);
const SURFACE_SIZE: Vec2 = Vec2::new(1080.0, 1920.0);
const JITTER_PX: f32 = 1.5;
// every Nth acquire reports a busy buffer, as a compositor occasionally does
const BUSY_EVERY: u64 = 45;

#[derive(Default)]
struct SurfaceStats {
    frames: AtomicU64,
    skipped: AtomicU64,
    strokes: AtomicU64,
    circles: AtomicU64,
}

/// Stand-in for a real compositor surface: tallies what it would draw.
struct LoggingSurface {
    stats: Arc<SurfaceStats>,
    acquires: u64,
    last_report: Instant,
}

impl LoggingSurface {
    fn new(stats: Arc<SurfaceStats>) -> Self {
        Self {
            stats,
            acquires: 0,
            last_report: Instant::now(),
        }
    }
}

impl FrameSurface for LoggingSurface {
    fn acquire_frame(&mut self) -> Result<(), FrameError> {
        self.acquires += 1;
        if self.acquires % BUSY_EVERY == 0 {
            self.stats.skipped.fetch_add(1, Ordering::Relaxed);
            return Err(FrameError::Unavailable);
        }
        Ok(())
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<(), FrameError> {
        let mut strokes = 0;
        let mut circles = 0;
        for cmd in commands {
            match cmd {
                DrawCommand::StrokePolyline { .. } => strokes += 1,
                DrawCommand::FillCircle { .. } => circles += 1,
                DrawCommand::StrokeCircle { .. } | DrawCommand::Clear => {}
            }
        }
        self.stats.frames.fetch_add(1, Ordering::Relaxed);
        self.stats.strokes.fetch_add(strokes, Ordering::Relaxed);
        self.stats.circles.fetch_add(circles, Ordering::Relaxed);

        if self.last_report.elapsed() >= Duration::from_millis(500) {
            self.last_report = Instant::now();
            log::info!("[surface] frame strokes={} circles={}", strokes, circles);
        }
        Ok(())
    }
}

/// Position of contact `id` at `t` seconds: each contact orbits its own center.
fn gesture_position(id: u32, t: f32, rng: &mut StdRng) -> Vec2 {
    let center = SURFACE_SIZE * Vec2::new(0.3 + 0.4 * id as f32, 0.5);
    let radius = 180.0 + 60.0 * id as f32;
    let phase = t * std::f32::consts::TAU * (0.6 + 0.2 * id as f32);
    let jitter = Vec2::new(
        rng.gen_range(-JITTER_PX..=JITTER_PX),
        rng.gen_range(-JITTER_PX..=JITTER_PX),
    );
    center + Vec2::new(phase.cos(), phase.sin()) * radius + jitter
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::default()
        .with_trail(
            TrailConfig::default()
                .with_color(Color::rgb(0x22, 0x88, 0xFF))
                .with_edge_style(EdgeStyle::NarrowerAtHead)
                .with_opacity(255)
                .with_fade_out_duration(300),
        )
        .with_highlight(
            HighlightConfig::default()
                .with_fill_color(Color::rgb(0xFF, 0xFF, 0xFF))
                .with_radius(30)
                .with_fade_out_duration(400),
        );

    let stats = Arc::new(SurfaceStats::default());
    let session = SessionController::new(config, LoggingSurface::new(Arc::clone(&stats)));
    session.start().context("starting session")?;

    let mut rng = StdRng::seed_from_u64(7);
    let contacts: Vec<u32> = (0..session.slot_count() as u32).collect();

    let start = Instant::now();
    let down: Vec<ContactEvent> = contacts
        .iter()
        .map(|&id| {
            let p = gesture_position(id, 0.0, &mut rng);
            ContactEvent::down(id, p.x, p.y)
        })
        .collect();
    for event in &down {
        session.handle_event(event);
    }

    let mut batch = Vec::with_capacity(contacts.len());
    let mut last = down.iter().map(|e| Vec2::new(e.x, e.y)).collect::<Vec<_>>();
    while start.elapsed() < GESTURE_DURATION {
        thread::sleep(SAMPLE_INTERVAL);
        let t = start.elapsed().as_secs_f32();
        batch.clear();
        for (&id, last_pos) in contacts.iter().zip(last.iter_mut()) {
            let p = gesture_position(id, t, &mut rng);
            *last_pos = p;
            batch.push(ContactEvent::moved(id, p.x, p.y));
        }
        session.handle_events(&batch);
    }

    for (&id, p) in contacts.iter().zip(&last) {
        session.handle_event(&ContactEvent::up(id, p.x, p.y));
    }
    log::info!("[replay] contacts lifted, waiting for fade-out");
    thread::sleep(FADE_WAIT);

    let leftover = session
        .render_now()
        .iter()
        .filter(|c| !matches!(c, DrawCommand::Clear))
        .count();
    session.stop();

    log::info!(
        "[replay] frames={} skipped={} strokes={} circles={} leftover_commands={}",
        stats.frames.load(Ordering::Relaxed),
        stats.skipped.load(Ordering::Relaxed),
        stats.strokes.load(Ordering::Relaxed),
        stats.circles.load(Ordering::Relaxed),
        leftover
    );
    Ok(())
}
