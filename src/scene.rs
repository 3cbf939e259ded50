//! The slot array shared by the input handler, the decay tick and the redraw
//! loop. Everything here is synchronous; [`crate::session`] wraps it in a lock.

use crate::core::{Decay, Highlight, HighlightConfig, Trail, TrailConfig};
use crate::events::{slot_for_contact, ContactEvent, ContactPhase};
use crate::render::DrawCommand;

/// One trackable contact position: a trail and the highlight at its head.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    pub trail: Trail,
    pub highlight: Highlight,
}

impl Slot {
    pub fn new(trail: TrailConfig, highlight: HighlightConfig) -> Self {
        Self {
            trail: Trail::new(trail),
            highlight: Highlight::new(highlight),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    trail_config: TrailConfig,
    highlight_config: HighlightConfig,
}

impl Scene {
    /// Scene with `slot_count` slots (at least one) built from the templates.
    pub fn new(slot_count: usize, trail: TrailConfig, highlight: HighlightConfig) -> Self {
        let slots = (0..slot_count.max(1))
            .map(|_| Slot::new(trail, highlight))
            .collect();
        Self {
            slots,
            trail_config: trail,
            highlight_config: highlight,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// Route one contact event to its slot. Returns false when the event was
    /// dropped (unmapped contact, non-finite coordinates, or a move for a
    /// slot that is not tracking).
    pub fn apply(&mut self, event: &ContactEvent) -> bool {
        let Some(index) = slot_for_contact(event.contact_id, self.slots.len()) else {
            log::debug!(
                "[scene] drop contact {} ({} slots)",
                event.contact_id,
                self.slots.len()
            );
            return false;
        };
        if !event.is_finite() {
            log::debug!("[scene] drop non-finite sample for contact {}", event.contact_id);
            return false;
        }

        let Slot { trail, highlight } = &mut self.slots[index];
        match event.phase {
            ContactPhase::Down => {
                trail.begin_track(event.x, event.y);
                highlight.set_tracking(true);
                highlight.set_fading(false);
                highlight.move_to(event.x, event.y);
                true
            }
            ContactPhase::Move => {
                if !trail.is_tracking() {
                    return false;
                }
                trail.append_point(event.x, event.y);
                highlight.move_to(event.x, event.y);
                true
            }
            ContactPhase::Up => {
                trail.end_track();
                highlight.set_tracking(false);
                highlight.set_fading(true);
                true
            }
        }
    }

    /// Advance every slot's fade. Objects that are not fading are untouched
    /// apart from their tick bookkeeping.
    pub fn tick(&mut self, now_ms: u64) {
        for slot in &mut self.slots {
            slot.trail.tick(now_ms);
            slot.highlight.tick(now_ms);
        }
    }

    /// Append one frame's commands: a clear, then each slot's trail and
    /// highlight in slot order.
    pub fn render_into(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Clear);
        for slot in &self.slots {
            slot.trail.render_into(out);
            slot.highlight.render_into(out);
        }
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        self.render_into(&mut out);
        out
    }

    /// Change the slot count, keeping slots common to both sizes and filling
    /// new ones from the templates.
    pub fn resize(&mut self, slot_count: usize) {
        let slot_count = slot_count.max(1);
        let (trail, highlight) = (self.trail_config, self.highlight_config);
        self.slots
            .resize_with(slot_count, || Slot::new(trail, highlight));
    }

    /// Replace every trail. The highlight array follows the new length.
    pub fn set_trails(&mut self, trails: Vec<Trail>) {
        if trails.is_empty() {
            log::warn!("[scene] ignoring empty trail array");
            return;
        }
        let highlight = self.highlight_config;
        let mut highlights: Vec<Highlight> =
            self.slots.drain(..).map(|s| s.highlight).collect();
        highlights.resize_with(trails.len(), || Highlight::new(highlight));
        self.slots = trails
            .into_iter()
            .zip(highlights)
            .map(|(trail, highlight)| Slot { trail, highlight })
            .collect();
    }

    /// Replace every highlight. The trail array follows the new length.
    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) {
        if highlights.is_empty() {
            log::warn!("[scene] ignoring empty highlight array");
            return;
        }
        let trail = self.trail_config;
        let mut trails: Vec<Trail> = self.slots.drain(..).map(|s| s.trail).collect();
        trails.resize_with(highlights.len(), || Trail::new(trail));
        self.slots = trails
            .into_iter()
            .zip(highlights)
            .map(|(trail, highlight)| Slot { trail, highlight })
            .collect();
    }

    pub fn trail_config(&self) -> TrailConfig {
        self.trail_config
    }

    pub fn highlight_config(&self) -> HighlightConfig {
        self.highlight_config
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_SLOT_COUNT,
            TrailConfig::default(),
            HighlightConfig::default(),
        )
    }
}
