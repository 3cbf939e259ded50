//! Contact events delivered by the host input source.

/// Lifecycle phase of a single contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Down,
    Move,
    Up,
}

/// One contact sample. `contact_id` is stable from `Down` to `Up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactEvent {
    pub contact_id: u32,
    pub phase: ContactPhase,
    pub x: f32,
    pub y: f32,
}

impl ContactEvent {
    #[inline]
    pub fn down(contact_id: u32, x: f32, y: f32) -> Self {
        Self {
            contact_id,
            phase: ContactPhase::Down,
            x,
            y,
        }
    }

    #[inline]
    pub fn moved(contact_id: u32, x: f32, y: f32) -> Self {
        Self {
            contact_id,
            phase: ContactPhase::Move,
            x,
            y,
        }
    }

    #[inline]
    pub fn up(contact_id: u32, x: f32, y: f32) -> Self {
        Self {
            contact_id,
            phase: ContactPhase::Up,
            x,
            y,
        }
    }

    /// Coordinates are usable only if both are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Slot addressed by `contact_id`, or `None` when the id falls outside the
/// configured slots. Ids beyond the slot count are dropped rather than
/// wrapped so two live contacts never share a slot.
#[inline]
pub fn slot_for_contact(contact_id: u32, slot_count: usize) -> Option<usize> {
    if slot_count == 0 {
        return None;
    }
    let index = usize::try_from(contact_id).ok()?;
    (index < slot_count).then_some(index % slot_count)
}
