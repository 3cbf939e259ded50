pub mod contact;

pub use contact::{slot_for_contact, ContactEvent, ContactPhase};
