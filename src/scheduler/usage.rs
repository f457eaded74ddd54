use crate::grid::Slot;
use crate::model::{FacultyId, RoomId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct SlotUsage {
    faculty: HashSet<FacultyId>,
    rooms: HashSet<RoomId>,
}

/// Enseignants et salles déjà engagés par cellule, pour une seule génération.
/// Pas de retrait : un engagement est définitif jusqu'à la fin du run.
#[derive(Debug, Default)]
pub struct UsageTracker {
    slots: HashMap<(usize, usize), SlotUsage>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free(&self, slot: &Slot, faculty: &FacultyId, room: &RoomId) -> bool {
        match self.slots.get(&slot.key()) {
            Some(usage) => !usage.faculty.contains(faculty) && !usage.rooms.contains(room),
            None => true,
        }
    }

    pub fn commit(&mut self, slot: &Slot, faculty: &FacultyId, room: &RoomId) {
        let usage = self.slots.entry(slot.key()).or_default();
        usage.faculty.insert(faculty.clone());
        usage.rooms.insert(room.clone());
    }
}
