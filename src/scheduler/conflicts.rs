use super::{Conflict, ConflictKind, Scheduler};
use crate::grid::Slot;
use crate::timetable::{Assignment, Timetable};
use std::collections::HashMap;

/// Contrôle chaque affectation à la cellule `slot` où elle est posée.
pub(super) fn audit<'a, I>(scheduler: &Scheduler, placed: I) -> Vec<Conflict>
where
    I: IntoIterator<Item = (Slot, &'a Assignment)>,
{
    let catalog = &scheduler.catalog;
    let mut out = Vec::new();
    let mut by_slot: HashMap<(usize, usize), Vec<(Slot, &Assignment)>> = HashMap::new();

    for (slot, a) in placed {
        by_slot.entry(slot.key()).or_default().push((slot, a));

        if scheduler.grid.is_break(slot.time) {
            out.push(conflict(slot, ConflictKind::BreakOccupied, a.course.as_str()));
        }

        let course = catalog.find_course(&a.course);
        let faculty = catalog.find_faculty(&a.faculty);
        let room = catalog.find_room(&a.room);
        let (Some(course), Some(faculty), Some(room)) = (course, faculty, room) else {
            let subject = format!("{}/{}/{}", a.course.as_str(), a.faculty.as_str(), a.room.as_str());
            out.push(conflict(slot, ConflictKind::UnknownReference, &subject));
            continue;
        };

        if !faculty.teaches(&course.code) {
            out.push(conflict(slot, ConflictKind::ExpertiseMismatch, faculty.id.as_str()));
        }
        if !faculty.available_on(slot.weekday) {
            out.push(conflict(slot, ConflictKind::Unavailable, faculty.id.as_str()));
        }
        if !course.fits_room(room) {
            out.push(conflict(slot, ConflictKind::RoomTypeMismatch, room.id.as_str()));
        }
    }

    let mut slots: Vec<_> = by_slot.into_iter().collect();
    slots.sort_by_key(|(key, _)| (key.1, key.0));

    for (_, shared) in slots {
        for (idx, (slot, a)) in shared.iter().enumerate() {
            for (_, b) in shared.iter().skip(idx + 1) {
                if a.faculty == b.faculty {
                    out.push(conflict(*slot, ConflictKind::FacultyDoubleBooked, a.faculty.as_str()));
                }
                if a.room == b.room {
                    out.push(conflict(*slot, ConflictKind::RoomDoubleBooked, a.room.as_str()));
                }
            }
        }
    }

    out
}

/// La position dans `cells` fait foi ; un `slot` enregistré différent est signalé.
pub(super) fn audit_timetable(scheduler: &Scheduler, timetable: &Timetable) -> Vec<Conflict> {
    let mut out: Vec<Conflict> = timetable
        .placed()
        .filter(|(slot, a)| a.slot != *slot)
        .map(|(slot, a)| conflict(slot, ConflictKind::SlotMismatch, a.course.as_str()))
        .collect();
    out.extend(audit(scheduler, timetable.placed()));
    out
}

fn conflict(slot: Slot, kind: ConflictKind, subject: &str) -> Conflict {
    Conflict {
        slot,
        kind,
        subject: subject.to_string(),
    }
}
