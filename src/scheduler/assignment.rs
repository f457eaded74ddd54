use super::shuffle::Shuffler;
use super::types::{Period, Placement, UnassignedPeriod, UnassignedReason};
use super::usage::UsageTracker;
use super::{util, Scheduler};
use crate::grid::Slot;
use crate::model::{Faculty, Room};
use crate::timetable::Assignment;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Placement glouton en une passe, sans retour arrière : chaque période prend
/// la première combinaison (cellule, enseignant, salle) libre trouvée.
pub(super) fn place_periods<S: Shuffler>(
    scheduler: &Scheduler,
    mut periods: Vec<Period>,
    shuffler: &mut S,
) -> Placement {
    let catalog = &scheduler.catalog;
    shuffler.shuffle(&mut periods);

    let assignable = scheduler.grid.assignable_slots();
    let mut used: HashSet<(usize, usize)> = HashSet::new();
    let mut usage = UsageTracker::new();
    let mut placement = Placement::default();

    for period in periods {
        let mut candidates: Vec<Slot> = assignable
            .iter()
            .filter(|s| !used.contains(&s.key()))
            .copied()
            .collect();
        shuffler.shuffle(&mut candidates);

        let Some(course) = catalog.find_course(&period.course) else {
            warn!(course = period.course.as_str(), "unknown course reference, period skipped");
            placement.unassigned.push(UnassignedPeriod {
                course: period.course,
                reason: UnassignedReason::MissingCourse,
            });
            continue;
        };

        let found = candidates.iter().find_map(|slot| {
            let mut faculty = util::eligible_faculty(catalog, course, slot);
            let mut rooms = util::eligible_rooms(catalog, course);
            shuffler.shuffle(&mut faculty);
            shuffler.shuffle(&mut rooms);
            first_free(&usage, slot, &faculty, &rooms).map(|(f, r)| (*slot, f, r))
        });

        match found {
            Some((slot, faculty, room)) => {
                usage.commit(&slot, &faculty.id, &room.id);
                used.insert(slot.key());
                debug!(
                    course = course.code.as_str(),
                    faculty = faculty.id.as_str(),
                    room = room.id.as_str(),
                    day = %slot.weekday,
                    time = slot.time,
                    "period placed"
                );
                placement
                    .assignments
                    .push(Assignment::new(slot, course, faculty, room));
            }
            None => {
                warn!(
                    course = course.code.as_str(),
                    ordinal = period.ordinal,
                    "no eligible faculty/room left, period unassigned"
                );
                placement.unassigned.push(UnassignedPeriod {
                    course: period.course,
                    reason: UnassignedReason::NoEligibleResource,
                });
            }
        }
    }

    placement
}

/// Enseignant en boucle externe, salle en boucle interne.
fn first_free<'a>(
    usage: &UsageTracker,
    slot: &Slot,
    faculty: &[&'a Faculty],
    rooms: &[&'a Room],
) -> Option<(&'a Faculty, &'a Room)> {
    faculty.iter().find_map(|f| {
        rooms
            .iter()
            .find(|r| usage.is_free(slot, &f.id, &r.id))
            .map(|r| (*f, *r))
    })
}
