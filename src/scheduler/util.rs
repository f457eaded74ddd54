use crate::grid::Slot;
use crate::model::{Catalog, Course, Faculty, Room};

pub(super) fn eligible_faculty<'a>(
    catalog: &'a Catalog,
    course: &Course,
    slot: &Slot,
) -> Vec<&'a Faculty> {
    catalog
        .faculty
        .iter()
        .filter(|f| f.teaches(&course.code) && f.available_on(slot.weekday))
        .collect()
}

pub(super) fn eligible_rooms<'a>(catalog: &'a Catalog, course: &Course) -> Vec<&'a Room> {
    catalog.rooms.iter().filter(|r| course.fits_room(r)).collect()
}
