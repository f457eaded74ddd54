#![forbid(unsafe_code)]
//! Edt — génération d'emploi du temps hebdomadaire (sans BD).
//!
//! - Entrées fichiers (JSON/CSV) : enseignants, cours, salles.
//! - Placement glouton aléatoire en une passe, sans double réservation.
//! - Grille fixe 5 jours × 8 lignes dont 2 pauses ; rendu en dehors du moteur.

pub mod grid;
pub mod io;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod storage;
pub mod timetable;

pub use grid::{load_grid_from_file, BreakKind, GridError, Slot, TimeRow, WeekGrid};
pub use model::{Catalog, Course, CourseCode, Faculty, FacultyId, InputError, Room, RoomId};
pub use render::{render_grid, CellRenderer, TextCell};
pub use scheduler::{
    Conflict, ConflictKind, GenerateOptions, RngShuffler, SchedError, Scheduler, Shuffler,
    UnassignedPeriod, UnassignedReason,
};
pub use storage::{JsonStorage, Storage};
pub use timetable::{Assignment, Cell, Timetable, TimetableError};
