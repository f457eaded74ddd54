use crate::grid::{GridError, Slot};
use crate::model::{CourseCode, InputError};
use crate::timetable::Assignment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Graine du mélange ; `None` = source d'entropie.
    pub seed: Option<u64>,
}

impl GenerateOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Une occurrence hebdomadaire d'un cours (une par crédit).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    pub course: CourseCode,
    pub ordinal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedReason {
    MissingCourse,
    NoEligibleResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignedPeriod {
    pub course: CourseCode,
    pub reason: UnassignedReason,
}

/// Sortie brute du moteur, avant superposition sur la grille.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<UnassignedPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    FacultyDoubleBooked,
    RoomDoubleBooked,
    ExpertiseMismatch,
    Unavailable,
    RoomTypeMismatch,
    BreakOccupied,
    SlotMismatch,
    UnknownReference,
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub slot: Slot,
    pub kind: ConflictKind,
    pub subject: String,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("incomplete input: {0} collection is missing or empty")]
    IncompleteInput(&'static str),
    #[error("invalid input: {0}")]
    Invalid(InputError),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<InputError> for SchedError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::EmptyCollection(kind) => SchedError::IncompleteInput(kind),
            other => SchedError::Invalid(other),
        }
    }
}
