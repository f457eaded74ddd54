use crate::grid::{BreakKind, Slot, TimeRow, WeekGrid};
use crate::model::{Course, CourseCode, Faculty, FacultyId, Room, RoomId};
use crate::scheduler::{Placement, UnassignedPeriod};
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Affectation engagée : (période, enseignant, salle, cellule).
/// Les libellés sont recopiés pour que le rendu n'ait besoin d'aucune recherche.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub slot: Slot,
    pub course: CourseCode,
    pub course_name: String,
    pub faculty: FacultyId,
    pub faculty_name: String,
    pub room: RoomId,
    pub room_name: String,
}

impl Assignment {
    pub fn new(slot: Slot, course: &Course, faculty: &Faculty, room: &Room) -> Self {
        Self {
            slot,
            course: course.code.clone(),
            course_name: course.name.clone(),
            faculty: faculty.id.clone(),
            faculty_name: faculty.name.clone(),
            room: room.id.clone(),
            room_name: room.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Break { pause: BreakKind },
    Assigned(Assignment),
    Unoccupied,
}

impl Cell {
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Cell::Assigned(a) => Some(a),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    #[error("{cells} row(s) of cells for {rows} time row(s)")]
    RowCount { rows: usize, cells: usize },
    #[error("time row {time} has {cells} cell(s) for {days} day(s)")]
    DayCount { time: usize, days: usize, cells: usize },
}

/// Résultat complet : une cellule par (ligne horaire, jour).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub days: Vec<Weekday>,
    pub rows: Vec<TimeRow>,
    /// `cells[time][day]`
    pub cells: Vec<Vec<Cell>>,
    #[serde(default)]
    pub unassigned: Vec<UnassignedPeriod>,
}

impl Timetable {
    /// Superpose les affectations sur la grille ; les pauses restent toujours des pauses.
    pub fn assemble(grid: &WeekGrid, placement: Placement, run_id: Uuid) -> Self {
        let mut cells: Vec<Vec<Cell>> = grid
            .rows
            .iter()
            .map(|row| {
                let cell = match row.pause {
                    Some(pause) => Cell::Break { pause },
                    None => Cell::Unoccupied,
                };
                vec![cell; grid.days.len()]
            })
            .collect();

        for a in placement.assignments {
            let Some(cell) = cells
                .get_mut(a.slot.time)
                .and_then(|row| row.get_mut(a.slot.day))
            else {
                continue;
            };
            if matches!(cell, Cell::Unoccupied) {
                *cell = Cell::Assigned(a);
            }
        }

        Self {
            run_id,
            generated_at: Utc::now(),
            days: grid.days.clone(),
            rows: grid.rows.clone(),
            cells,
            unassigned: placement.unassigned,
        }
    }

    pub fn cell(&self, day: usize, time: usize) -> Option<&Cell> {
        self.cells.get(time).and_then(|row| row.get(day))
    }

    /// Vérifie que `cells` couvre exactement `rows × days`.
    pub fn validate_shape(&self) -> Result<(), TimetableError> {
        if self.cells.len() != self.rows.len() {
            return Err(TimetableError::RowCount {
                rows: self.rows.len(),
                cells: self.cells.len(),
            });
        }
        for (time, row) in self.cells.iter().enumerate() {
            if row.len() != self.days.len() {
                return Err(TimetableError::DayCount {
                    time,
                    days: self.days.len(),
                    cells: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Affectations avec la cellule qui les porte, au lieu de leur `slot` enregistré.
    pub fn placed(&self) -> impl Iterator<Item = (Slot, &Assignment)> {
        self.cells.iter().enumerate().flat_map(move |(time, row)| {
            row.iter().enumerate().filter_map(move |(day, cell)| {
                let weekday = *self.days.get(day)?;
                let a = cell.assignment()?;
                Some((Slot { day, time, weekday }, a))
            })
        })
    }

    /// Affectations dans l'ordre de la grille (ligne horaire puis jour).
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.cells.iter().flatten().filter_map(Cell::assignment)
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments().count()
    }

    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Même placement, indépendamment de l'identifiant et de l'horodatage du run.
    pub fn same_layout(&self, other: &Timetable) -> bool {
        self.days == other.days
            && self.rows == other.rows
            && self.cells == other.cells
            && self.unassigned == other.unassigned
    }
}
