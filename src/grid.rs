use anyhow::{Context, Result};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Nature d'une ligne de pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Short,
    Lunch,
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakKind::Short => f.write_str("Short Break"),
            BreakKind::Lunch => f.write_str("Lunch Break"),
        }
    }
}

/// Ligne horaire de la grille (`start`..`end`), éventuellement une pause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default, rename = "break", skip_serializing_if = "Option::is_none")]
    pub pause: Option<BreakKind>,
}

impl TimeRow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            pause: None,
        }
    }

    pub fn pause(start: NaiveTime, end: NaiveTime, kind: BreakKind) -> Self {
        Self {
            start,
            end,
            pause: Some(kind),
        }
    }

    pub fn is_break(&self) -> bool {
        self.pause.is_some()
    }

    /// Libellé `HH:MM - HH:MM`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Cellule (jour, ligne horaire) de la grille hebdomadaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub day: usize,
    pub time: usize,
    pub weekday: Weekday,
}

impl Slot {
    pub fn key(&self) -> (usize, usize) {
        (self.day, self.time)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must define at least one day")]
    NoDays,
    #[error("grid must define at least one time row")]
    NoRows,
    #[error("duplicate day in grid: {0}")]
    DuplicateDay(Weekday),
    #[error("time row {0} must end after it starts")]
    EmptyRow(String),
    #[error("time rows {0} and {1} are out of order or overlap")]
    RowOrder(String, String),
}

/// Grille hebdomadaire : jours ordonnés × lignes horaires ordonnées.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub days: Vec<Weekday>,
    pub rows: Vec<TimeRow>,
}

impl Default for WeekGrid {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeekGrid {
    /// Grille fixe : lundi→vendredi, 8 lignes dont une pause courte et une pause déjeuner.
    pub fn standard() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            rows: vec![
                TimeRow::new(hm(9, 30), hm(10, 30)),
                TimeRow::new(hm(10, 30), hm(11, 30)),
                TimeRow::pause(hm(11, 30), hm(11, 45), BreakKind::Short),
                TimeRow::new(hm(11, 45), hm(12, 45)),
                TimeRow::new(hm(12, 45), hm(13, 45)),
                TimeRow::pause(hm(13, 45), hm(14, 30), BreakKind::Lunch),
                TimeRow::new(hm(14, 30), hm(15, 30)),
                TimeRow::new(hm(15, 30), hm(16, 30)),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.days.is_empty() {
            return Err(GridError::NoDays);
        }
        if self.rows.is_empty() {
            return Err(GridError::NoRows);
        }
        for (i, day) in self.days.iter().enumerate() {
            if self.days[..i].contains(day) {
                return Err(GridError::DuplicateDay(*day));
            }
        }
        for row in &self.rows {
            if row.end <= row.start {
                return Err(GridError::EmptyRow(row.label()));
            }
        }
        for pair in self.rows.windows(2) {
            if let [a, b] = pair {
                if b.start < a.end {
                    return Err(GridError::RowOrder(a.label(), b.label()));
                }
            }
        }
        Ok(())
    }

    /// Toutes les cellules, ligne horaire d'abord puis jour.
    pub fn slots(&self) -> Vec<Slot> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(time, _)| {
                self.days
                    .iter()
                    .enumerate()
                    .map(move |(day, weekday)| Slot {
                        day,
                        time,
                        weekday: *weekday,
                    })
            })
            .collect()
    }

    /// Cellules hors pauses, dans le même ordre que [`WeekGrid::slots`].
    pub fn assignable_slots(&self) -> Vec<Slot> {
        self.slots()
            .into_iter()
            .filter(|s| !self.is_break(s.time))
            .collect()
    }

    pub fn is_break(&self, time: usize) -> bool {
        self.rows.get(time).is_some_and(TimeRow::is_break)
    }

    pub fn slot(&self, day: usize, time: usize) -> Option<Slot> {
        if time >= self.rows.len() {
            return None;
        }
        self.days.get(day).map(|weekday| Slot {
            day,
            time,
            weekday: *weekday,
        })
    }
}

pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<WeekGrid> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading grid {}", path.display()))?;
    let grid: WeekGrid = serde_json::from_slice(&data)
        .with_context(|| format!("parsing grid {}", path.display()))?;
    grid.validate()?;
    Ok(grid)
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}
