use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Identifiant fort pour Faculty
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacultyId(String);

impl FacultyId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Room
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Code de cours (clé unique, ex. `CS101`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Enseignant : expertise (codes de cours) et jours de disponibilité.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    #[serde(default)]
    pub expertise: Vec<CourseCode>,
    #[serde(default)]
    pub availability: Vec<Weekday>,
}

impl Faculty {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: FacultyId::new(id),
            name: name.into(),
            expertise: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn with_expertise<S: AsRef<str>>(mut self, codes: &[S]) -> Self {
        self.expertise.extend(codes.iter().map(CourseCode::new));
        self
    }

    pub fn with_availability(mut self, days: &[Weekday]) -> Self {
        self.availability.extend_from_slice(days);
        self
    }

    pub fn teaches(&self, code: &CourseCode) -> bool {
        self.expertise.contains(code)
    }

    pub fn available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }
}

/// Cours : `credits` détermine le nombre de périodes hebdomadaires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseCode,
    pub name: String,
    pub credits: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Course {
    pub fn new<C: AsRef<str>, N: Into<String>, K: Into<String>>(
        code: C,
        name: N,
        credits: u32,
        kind: K,
    ) -> Self {
        Self {
            code: CourseCode::new(code),
            name: name.into(),
            credits,
            kind: kind.into(),
        }
    }

    /// Le type de salle doit correspondre au type du cours, sans tenir compte de la casse.
    pub fn fits_room(&self, room: &Room) -> bool {
        self.kind.to_lowercase() == room.kind.to_lowercase()
    }
}

/// Salle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Room {
    pub fn new<I: AsRef<str>, N: Into<String>, K: Into<String>>(id: I, name: N, kind: K) -> Self {
        Self {
            id: RoomId::new(id),
            name: name.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} collection is empty")]
    EmptyCollection(&'static str),
    #[error("blank {0} identifier")]
    BlankIdentifier(&'static str),
    #[error("duplicate {kind} identifier: {id}")]
    Duplicate { kind: &'static str, id: String },
    #[error("invalid credits for course {code}: {raw}")]
    InvalidCredits { code: String, raw: String },
    #[error("unknown weekday label: {0}")]
    UnknownWeekday(String),
}

/// Données d'entrée complètes d'une génération.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub faculty: Vec<Faculty>,
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
}

impl Catalog {
    pub fn new(faculty: Vec<Faculty>, courses: Vec<Course>, rooms: Vec<Room>) -> Self {
        Self {
            faculty,
            courses,
            rooms,
        }
    }

    /// Vérifie qu'aucune collection n'est vide.
    pub fn ensure_complete(&self) -> Result<(), InputError> {
        if self.faculty.is_empty() {
            return Err(InputError::EmptyCollection("faculty"));
        }
        if self.courses.is_empty() {
            return Err(InputError::EmptyCollection("course"));
        }
        if self.rooms.is_empty() {
            return Err(InputError::EmptyCollection("room"));
        }
        Ok(())
    }

    /// Identifiants non vides et uniques par collection.
    pub fn validate(&self) -> Result<(), InputError> {
        check_unique("faculty", self.faculty.iter().map(|f| f.id.as_str()))?;
        check_unique("course", self.courses.iter().map(|c| c.code.as_str()))?;
        check_unique("room", self.rooms.iter().map(|r| r.id.as_str()))?;
        Ok(())
    }

    pub fn find_course<'a>(&'a self, code: &CourseCode) -> Option<&'a Course> {
        self.courses.iter().find(|c| &c.code == code)
    }
    pub fn find_faculty<'a>(&'a self, id: &FacultyId) -> Option<&'a Faculty> {
        self.faculty.iter().find(|f| &f.id == id)
    }
    pub fn find_room<'a>(&'a self, id: &RoomId) -> Option<&'a Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn total_credits(&self) -> u64 {
        self.courses.iter().map(|c| u64::from(c.credits)).sum()
    }
}

fn check_unique<'a, I>(kind: &'static str, ids: I) -> Result<(), InputError>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(InputError::BlankIdentifier(kind));
        }
        if !seen.insert(id) {
            return Err(InputError::Duplicate {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse un libellé de jour (`Mon`, `monday`, ...).
pub fn parse_weekday(raw: &str) -> Result<Weekday, InputError> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| InputError::UnknownWeekday(raw.trim().to_string()))
}
