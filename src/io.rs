use crate::model::{
    parse_weekday, Catalog, Course, CourseCode, Faculty, FacultyId, InputError, Room, RoomId,
};
use crate::timetable::{Cell, Timetable};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Crédits tolérants : `2` ou `"2"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Credits {
    Int(i64),
    Text(String),
}

impl Credits {
    fn into_text(self) -> String {
        match self {
            Credits::Int(n) => n.to_string(),
            Credits::Text(s) => s.trim().to_string(),
        }
    }
}

/// Liste JSON ou champ CSV séparé par `;` ou `|`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListField {
    Many(Vec<String>),
    Joined(String),
}

impl ListField {
    fn into_items(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            ListField::Many(items) => items,
            ListField::Joined(s) => s.split([';', '|']).map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for ListField {
    fn default() -> Self {
        ListField::Many(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct FacultyRow {
    id: String,
    name: String,
    #[serde(default)]
    expertise: ListField,
    #[serde(default)]
    availability: ListField,
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    code: String,
    name: String,
    credits: Credits,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct RoomRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Lit un tableau d'enregistrements ; le format est déduit de l'extension (`json` ou `csv`).
fn read_rows<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<T>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "json" => {
            let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&data)
                .with_context(|| format!("parsing {} (expected a JSON array)", path.display()))
        }
        "csv" => {
            let mut rdr = ReaderBuilder::new()
                .has_headers(true)
                .trim(Trim::All)
                .from_path(path)
                .with_context(|| format!("reading {}", path.display()))?;
            // champs lus comme texte brut : `007` reste `007`, `1.10` reste `1.10`
            let mut out: Vec<T> = Vec::new();
            for (line, rec) in rdr.deserialize::<HashMap<String, String>>().enumerate() {
                let row = || format!("{} row {}", path.display(), line + 1);
                let fields: Map<String, Value> = rec
                    .with_context(row)?
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                out.push(serde_json::from_value(Value::Object(fields)).with_context(row)?);
            }
            Ok(out)
        }
        _ => bail!("unsupported file type: {}", path.display()),
    }
}

/// Import des enseignants : `id,name,expertise,availability`
pub fn load_faculty<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Faculty>> {
    let rows: Vec<FacultyRow> = read_rows(path)?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id.trim().to_string();
        let availability = row
            .availability
            .into_items()
            .iter()
            .map(|d| parse_weekday(d))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("invalid availability for faculty {id}"))?;
        out.push(Faculty {
            id: FacultyId::new(&id),
            name: row.name.trim().to_string(),
            expertise: row
                .expertise
                .into_items()
                .iter()
                .map(CourseCode::new)
                .collect(),
            availability,
        });
    }
    Ok(out)
}

/// Import des cours : `code,name,credits,type`
pub fn load_courses<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Course>> {
    let rows: Vec<CourseRow> = read_rows(path)?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let code = row.code.trim().to_string();
        let raw = row.credits.into_text();
        let credits: u32 = raw.parse().map_err(|_| InputError::InvalidCredits {
            code: code.clone(),
            raw: raw.clone(),
        })?;
        out.push(Course::new(&code, row.name.trim(), credits, row.kind.trim()));
    }
    Ok(out)
}

/// Import des salles : `id,name,type`
pub fn load_rooms<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Room>> {
    let rows: Vec<RoomRow> = read_rows(path)?;
    Ok(rows
        .into_iter()
        .map(|row| Room {
            id: RoomId::new(row.id.trim()),
            name: row.name.trim().to_string(),
            kind: row.kind.trim().to_string(),
        })
        .collect())
}

pub fn load_catalog<F, C, R>(faculty: F, courses: C, rooms: R) -> anyhow::Result<Catalog>
where
    F: AsRef<Path>,
    C: AsRef<Path>,
    R: AsRef<Path>,
{
    Ok(Catalog::new(
        load_faculty(faculty)?,
        load_courses(courses)?,
        load_rooms(rooms)?,
    ))
}

/// Export CSV de la grille: header `day_index,time_index,day,time,kind,course,faculty,room`
pub fn export_timetable_csv<P: AsRef<Path>>(path: P, timetable: &Timetable) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "day_index",
        "time_index",
        "day",
        "time",
        "kind",
        "course",
        "faculty",
        "room",
    ])?;
    let mut day_buf = itoa::Buffer::new();
    let mut time_buf = itoa::Buffer::new();
    for (time, (row, cells)) in timetable.rows.iter().zip(&timetable.cells).enumerate() {
        let label = row.label();
        for (day, cell) in cells.iter().enumerate() {
            let weekday = timetable.days.get(day).map(|d| d.to_string()).unwrap_or_default();
            let (kind, course, faculty, room) = match cell {
                Cell::Break { .. } => ("break", "", "", ""),
                Cell::Unoccupied => ("unoccupied", "", "", ""),
                Cell::Assigned(a) => (
                    "assigned",
                    a.course.as_str(),
                    a.faculty.as_str(),
                    a.room.as_str(),
                ),
            };
            w.write_record([
                day_buf.format(day),
                time_buf.format(time),
                weekday.as_str(),
                label.as_str(),
                kind,
                course,
                faculty,
                room,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
