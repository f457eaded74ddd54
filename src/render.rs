use crate::timetable::{Cell, Timetable};

/// Permet de customiser le rendu d'une cellule (texte, HTML, etc.).
pub trait CellRenderer {
    fn render(&self, cell: &Cell) -> String;
}

/// Rendu texte simple : pauses, "Library" pour une cellule libre,
/// sinon `cours / enseignant / salle`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCell;

impl CellRenderer for TextCell {
    fn render(&self, cell: &Cell) -> String {
        match cell {
            Cell::Break { pause } => pause.to_string(),
            Cell::Unoccupied => "Library".to_string(),
            Cell::Assigned(a) => format!(
                "{course} / {faculty} / {room}",
                course = a.course_name,
                faculty = a.faculty_name,
                room = a.room_name
            ),
        }
    }
}

/// Une ligne d'en-tête puis une ligne par tranche horaire, colonnes séparées par ` | `.
pub fn render_grid(timetable: &Timetable, renderer: &dyn CellRenderer) -> String {
    let mut out = String::from("Time");
    for day in &timetable.days {
        out.push_str(" | ");
        out.push_str(&day.to_string());
    }
    out.push('\n');

    for (row, cells) in timetable.rows.iter().zip(&timetable.cells) {
        out.push_str(&row.label());
        for cell in cells {
            out.push_str(" | ");
            out.push_str(&renderer.render(cell));
        }
        out.push('\n');
    }
    out
}
