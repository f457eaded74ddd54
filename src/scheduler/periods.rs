use super::types::Period;
use crate::model::Course;

/// Une période par crédit, groupées par cours dans l'ordre d'entrée.
pub fn expand_periods(courses: &[Course]) -> Vec<Period> {
    courses
        .iter()
        .flat_map(|course| {
            (0..course.credits).map(move |ordinal| Period {
                course: course.code.clone(),
                ordinal,
            })
        })
        .collect()
}
