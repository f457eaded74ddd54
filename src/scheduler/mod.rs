mod assignment;
mod conflicts;
mod periods;
mod shuffle;
mod types;
mod usage;
mod util;

pub use periods::expand_periods;
pub use shuffle::{RngShuffler, Shuffler};
pub use types::{
    Conflict, ConflictKind, GenerateOptions, Period, Placement, SchedError, UnassignedPeriod,
    UnassignedReason,
};
pub use usage::UsageTracker;

use crate::grid::WeekGrid;
use crate::model::Catalog;
use crate::timetable::{Assignment, Timetable};
use tracing::info;
use uuid::Uuid;

/// Scheduler : encapsule des données d'entrée validées et la grille hebdomadaire.
#[derive(Debug)]
pub struct Scheduler {
    catalog: Catalog,
    grid: WeekGrid,
}

impl Scheduler {
    /// Refuse de construire sur une collection vide ou des identifiants invalides.
    pub fn new(catalog: Catalog) -> Result<Self, SchedError> {
        catalog.ensure_complete()?;
        catalog.validate()?;
        Ok(Self {
            catalog,
            grid: WeekGrid::standard(),
        })
    }

    pub fn with_grid(mut self, grid: WeekGrid) -> Result<Self, SchedError> {
        grid.validate()?;
        self.grid = grid;
        Ok(self)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    pub fn expand_periods(&self) -> Vec<Period> {
        periods::expand_periods(&self.catalog.courses)
    }

    /// Génère un emploi du temps ; `opts.seed` rend le résultat reproductible.
    pub fn generate(&self, opts: GenerateOptions) -> Timetable {
        let mut shuffler = RngShuffler::from_seed_option(opts.seed);
        self.generate_with(&mut shuffler)
    }

    pub fn generate_with<S: Shuffler>(&self, shuffler: &mut S) -> Timetable {
        let run_id = Uuid::new_v4();
        let periods = self.expand_periods();
        let requested = periods.len();
        let placement = self.place_periods(periods, shuffler);
        info!(
            run = %run_id,
            requested,
            placed = placement.assignments.len(),
            unassigned = placement.unassigned.len(),
            "timetable generated"
        );
        Timetable::assemble(&self.grid, placement, run_id)
    }

    pub fn place_periods<S: Shuffler>(&self, periods: Vec<Period>, shuffler: &mut S) -> Placement {
        assignment::place_periods(self, periods, shuffler)
    }

    /// Revérifie des affectations, chacune à son `slot` enregistré.
    pub fn audit<'a, I>(&self, assignments: I) -> Vec<Conflict>
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        conflicts::audit(self, assignments.into_iter().map(|a| (a.slot, a)))
    }

    /// Revérifie un emploi du temps (ex. un fichier retouché à la main), cellule par cellule.
    pub fn audit_timetable(&self, timetable: &Timetable) -> Vec<Conflict> {
        conflicts::audit_timetable(self, timetable)
    }
}
