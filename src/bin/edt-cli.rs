#![forbid(unsafe_code)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use edt::{
    grid::{load_grid_from_file, WeekGrid},
    io,
    render::{render_grid, TextCell},
    scheduler::{ConflictKind, GenerateOptions, Scheduler},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de génération d'emploi du temps
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un emploi du temps
    Generate {
        /// Enseignants (JSON ou CSV)
        #[arg(long)]
        faculty: String,
        /// Cours (JSON ou CSV)
        #[arg(long)]
        courses: String,
        /// Salles (JSON ou CSV)
        #[arg(long)]
        rooms: String,
        /// Graine pour un résultat reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Grille JSON (jours + lignes horaires) ; grille standard sinon
        #[arg(long)]
        grid: Option<String>,
    },

    /// Vérifier les conflits d'un emploi du temps JSON
    Check {
        #[arg(long)]
        timetable: String,
        #[arg(long)]
        faculty: String,
        #[arg(long)]
        courses: String,
        #[arg(long)]
        rooms: String,
    },

    /// Afficher un emploi du temps JSON
    Show {
        #[arg(long)]
        timetable: String,
    },

    /// Lister les créneaux de la grille
    Grid {
        /// Grille JSON ; grille standard sinon
        #[arg(long)]
        grid: Option<String>,
    },
}

fn load_grid(path: Option<String>) -> Result<WeekGrid> {
    match path {
        Some(path) => load_grid_from_file(path),
        None => Ok(WeekGrid::standard()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            faculty,
            courses,
            rooms,
            seed,
            out_json,
            out_csv,
            grid,
        } => {
            let grid = load_grid(grid)?;
            let catalog = io::load_catalog(faculty, courses, rooms)?;
            let scheduler = Scheduler::new(catalog)?.with_grid(grid)?;
            let timetable = scheduler.generate(GenerateOptions { seed });

            if let Some(path) = out_json {
                JsonStorage::open(path).save(&timetable)?;
            }
            if let Some(path) = out_csv {
                io::export_timetable_csv(path, &timetable)?;
            }
            print!("{}", render_grid(&timetable, &TextCell));

            let requested = scheduler.catalog().total_credits();
            println!(
                "{} of {} period(s) placed",
                timetable.assigned_count(),
                requested
            );
            if timetable.is_complete() {
                0
            } else {
                eprintln!("{} period(s) left unassigned", timetable.unassigned.len());
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Check {
            timetable,
            faculty,
            courses,
            rooms,
        } => {
            let timetable = JsonStorage::open(timetable).load()?;
            let catalog = io::load_catalog(faculty, courses, rooms)?;
            let scheduler = Scheduler::new(catalog)?.with_grid(WeekGrid {
                days: timetable.days.clone(),
                rows: timetable.rows.clone(),
            })?;
            let conflicts = scheduler.audit_timetable(&timetable);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    let kind = match c.kind {
                        ConflictKind::FacultyDoubleBooked => "faculty double-booked",
                        ConflictKind::RoomDoubleBooked => "room double-booked",
                        ConflictKind::ExpertiseMismatch => "expertise",
                        ConflictKind::Unavailable => "unavailable",
                        ConflictKind::RoomTypeMismatch => "room type",
                        ConflictKind::BreakOccupied => "break",
                        ConflictKind::SlotMismatch => "slot mismatch",
                        ConflictKind::UnknownReference => "unknown reference",
                    };
                    eprintln!(
                        "{} {} | {} | {}",
                        c.slot.weekday,
                        timetable
                            .rows
                            .get(c.slot.time)
                            .map(|r| r.label())
                            .unwrap_or_default(),
                        kind,
                        c.subject
                    );
                }
                2
            }
        }
        Commands::Show { timetable } => {
            let timetable = JsonStorage::open(timetable).load()?;
            print!("{}", render_grid(&timetable, &TextCell));
            0
        }
        Commands::Grid { grid } => {
            let grid = load_grid(grid)?;
            for slot in grid.slots() {
                let row = &grid.rows[slot.time];
                let kind = row
                    .pause
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "assignable".to_string());
                println!("{} | {} | {}", slot.weekday, row.label(), kind);
            }
            0
        }
    };

    std::process::exit(code);
}
