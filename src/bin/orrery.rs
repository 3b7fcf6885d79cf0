use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use hifitime::Epoch;
use nalgebra::Vector3;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use orrery::{
    bodies::BodyCatalog,
    constants::J2000_JD,
    orrery::Orrery,
    position::PositionMode,
    time::{date_to_epoch, epoch_from_julian_date, julian_date},
};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Keplerian positions of the solar-system bodies")]
struct Cli {
    /// CSV table of orbital elements replacing the built-in J2000 table
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Moment of the query, ISO 8601 (e.g. 2024-03-20T03:06:00). Defaults to J2000.0
    #[arg(long, global = true)]
    date: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bodies of the table
    Bodies,
    /// Position of every body
    Positions {
        /// Place the bodies on flat circles instead of their ellipses
        #[arg(long)]
        circular: bool,
        /// Add the position of the central body for moons
        #[arg(long)]
        heliocentric: bool,
    },
    /// Sampled orbit path of one body
    Path {
        body: String,
        /// Number of distinct points
        #[arg(long, default_value = "36")]
        samples: usize,
        /// Sample a flat circle instead of the ellipse
        #[arg(long)]
        circular: bool,
    },
    /// Periapsis and apoapsis markers of one body
    Markers { body: String },
}

fn position_mode(circular: bool) -> PositionMode {
    if circular {
        PositionMode::Circular
    } else {
        PositionMode::Elliptical
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.into_iter().map(Cell::new).collect::<Vec<_>>());
    table
}

fn vector_cells(v: &Vector3<f64>) -> Vec<Cell> {
    [v.x, v.y, v.z, v.norm()]
        .into_iter()
        .map(|c| Cell::new(format!("{c:.8}")).set_alignment(CellAlignment::Right))
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.table {
        Some(path) => {
            let catalog = BodyCatalog::from_csv_path(path)
                .with_context(|| format!("loading element table {}", path.display()))?;
            info!(
                "element table {} replaces the built-in catalog ({} bodies)",
                path.display(),
                catalog.len()
            );
            catalog
        }
        None => BodyCatalog::j2000(),
    };
    let orrery = Orrery::new(catalog);

    let moment = match &cli.date {
        Some(date) => date_to_epoch(date)?,
        None => epoch_from_julian_date(J2000_JD),
    };
    println!("Moment: {moment} (JD {:.6} TT)", julian_date(&moment));

    match cli.command {
        Commands::Bodies => print_bodies(&orrery)?,
        Commands::Positions {
            circular,
            heliocentric,
        } => print_positions(&orrery, &moment, position_mode(circular), heliocentric)?,
        Commands::Path {
            body,
            samples,
            circular,
        } => {
            let path = orrery.sample_path(&body, &moment, samples, position_mode(circular))?;
            let mut table = new_table(vec!["#", "x [AU]", "y [AU]", "z [AU]", "r [AU]"]);
            for (k, p) in path.iter().enumerate() {
                let mut cells = vec![Cell::new(k).set_alignment(CellAlignment::Right)];
                cells.extend(vector_cells(p));
                table.add_row(Row::from(cells));
            }
            println!("{table}");
        }
        Commands::Markers { body } => {
            let mut table = new_table(vec!["Marker", "x [AU]", "y [AU]", "z [AU]", "r [AU]"]);
            for (label, p) in [
                ("periapsis", orrery.periapsis_position(&body, &moment)?),
                ("apoapsis", orrery.apoapsis_position(&body, &moment)?),
            ] {
                let mut cells = vec![Cell::new(label)];
                cells.extend(vector_cells(&p));
                table.add_row(Row::from(cells));
            }
            println!("{table}");
        }
    }

    Ok(())
}

fn print_bodies(orrery: &Orrery) -> Result<()> {
    let catalog = orrery.catalog();
    let mut table = new_table(vec!["Body", "Central body", "a [AU]", "e", "i [deg]", "Period [d]"]);
    for key in catalog.keys() {
        let entry = catalog.get(key)?;
        table.add_row(Row::from(vec![
            Cell::new(&entry.name),
            Cell::new(entry.central_body.as_deref().unwrap_or("sun")),
            Cell::new(format!("{:.8}", entry.elements.semi_major_axis))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.8}", entry.elements.eccentricity))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.5}", entry.elements.inclination))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", entry.orbital_period_days()))
                .set_alignment(CellAlignment::Right),
        ]));
    }
    println!("{table}");
    Ok(())
}

fn print_positions(
    orrery: &Orrery,
    moment: &Epoch,
    mode: PositionMode,
    heliocentric: bool,
) -> Result<()> {
    let mut table = new_table(vec!["Body", "x [AU]", "y [AU]", "z [AU]", "r [AU]"]);

    for (key, position) in orrery.positions_at(moment, mode) {
        let position = if heliocentric {
            position.and_then(|_| orrery.heliocentric_position_at(&key, moment, mode))
        } else {
            position
        };

        match position {
            Ok(p) => {
                let mut cells = vec![Cell::new(&key)];
                cells.extend(vector_cells(&p));
                table.add_row(Row::from(cells));
            }
            Err(err) => warn!("skipping {key}: {err}"),
        }
    }

    println!("{table}");
    Ok(())
}
