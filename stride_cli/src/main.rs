use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stride_core::*;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Map-based workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout at a map coordinate
    Log {
        /// Latitude of the map click
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the map click
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Workout kind (running, cycling)
        #[arg(long, default_value = "running")]
        kind: String,

        /// Distance in km
        #[arg(long, allow_hyphen_values = true)]
        distance: f64,

        /// Duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: f64,

        /// Cadence in steps/min (running)
        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<f64>,

        /// Elevation gain in metres (cycling)
        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<f64>,
    },

    /// List logged workouts (default)
    List,

    /// Delete a workout by id
    Delete { id: Uuid },

    /// Re-centre the map on a workout
    Focus { id: Uuid },

    /// Clear all stored workouts
    Reset,

    /// Export the workout log to CSV
    Export {
        /// Output file (default: workouts.csv in the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

type CliApp = App<HeadlessMap, ConsoleView, JsonFileStore, FixedLocator>;

fn main() -> Result<()> {
    // Initialize logging
    stride_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    // Wire the controller to the CLI adapters: a file-backed snapshot
    // store, a headless map, and the configured fallback coordinate in
    // place of device geolocation.
    let mut app = App::new(
        HeadlessMap::new(),
        ConsoleView::new(),
        JsonFileStore::new(&data_dir),
        FixedLocator::new(config.location.coords()),
        config.map.clone(),
    );
    app.start()?;

    match cli.command {
        Some(Commands::Log {
            lat,
            lng,
            kind,
            distance,
            duration,
            cadence,
            elevation,
        }) => cmd_log(&mut app, lat, lng, &kind, distance, duration, cadence, elevation),
        Some(Commands::List) | None => cmd_list(&app),
        Some(Commands::Delete { id }) => cmd_delete(&mut app, id),
        Some(Commands::Focus { id }) => cmd_focus(&mut app, id),
        Some(Commands::Reset) => cmd_reset(&mut app),
        Some(Commands::Export { out }) => {
            let out = out.unwrap_or_else(|| data_dir.join("workouts.csv"));
            cmd_export(&app, &out)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    app: &mut CliApp,
    lat: f64,
    lng: f64,
    kind: &str,
    distance: f64,
    duration: f64,
    cadence: Option<f64>,
    elevation: Option<f64>,
) -> Result<()> {
    let kind = match kind.to_lowercase().as_str() {
        "running" | "run" => WorkoutKind::Running,
        "cycling" | "ride" => WorkoutKind::Cycling,
        other => {
            return Err(Error::Validation(format!(
                "unknown workout kind: {} (expected running or cycling)",
                other
            )))
        }
    };

    // Same event sequence a map host would produce: click, pick the
    // kind, submit the form.
    app.map_click(LatLng::new(lat, lng));
    app.toggle_kind(kind);

    let input = FormInput {
        kind,
        distance_km: Some(distance),
        duration_min: Some(duration),
        cadence,
        elevation_gain_m: elevation,
    };

    match app.submit_form(&input)? {
        Some(id) => {
            let workout = app
                .workouts()
                .iter()
                .find(|w| w.id == id)
                .expect("workout just logged");
            println!("✓ Logged workout {}", id);
            print_workout(workout);
            Ok(())
        }
        // Rejected input: the alert has already gone to stderr and the
        // store is untouched.
        None => Ok(()),
    }
}

fn cmd_list(app: &CliApp) -> Result<()> {
    if app.workouts().is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }

    for workout in app.workouts() {
        print_workout(workout);
    }
    Ok(())
}

fn cmd_delete(app: &mut CliApp, id: Uuid) -> Result<()> {
    if app.workouts().iter().all(|w| w.id != id) {
        println!("No workout with id {}", id);
        return Ok(());
    }

    app.list_click(ListClick::Delete(id))?;
    println!("✓ Deleted workout {}", id);
    Ok(())
}

fn cmd_focus(app: &mut CliApp, id: Uuid) -> Result<()> {
    if app.workouts().iter().all(|w| w.id != id) {
        println!("No workout with id {}", id);
        return Ok(());
    }

    app.list_click(ListClick::Select(id))?;
    let workout = app
        .workouts()
        .iter()
        .find(|w| w.id == id)
        .expect("workout exists");
    println!(
        "✓ Centred map on {} ({:.5}, {:.5})",
        workout.description, workout.coords.lat, workout.coords.lng
    );
    Ok(())
}

fn cmd_reset(app: &mut CliApp) -> Result<()> {
    app.reset()?;
    println!("✓ Cleared all stored workouts");
    Ok(())
}

fn cmd_export(app: &CliApp, out: &std::path::Path) -> Result<()> {
    let count = export_csv(app.workouts(), out)?;
    println!("✓ Exported {} workout(s)", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn print_workout(workout: &Workout) {
    println!("{}  [{}]", view::entry_title(workout), workout.id);
    println!("   {}", view::entry_summary(workout));
    println!(
        "   at ({:.5}, {:.5})",
        workout.coords.lat, workout.coords.lng
    );
    if workout.click_count > 0 {
        println!("   viewed {} time(s)", workout.click_count);
    }
}
