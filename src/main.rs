use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use egui::Vec2;
use parcferme::catalog::{BundledCatalogSupplier, CatalogSupplier, JsonCatalogSupplier};
use parcferme::errors::ParcFermeError;
use parcferme::lineup::RosterLayout;
use parcferme::team::{FileTeamStore, SessionContext};
use parcferme::ui::TeamPickerApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the team picker window
    Pick {
        /// Name of the team to open
        #[arg(short, long, default_value = "My Team")]
        team: String,

        /// Season catalog JSON file; the bundled catalog is used when omitted
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Create the team if no saved team exists yet
        #[arg(long, default_value_t = false)]
        create_team: bool,

        /// Behave as a signed-out user (identity is an external concern,
        /// this flag only exercises the launch gate)
        #[arg(long, default_value_t = false)]
        signed_out: bool,
    },
    /// Print the season catalog
    Catalog {
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Delete a saved team
    Reset {
        #[arg(short, long)]
        team: String,
    },
}

fn supplier_for(catalog: Option<PathBuf>) -> Box<dyn CatalogSupplier> {
    match catalog {
        Some(path) => Box::new(JsonCatalogSupplier::new(path)),
        None => Box::new(BundledCatalogSupplier),
    }
}

fn pick(
    team: String,
    catalog: Option<PathBuf>,
    create_team: bool,
    signed_out: bool,
) -> Result<(), ParcFermeError> {
    let layout = RosterLayout::default();
    let storage_path = FileTeamStore::default_storage_path()?;

    let session = SessionContext {
        authenticated: !signed_out,
        has_team: create_team || FileTeamStore::team_exists(&storage_path, &team),
    };
    session.ensure_can_pick()?;

    let store = Arc::new(FileTeamStore::new(
        storage_path,
        &team,
        layout.slot_count(),
    )?);
    let supplier = supplier_for(catalog);

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(780., 640.))
        .with_min_inner_size(Vec2::new(520., 400.));

    eframe::run_native(
        "Parc Fermé",
        native_options,
        Box::new(|cc| Ok(Box::new(TeamPickerApp::new(supplier, store, layout, cc)))),
    )
    .expect("could not start app");
    Ok(())
}

fn print_catalog(catalog: Option<PathBuf>) -> Result<(), ParcFermeError> {
    let catalog = supplier_for(catalog).fetch_catalog()?;
    println!("Season {} catalog, {} entries", catalog.season, catalog.len());
    for entry in catalog.entries() {
        println!(
            "  [{:>3}] {:<10} {:<24} {:>2}  {:>5.1}M  {:>5.0} pts",
            entry.id(),
            entry.role().to_string(),
            entry.display_name(),
            entry.country(),
            entry.price(),
            entry.points()
        );
    }
    Ok(())
}

fn reset(team: &str) -> Result<(), ParcFermeError> {
    let storage_path = FileTeamStore::default_storage_path()?;
    FileTeamStore::delete_team(&storage_path, team)?;
    println!("Deleted team {team}");
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");
    let run = match cli.command {
        Commands::Pick {
            team,
            catalog,
            create_team,
            signed_out,
        } => pick(team, catalog, create_team, signed_out),
        Commands::Catalog { catalog } => print_catalog(catalog),
        Commands::Reset { team } => reset(&team),
    };
    if let Err(e) = run {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
