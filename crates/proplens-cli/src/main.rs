//! proplens-cli - Collects, describes and prints the demo fleet
//!
//! This binary runs the full pipeline twice: once as a declared-only
//! recursive collect of the `Garage` family, once as bound collects of
//! live fleet instances. It finishes with a canonical-path lookup.

use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use proplens::{
    apply_descriptions, apply_descriptions_file, collect_bound, collect_type, report,
    CollectOptions, PathStyle, PropertyMap,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod demo;

#[derive(Parser, Debug)]
#[command(name = "proplens-cli")]
#[command(about = "Collect, describe and print properties of the demo fleet")]
struct Cli {
    /// Path to a declaration file (defaults to the built-in fleet source)
    #[arg(long)]
    declarations: Option<PathBuf>,

    /// Directory to write properties.csv into
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Canonical path to look up after the bound collect
    #[arg(long)]
    lookup: Option<String>,

    /// Drop declaring-type prefixes from canonical paths
    #[arg(long)]
    bare_paths: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proplens=info,proplens_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("Collecting declared properties of the garage");
    let declared = match collect_declared(&cli) {
        Ok(map) => map,
        Err(e) => {
            error!("Failed to collect declared properties: {}", e);
            std::process::exit(1);
        }
    };
    print_rows(&declared);

    if let Some(dir) = &cli.csv_dir {
        match report::write_csv_file(&declared, dir) {
            Ok(path) => info!("Wrote {}", path.display()),
            Err(e) => {
                error!("Failed to write csv: {}", e);
                std::process::exit(1);
            }
        }
    }

    info!("Collecting bound properties of the fleet");
    let fleet = match collect_fleet(&cli) {
        Ok(map) => map,
        Err(e) => {
            error!("Failed to collect fleet properties: {}", e);
            std::process::exit(1);
        }
    };
    print_rows(&fleet);

    let path = cli.lookup.clone().unwrap_or_else(|| default_lookup(&cli));
    match fleet.lookup(&path) {
        Ok(property) => {
            let value = property.value().map(|v| v.to_string()).unwrap_or_default();
            println!("{} {}", property.name(), value);
        }
        Err(e) => {
            error!("Lookup failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn options(cli: &Cli) -> CollectOptions {
    CollectOptions {
        path_style: if cli.bare_paths {
            PathStyle::Bare
        } else {
            PathStyle::Qualified
        },
        ..CollectOptions::default()
    }
}

/// Recursive declared-only collect of the whole family, descriptions
/// applied from the file named on the command line or the built-in source.
fn collect_declared(cli: &Cli) -> proplens::Result<PropertyMap> {
    let mut options = options(cli);
    options.nested = true;
    options.declarations = cli.declarations.clone();

    let mut map = PropertyMap::new();
    collect_type::<demo::Garage>(&mut map, &options)?;
    if cli.declarations.is_none() {
        let matched = apply_descriptions(&mut map, demo::FLEET_DECL)?;
        info!(matched, "Descriptions attached");
    }
    Ok(map)
}

/// Flat bound collects of one instance per fleet type, merged into a
/// single map, then described.
fn collect_fleet(cli: &Cli) -> proplens::Result<PropertyMap> {
    let options = options(cli);

    let mut map = PropertyMap::new();
    collect_bound::<demo::Car>(
        &mut map,
        Rc::new(demo::Car {
            make: "Aurora".to_string(),
            top_speed: 210,
            electric: true,
        }),
        &options,
    )?;
    collect_bound::<demo::Interior>(
        &mut map,
        Rc::new(demo::Interior {
            seats: 5,
            airbags: 6,
        }),
        &options,
    )?;
    collect_bound::<demo::Exterior>(&mut map, Rc::new(demo::Exterior { doors: 4 }), &options)?;

    let matched = match &cli.declarations {
        Some(path) => apply_descriptions_file(&mut map, path)?,
        None => apply_descriptions(&mut map, demo::FLEET_DECL)?,
    };
    info!(matched, "Descriptions attached");
    Ok(map)
}

fn default_lookup(cli: &Cli) -> String {
    if cli.bare_paths {
        "Interior.seats".to_string()
    } else {
        "Garage.Car.Interior.seats".to_string()
    }
}

fn print_rows(map: &PropertyMap) {
    let stdout = io::stdout();
    if let Err(e) = report::render_rows(map, &mut stdout.lock()) {
        error!("Failed to print properties: {}", e);
        std::process::exit(1);
    }
}
