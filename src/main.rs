use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use skicam::assign::{assign_regions, load_regions};
use skicam::audit::audit_assets;
use skicam::catalog::{discover_regions, run_batch, summarize, write_catalog};
use skicam::config::FileConfig;
use skicam::passes::{PassTable, apply_passes};
use skicam::resorts;

/// Compute initial 3D map camera poses from ski piste geometry
///
/// Examples:
///   # Compute camera poses for every resort with piste data
///   skicam compute -d public/data/pistes -o public/data/camera-angles.json
///
///   # Check asset flags against the files on disk
///   skicam audit --resorts assets/resorts.json
///
///   # Re-stamp pass affiliations from a TOML table
///   skicam passes --table assets/passes.toml
///
///   # Assign region ids by bounding-box containment
///   skicam assign-regions --regions assets/regions.json
#[derive(Parser, Debug)]
#[command(name = "skicam")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches skicam.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a camera pose for every region with usable piste geometry
    Compute {
        /// Directory of per-resort <slug>.geojson files
        #[arg(short = 'd', long)]
        pistes_dir: Option<PathBuf>,

        /// Output path for the camera-angle catalog JSON
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Process regions one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
    /// Verify that resort asset flags match the files on disk
    Audit {
        /// Path to resorts.json
        #[arg(long)]
        resorts: Option<PathBuf>,

        /// Directory of per-resort <slug>.geojson files
        #[arg(short = 'd', long)]
        pistes_dir: Option<PathBuf>,
    },
    /// Update resort pass affiliations from a TOML table
    Passes {
        /// Path to resorts.json (rewritten in place)
        #[arg(long)]
        resorts: Option<PathBuf>,

        /// Path to the pass affiliation table
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Assign region ids to resorts by bounding-box containment
    AssignRegions {
        /// Path to resorts.json (rewritten in place)
        #[arg(long)]
        resorts: Option<PathBuf>,

        /// Path to regions.json
        #[arg(long)]
        regions: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_default();

    let verbose = args.verbose || file_config.verbose;

    match args.command {
        Command::Compute {
            pistes_dir,
            output,
            sequential,
        } => {
            let pistes_dir = pistes_dir
                .or(file_config.pistes_dir)
                .unwrap_or_else(|| PathBuf::from("public/data/pistes"));
            let output = output
                .or(file_config.output)
                .unwrap_or_else(|| PathBuf::from("public/data/camera-angles.json"));
            let parallel = !(sequential || file_config.sequential);
            run_compute(&pistes_dir, &output, parallel, verbose)
        }
        Command::Audit {
            resorts,
            pistes_dir,
        } => {
            let resorts = resorts
                .or(file_config.resorts)
                .unwrap_or_else(|| PathBuf::from("assets/resorts.json"));
            let pistes_dir = pistes_dir
                .or(file_config.pistes_dir)
                .unwrap_or_else(|| PathBuf::from("public/data/pistes"));
            run_audit(&resorts, &pistes_dir)
        }
        Command::Passes { resorts, table } => {
            let resorts = resorts
                .or(file_config.resorts)
                .unwrap_or_else(|| PathBuf::from("assets/resorts.json"));
            let table = table
                .or(file_config.pass_table)
                .unwrap_or_else(|| PathBuf::from("assets/passes.toml"));
            run_passes(&resorts, &table, verbose)
        }
        Command::AssignRegions { resorts, regions } => {
            let resorts = resorts
                .or(file_config.resorts)
                .unwrap_or_else(|| PathBuf::from("assets/resorts.json"));
            let regions = regions
                .or(file_config.regions)
                .unwrap_or_else(|| PathBuf::from("assets/regions.json"));
            run_assign(&resorts, &regions)
        }
    }
}

fn run_compute(
    pistes_dir: &std::path::Path,
    output: &std::path::Path,
    parallel: bool,
    verbose: bool,
) -> Result<()> {
    let total_start = Instant::now();

    println!("skicam - Camera Pose Catalog");
    println!("============================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Pistes dir: {}", pistes_dir.display());
        println!("  Output: {}", output.display());
        println!(
            "  Mode: {}",
            if parallel { "parallel" } else { "sequential" }
        );
        println!();
    }

    let spinner = create_spinner("Discovering piste files...");
    let start = Instant::now();
    let regions = discover_regions(pistes_dir)?;
    let total = regions.len();
    spinner.finish_with_message(format!(
        "Found {} piste files [{:.1}s]",
        total,
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Computing camera poses...");
    let start = Instant::now();
    let outcome = run_batch(regions, parallel)?;
    spinner.finish_with_message(format!(
        "Computed poses for {}/{} resorts ({} skipped) [{:.1}s]",
        outcome.catalog.len(),
        total,
        outcome.skipped,
        start.elapsed().as_secs_f32()
    ));

    write_catalog(output, &outcome.catalog)?;

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output.display());

    if let Some(summary) = summarize(&outcome.catalog) {
        println!();
        println!("Zoom range: {}-{}", summary.zoom.0, summary.zoom.1);
        println!("Pitch range: {}-{}", summary.pitch.0, summary.pitch.1);
        println!("Bearing range: {}-{}", summary.bearing.0, summary.bearing.1);
    }

    Ok(())
}

fn run_audit(resorts_path: &std::path::Path, pistes_dir: &std::path::Path) -> Result<()> {
    let resorts = resorts::load(resorts_path)?;
    let report = audit_assets(&resorts, pistes_dir);

    if report.is_clean() {
        println!("All asset flags match actual files.");
        return Ok(());
    }

    println!("{} issue(s) found:", report.issues.len());
    for issue in &report.issues {
        println!("  - {}", issue);
    }
    bail!("{} asset flag issue(s)", report.issues.len());
}

fn run_passes(resorts_path: &std::path::Path, table_path: &std::path::Path, verbose: bool) -> Result<()> {
    let table = PassTable::load(table_path)?;
    let mut resorts = resorts::load(resorts_path)?;

    let update = apply_passes(&mut resorts, &table);
    resorts::save(resorts_path, &resorts)?;

    for (label, count) in &update.updated {
        println!("Updated {} resorts to {}", count, label);
    }
    println!();
    println!("Pass distribution:");
    for (label, count) in &update.distribution {
        println!("  {:4}  {}", count, label);
    }

    if verbose {
        println!();
        for rule in &table.rules {
            let names: Vec<&str> = resorts
                .features
                .iter()
                .filter(|f| f.pass() == Some(rule.label.as_str()))
                .filter_map(|f| f.name())
                .collect();
            println!("{} resorts ({}):", rule.label, names.len());
            for name in names {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

fn run_assign(resorts_path: &std::path::Path, regions_path: &std::path::Path) -> Result<()> {
    let regions = load_regions(regions_path)?;
    let mut resorts = resorts::load(resorts_path)?;

    let outcome = assign_regions(&mut resorts, &regions);
    resorts::save(resorts_path, &resorts)?;

    println!(
        "Assigned: {}, Unassigned: {}",
        outcome.assigned, outcome.unassigned
    );
    for (region_id, count) in &outcome.distribution {
        println!("  {:4}  {}", count, region_id);
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
