use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hole_placer::config::{resolve_config, HoleConfig, DEFAULT_COMPANION_SUFFIX, DEFAULT_FAMILY_NAME};
use hole_placer::export::{export_csv, export_json, PlacementRecord, PlacementReport};
use hole_placer::geometry::WallIndex;
use hole_placer::parser::parse_scene_file;
use hole_placer::pipeline::{apply_plan, HostLookup, InstanceLog, Pipeline};
use hole_placer::ui::App;

#[derive(Parser, Debug)]
#[command(name = "hole-placer")]
#[command(about = "Hole Placer - place wall openings where ducts and pipes cross walls")]
#[command(version)]
struct Args {
    /// Path to the scene file (JSON snapshot of the open documents)
    #[arg(required = true)]
    scene: PathBuf,

    /// Export to CSV (optional output path)
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export to JSON (optional output path)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Title suffix of the mechanical companion model
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_COMPANION_SUFFIX)]
    suffix: String,

    /// Family name of the opening marker in the host model
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FAMILY_NAME)]
    family: String,

    /// Plan elements in parallel (instances are still created one at a time)
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let session = parse_scene_file(&args.scene)?;
    let config = HoleConfig {
        companion_suffix: args.suffix,
        family_name: args.family,
        ..HoleConfig::default()
    };
    let resolved = resolve_config(&session, &config)?;

    let index = WallIndex::new(&resolved.host.walls);
    let lookup = HostLookup::new(resolved.host);
    let pipeline = Pipeline::new(&index, &lookup);

    tracing::info!(
        walls = index.len(),
        ducts = resolved.companion.ducts.len(),
        pipes = resolved.companion.pipes.len(),
        parallel = args.parallel,
        "Starting opening placement"
    );

    let curves = resolved.companion.linear_curves();
    let plan = if args.parallel {
        pipeline.plan_parallel(curves)
    } else {
        pipeline.plan(curves)
    };

    let mut log = InstanceLog::new(&config.width_parameter, &config.height_parameter);
    let applied = apply_plan(&plan, resolved.symbol, &mut log);
    let summary = applied.report;

    let report = PlacementReport {
        host: resolved.host.title.clone(),
        companion: resolved.companion.title.clone(),
        view: resolved.view.name.clone(),
        summary,
        placements: PlacementRecord::collect(&applied.created, resolved.host),
    };

    if let Some(csv_path) = &args.csv {
        export_csv(&report.placements, csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&report, json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if args.csv.is_some() || args.json.is_some() {
        println!("{summary}");
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(report, resolved.host.levels.clone()).run(terminal);
    ratatui::restore();
    println!("{summary}");
    result
}
