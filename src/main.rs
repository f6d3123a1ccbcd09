//! panel-nest - CLI tool to plan panel cutting layouts.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use panel_nest::{
    generate_dxf, generate_json, generate_report, parse_job_file, plan_job, OversizePolicy,
    SelectionMode,
};

/// Plan cutting layouts of wood panels on 3x6, 4x8 or custom stock sheets.
#[derive(Parser, Debug)]
#[command(name = "panel-nest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input job file path
    #[arg(short, long)]
    input: PathBuf,

    /// Write the report (or JSON) to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory to write one DXF drawing per sheet into
    #[arg(long)]
    dxf: Option<PathBuf>,

    /// Stock selection: "auto" or a stock label (overrides the job file)
    #[arg(short, long)]
    mode: Option<String>,

    /// Blade kerf in mm (overrides the job file)
    #[arg(short, long)]
    kerf: Option<f64>,

    /// Material name (overrides the job file)
    #[arg(long)]
    material: Option<String>,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output the plan as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Processing: {}", args.input.display());

    let mut job = parse_job_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    if let Some(mode) = &args.mode {
        job.config.mode = SelectionMode::from_mode_str(mode);
    }
    if let Some(kerf) = args.kerf {
        job.config.kerf = kerf;
    }
    if let Some(material) = &args.material {
        job.material = Some(material.clone());
    }

    info!(
        "{} part row(s), {} part(s), mode {}",
        job.parts.len(),
        job.part_count(),
        job.config.mode
    );

    let plan = plan_job(&job).context("Failed to plan cutting layout")?;

    for err in &plan.validation.errors {
        error!("{}", err);
    }

    if !plan.validation.passed {
        if args.validate || job.config.oversize_policy != OversizePolicy::Allow {
            anyhow::bail!("Validation failed");
        }
        warn!("Layout contains parts larger than the sheet");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let rendered = if args.json {
        generate_json(&plan)?
    } else {
        generate_report(&plan)
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if let Some(dir) = &args.dxf {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for (id, drawing) in generate_dxf(&plan.selection.layout) {
            let path = dir.join(format!("sheet-{:02}.dxf", id));
            std::fs::write(&path, drawing)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
    }

    Ok(())
}
