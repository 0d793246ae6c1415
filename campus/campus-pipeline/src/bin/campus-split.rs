//! Split a merged campus mesh into buildings and join them to a
//! footprint dataset.
//!
//! ```text
//! campus-split campus.json --geo buildings.geojson --epsilon 4
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use campus_pipeline::load::{read_dataset, read_scene};
use campus_pipeline::{CampusSplit, PipelineConfig, PipelineContext, load_inputs};
use clap::Parser;
use mesh_split::AdjacencyStrategy;
use mesh_types::Point2;

/// Split a merged campus mesh into per-building meshes
#[derive(Parser)]
#[command(name = "campus-split")]
#[command(about = "Split a merged campus mesh into buildings", long_about = None)]
#[command(version)]
struct Cli {
    /// Mesh dump: {"positions": [...], "indices": [...]} or a scene tree
    #[arg(name = "MESH")]
    mesh: PathBuf,

    /// GeoJSON building footprints
    #[arg(long)]
    geo: Option<PathBuf>,

    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Adjacency distance in model units
    #[arg(long)]
    epsilon: Option<f64>,

    /// Compare every triangle pair instead of using the spatial grid
    #[arg(long)]
    brute_force: bool,

    /// Model-to-geographic scale
    #[arg(long)]
    scale: Option<f64>,

    /// Model-to-geographic offset (x, y)
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_hyphen_values = true)]
    offset: Option<Vec<f64>>,

    /// Tint buildings by match outcome
    #[arg(long)]
    debug_view: bool,

    /// Print diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Report the building whose footprint covers this geographic point
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_hyphen_values = true)]
    at: Option<Vec<f64>>,
}

impl Cli {
    fn config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(epsilon) = self.epsilon {
            config.cluster.epsilon = epsilon;
        }
        if self.brute_force {
            config.cluster.strategy = AdjacencyStrategy::BruteForce;
        }
        if let Some(scale) = self.scale {
            config.transform.scale = scale;
        }
        if let Some(&[x, y]) = self.offset.as_deref() {
            config.transform.offset = Some([x, y]);
        }
        config.debug_view |= self.debug_view;

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.config()?;

    let (scene, dataset) = load_inputs(
        || read_scene(&cli.mesh),
        || read_dataset(cli.geo.as_deref()),
    );
    let scene = scene.with_context(|| format!("reading mesh {}", cli.mesh.display()))?;

    let ctx = PipelineContext::new(config, dataset)?;
    let out = ctx.run_scene(&scene).context("splitting mesh")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&out.diagnostics)?);
    } else {
        print_summary(&out);
    }

    if let Some(&[x, y]) = cli.at.as_deref() {
        let geo = Point2::new(x, y);
        match out.building_at_geo(&geo) {
            Some(building) => println!("({x}, {y}): {} {}", building.name, building.label()),
            None => println!("({x}, {y}): no building"),
        }
    }

    Ok(())
}

fn print_summary(out: &CampusSplit) {
    println!("{}", out.diagnostics);
    println!();
    for building in &out.buildings {
        let key = building
            .debug
            .and_then(|d| d.key)
            .map_or_else(|| "-".to_string(), |k| k.to_string());
        println!(
            "{:<14} {:>6} tris  key {:<20} {}",
            building.name,
            building.triangle_count(),
            key,
            if building.is_matched() { building.label() } else { "(unmatched)" }
        );
    }
}
