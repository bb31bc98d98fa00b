use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use polyslice::{SliceCfg, Slicer};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;

#[derive(Parser)]
#[command(name = "polyslice-cli")]
#[command(about = "Slice a rectangle into a random polygon mesh and export it")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Slice a fresh rectangle and write the mesh (plus optional table)
    Run(RunArgs),
    /// Print a small provenance JSON block, optionally summarising a mesh file
    Report {
        #[arg(long)]
        mesh: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    /// Number of cuts
    #[arg(long, default_value_t = 50)]
    slices: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 2.0)]
    area_fuzz: f64,
    #[arg(long, default_value_t = 2.0)]
    length_fuzz: f64,
    /// Width of the cut-point window around each side's midpoint, in [0, 1)
    #[arg(long, default_value_t = 0.5)]
    jitter: f64,
    /// Push new midpoints off straight lines into the neighbouring polygons
    #[arg(long)]
    displace: bool,
    #[arg(long)]
    out: PathBuf,
    /// Optional per-polygon table (.csv or .parquet)
    #[arg(long)]
    table: Option<PathBuf>,
}

impl RunArgs {
    fn cfg(&self) -> SliceCfg {
        SliceCfg {
            area_fuzz: self.area_fuzz,
            length_fuzz: self.length_fuzz,
            midpoint_jitter: self.jitter,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => run(&args),
        Action::Report { mesh } => report(mesh),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    ensure!(
        args.width.is_finite() && args.width > 0.0 && args.height.is_finite() && args.height > 0.0,
        "viewport must be positive and finite, got {} x {}",
        args.width,
        args.height
    );
    tracing::info!(
        width = args.width,
        height = args.height,
        slices = args.slices,
        seed = args.seed,
        displace = args.displace,
        "run"
    );

    let mut slicer = Slicer::seeded(args.width, args.height, args.cfg(), args.seed)
        .context("building slicer")?;
    slicer
        .slice_many(args.slices, args.displace)
        .context("slicing")?;
    let mesh = slicer.into_mesh();
    mesh.check_invariants().context("mesh check after slicing")?;

    let doc = export::MeshDoc::from_mesh(&mesh);
    tracing::info!(
        polygons = doc.polygons.len(),
        vertices = doc.vertices.len(),
        area = doc.total_area(),
        "mesh built"
    );
    export::write_json(&args.out, &doc)?;

    let mut payload = provenance::Payload::new(serde_json::json!({
        "width": args.width,
        "height": args.height,
        "slices": args.slices,
        "seed": args.seed,
        "area_fuzz": args.area_fuzz,
        "length_fuzz": args.length_fuzz,
        "jitter": args.jitter,
        "displace": args.displace,
    }));
    if let Some(table) = &args.table {
        export::write_table(table, &doc)?;
        payload.extra_outputs.push(table.clone());
    }
    let prov = provenance::write_sidecar(&args.out, payload)?;
    tracing::info!(out = %args.out.display(), provenance = %prov.display(), "done");
    Ok(())
}

fn report(mesh: Option<PathBuf>) -> Result<()> {
    let mut obj = provenance::header();
    obj["defaults"] = serde_json::json!({
        "area_fuzz": SliceCfg::default().area_fuzz,
        "length_fuzz": SliceCfg::default().length_fuzz,
        "jitter": SliceCfg::default().midpoint_jitter,
    });
    if let Some(path) = mesh {
        let doc = export::read_json(&path)?;
        obj["mesh"] = serde_json::json!({
            "path": path.to_string_lossy(),
            "polygons": doc.polygons.len(),
            "vertices": doc.vertices.len(),
            "total_area": doc.total_area(),
        });
    }
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
