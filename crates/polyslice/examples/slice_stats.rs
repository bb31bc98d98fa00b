//! Slice a rectangle a few times and print per-polygon counts and areas.
//!
//! Usage:
//!   cargo run -p polyslice --example slice_stats -- 25
//!   cargo run -p polyslice --example slice_stats -- 25 displace
//!
//! Prints one line per polygon (sides, area, centroid) and the area check.

use polyslice::api::polygon_views;
use polyslice::{SliceCfg, Slicer};

fn main() {
    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(12);
    let displace = args.next().as_deref() == Some("displace");

    let mut slicer = Slicer::seeded(16.0, 9.0, SliceCfg::default(), 2025).unwrap();
    if let Err(e) = slicer.slice_many(count, displace) {
        eprintln!("slicing failed: {e}");
        return;
    }
    let mesh = slicer.mesh();
    for v in polygon_views(mesh) {
        let c = v.centroid.unwrap_or_else(polyslice::Vec2::zeros);
        println!(
            "poly {:>3}: sides={:>2} area={:>8.3} centroid=({:.2}, {:.2})",
            v.id.0,
            v.points.len(),
            v.area,
            c.x,
            c.y
        );
    }
    println!(
        "polygons={} vertices={} edges={} total_area={:.6} invariants={}",
        mesh.polygons().len(),
        mesh.vertices().len(),
        mesh.edges().len(),
        mesh.total_area(),
        if mesh.check_invariants().is_ok() { "ok" } else { "BROKEN" }
    );
}
