use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polyslice::api::{polygon_views, PolygonView};
use polyslice::Mesh;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

/// JSON shape of an exported mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDoc {
    pub viewport: ViewportDoc,
    pub vertices: Vec<[f64; 2]>,
    pub polygons: Vec<PolygonDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportDoc {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonDoc {
    pub id: usize,
    pub vertex_ids: Vec<usize>,
    pub area: f64,
    pub centroid: Option<[f64; 2]>,
    pub boundary_sides: usize,
}

impl MeshDoc {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let vp = mesh.viewport();
        Self {
            viewport: ViewportDoc {
                min: [vp.min.x, vp.min.y],
                max: [vp.max.x, vp.max.y],
            },
            vertices: mesh.vertices().iter().map(|v| [v.x, v.y]).collect(),
            polygons: polygon_views(mesh).iter().map(PolygonDoc::from_view).collect(),
        }
    }

    pub fn total_area(&self) -> f64 {
        self.polygons.iter().map(|p| p.area).sum()
    }
}

impl PolygonDoc {
    fn from_view(v: &PolygonView) -> Self {
        Self {
            id: v.id.0,
            vertex_ids: v.vertex_ids.clone(),
            area: v.area,
            centroid: v.centroid.map(|c| [c.x, c.y]),
            boundary_sides: v.boundary_sides,
        }
    }
}

pub fn write_json<P: AsRef<Path>>(path: P, doc: &MeshDoc) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

pub fn read_json<P: AsRef<Path>>(path: P) -> Result<MeshDoc> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// One row per polygon.
pub fn polygon_table(doc: &MeshDoc) -> PolarsResult<DataFrame> {
    let polys = &doc.polygons;
    let id: Vec<u32> = polys.iter().map(|p| p.id as u32).collect();
    let sides: Vec<u32> = polys.iter().map(|p| p.vertex_ids.len() as u32).collect();
    let area: Vec<f64> = polys.iter().map(|p| p.area).collect();
    let cx: Vec<Option<f64>> = polys.iter().map(|p| p.centroid.map(|c| c[0])).collect();
    let cy: Vec<Option<f64>> = polys.iter().map(|p| p.centroid.map(|c| c[1])).collect();
    let boundary: Vec<u32> = polys.iter().map(|p| p.boundary_sides as u32).collect();
    df!(
        "poly" => id,
        "sides" => sides,
        "area" => area,
        "cx" => cx,
        "cy" => cy,
        "boundary_sides" => boundary
    )
}

/// Write the polygon table as CSV or Parquet, chosen by extension.
pub fn write_table<P: AsRef<Path>>(path: P, doc: &MeshDoc) -> Result<()> {
    let path = path.as_ref();
    let mut df = polygon_table(doc)?;
    ensure_parent(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "csv" => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file).finish(&mut df)?;
        }
        "parquet" => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
        other => bail!("unsupported table extension {other:?}, expected csv or parquet"),
    }
    tracing::info!(rows = df.height(), path = %path.display(), "table written");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}
