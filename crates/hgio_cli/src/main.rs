//! Command-line geometry inspector.
//!
//! Runs the import pipeline over a JSON interchange file and prints a
//! summary of the resulting artifact. Useful for eyeballing what a host
//! application would receive.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use hgio_core::{
    import_geometry, Artifact, AttribDomain, ImportOptions, JsonCodec, Spline, TargetKind,
};

struct Args {
    path: PathBuf,
    target: TargetKind,
    options: ImportOptions,
}

fn parse_args() -> Result<Args> {
    let mut path = None;
    let mut target = TargetKind::Mesh;
    let mut options = ImportOptions::default();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--curve" => target = TargetKind::Curve,
            "--mesh" => target = TargetKind::Mesh,
            "--skip-normals" => options.skip_normals = true,
            "--help" | "-h" => {
                println!("usage: hgio [--mesh|--curve] [--skip-normals] <geometry.json>");
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown flag: {}", other),
            other => path = Some(PathBuf::from(other)),
        }
    }

    let Some(path) = path else {
        bail!("usage: hgio [--mesh|--curve] [--skip-normals] <geometry.json>");
    };

    Ok(Args {
        path,
        target,
        options,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    log::debug!(
        "importing {} as {:?} (skip_normals: {})",
        args.path.display(),
        args.target,
        args.options.skip_normals
    );

    let artifact = import_geometry(&JsonCodec, &args.path, args.target, &args.options)
        .with_context(|| format!("importing {}", args.path.display()))?;

    match artifact {
        Artifact::Mesh(mesh) => {
            println!(
                "mesh: {} points, {} loops, {} polygons",
                mesh.point_count(),
                mesh.loop_count(),
                mesh.polygon_count()
            );
            for layer in &mesh.layers {
                println!(
                    "  layer {:?} '{}' ({:?})",
                    layer.domain, layer.name, layer.ty
                );
            }
            if mesh.split_normals.is_some() {
                println!("  custom split normals installed");
            }
            if let Some(indices) = &mesh.material_index {
                let max = indices.iter().copied().max().unwrap_or(0);
                println!("  material indices up to slot {}", max);
            }
            if mesh.layer(AttribDomain::Corner, "uv").is_some() {
                println!("  uv corner layer present");
            }
        }
        Artifact::Curve(curves) => {
            println!("curves: {} splines", curves.spline_count());
            for (i, spline) in curves.splines.iter().enumerate() {
                let kind = match spline {
                    Spline::Nurbs { .. } => "nurbs",
                    Spline::Bezier { .. } => "bezier",
                };
                println!(
                    "  spline {}: {} ({} points, closed: {})",
                    i,
                    kind,
                    spline.point_count(),
                    spline.closed()
                );
            }
        }
    }

    Ok(())
}
