use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use glam::Vec3;
use litscene_input::{Action, InputSnapshot, Key, MovementController};
use litscene_render::{FrameBatch, Primitive, RecordingBackend, SceneRenderer, SphereMesh};
use litscene_scene::{Scene, SceneConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "litscene-cli", about = "Headless tools for the lit scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Tessellate a sphere and report its statistics
    Mesh {
        /// Longitude subdivisions
        #[arg(long, default_value = "32")]
        slices: u32,
        /// Latitude subdivisions
        #[arg(long, default_value = "16")]
        stacks: u32,
        /// Radius applied when emitting
        #[arg(short, long, default_value = "1.0")]
        radius: f32,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one frame without a window and summarize the draw calls
    Frame {
        /// Camera position as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        camera: Option<Vec3>,
        /// Object position as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        object: Option<Vec3>,
    },
    /// Hold keys for a number of frames and report where things end up
    Simulate {
        /// Held keys, one character each: a d w s i j k l, ' ' for Space, '^' for Shift
        #[arg(short, long)]
        keys: String,
        /// Number of frames to hold the keys
        #[arg(short, long, default_value = "10")]
        frames: u32,
    },
}

#[derive(Debug, Serialize)]
struct MeshStats {
    slices: u32,
    stacks: u32,
    radius: f32,
    vertex_count: usize,
    strip_count: usize,
    vertices_per_strip: usize,
    emitted_vertices: usize,
    max_radius_error: f32,
    max_normal_error: f32,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got {s:?}"));
    };
    let parse = |v: &str| v.parse::<f32>().map_err(|e| format!("{v:?}: {e}"));
    Ok(Vec3::new(parse(*x)?, parse(*y)?, parse(*z)?))
}

fn parse_keys(keys: &str) -> anyhow::Result<InputSnapshot> {
    let mut held = Vec::new();
    for c in keys.chars() {
        match Key::from_char(c) {
            Some(key) => held.push(key),
            None => bail!("unknown key {c:?}"),
        }
    }
    Ok(InputSnapshot::from_keys(held))
}

fn mesh_stats(slices: u32, stacks: u32, radius: f32) -> anyhow::Result<MeshStats> {
    let mut mesh = SphereMesh::new();
    let mut rec = RecordingBackend::new();
    mesh.emit(&mut rec, radius, slices, stacks)
        .context("sphere emission failed")?;

    let strips = rec.strips();
    let mut max_radius_error = 0.0_f32;
    let mut max_normal_error = 0.0_f32;
    for (position, normal) in strips.iter().flatten() {
        max_radius_error = max_radius_error.max((position.length() - radius.abs()).abs());
        max_normal_error = max_normal_error.max((normal.length() - 1.0).abs());
    }

    Ok(MeshStats {
        slices,
        stacks,
        radius,
        vertex_count: mesh.vertices().len(),
        strip_count: strips.len(),
        vertices_per_strip: strips.first().map_or(0, Vec::len),
        emitted_vertices: rec.vertex_count(),
        max_radius_error,
        max_normal_error,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("litscene-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", litscene_scene::crate_info());
            println!("input: {}", litscene_input::crate_info());
            println!("render: {}", litscene_render::crate_info());
            println!("defaults: {}", Scene::default().describe_positions());
        }
        Commands::Mesh {
            slices,
            stacks,
            radius,
            json,
        } => {
            let stats = mesh_stats(slices, stacks, radius)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Sphere {}x{} radius={}", stats.slices, stats.stacks, stats.radius);
                println!("Cached vertices: {}", stats.vertex_count);
                println!(
                    "Strips: {} x {} vertices = {} emitted",
                    stats.strip_count, stats.vertices_per_strip, stats.emitted_vertices
                );
                println!(
                    "Max error: radius={:e} normal={:e}",
                    stats.max_radius_error, stats.max_normal_error
                );
            }
        }
        Commands::Frame { camera, object } => {
            let defaults = SceneConfig::default();
            let config = SceneConfig {
                camera_position: camera.unwrap_or(defaults.camera_position),
                object_position: object.unwrap_or(defaults.object_position),
                ..defaults
            };
            let scene = Scene::from_config(&config);
            let mut renderer = SceneRenderer::new();

            let mut rec = RecordingBackend::new();
            renderer.render_frame(&mut rec, &scene)?;
            print!("{}", rec.summary());

            let mut batch = FrameBatch::new();
            renderer.render_frame(&mut batch, &scene)?;
            println!(
                "Batched: lines={} unlit_triangles={} lit_triangles={}",
                batch.line_count(),
                batch.unlit_triangles.len() / 3,
                batch.lit_triangles.len() / 3
            );
            println!(
                "Strips submitted: {}",
                rec.primitive_count(Primitive::TriangleStrip)
            );
        }
        Commands::Simulate { keys, frames } => {
            let snapshot = parse_keys(&keys)?;
            let mut scene = Scene::default();
            let mut movement = MovementController::new();
            tracing::debug!(frames, held = ?snapshot, "simulating held keys");

            println!("Start: {}", scene.describe_positions());
            for _ in 0..frames {
                let frame = movement.update(&snapshot, scene.camera.speed, scene.object.speed);
                for action in frame.actions() {
                    match action {
                        Action::MoveCamera(delta) => scene.camera.translate(delta),
                        Action::MoveObject(delta) => scene.object.translate(delta),
                        Action::Quit | Action::Noop => {}
                    }
                }
            }
            println!("Last key: {}", movement.last_key());
            println!("End ({frames} frames): {}", scene.describe_positions());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_triples() {
        assert_eq!(parse_vec3("1,2,3"), Ok(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vec3(" -2.5, 0 ,1"), Ok(Vec3::new(-2.5, 0.0, 1.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn parse_keys_rejects_unknown() {
        let snap = parse_keys("ad^").unwrap();
        assert!(snap.is_held(Key::A));
        assert!(snap.is_held(Key::LeftShift));
        assert!(parse_keys("x").is_err());
    }

    #[test]
    fn mesh_stats_for_four_by_two() {
        let stats = mesh_stats(4, 2, 2.0).unwrap();
        assert_eq!(stats.vertex_count, 15);
        assert_eq!(stats.strip_count, 2);
        assert_eq!(stats.vertices_per_strip, 10);
        assert_eq!(stats.emitted_vertices, 20);
        assert!(stats.max_radius_error < 1e-5);
        assert!(stats.max_normal_error < 1e-5);
    }

    #[test]
    fn mesh_stats_rejects_zero_slices() {
        assert!(mesh_stats(0, 2, 1.0).is_err());
    }

    #[test]
    fn mesh_stats_rejects_oversized_counts() {
        assert!(mesh_stats(u32::MAX, u32::MAX, 1.0).is_err());
        assert!(mesh_stats(32, 100_000, 1.0).is_err());
    }
}
