use std::hint::black_box;
use std::time::Instant;

use litscene_render::{FrameBatch, RecordingBackend, SceneRenderer, SphereMesh};
use litscene_scene::Scene;

fn bench_generate(slices: u32, stacks: u32, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let mut mesh = SphereMesh::new();
        mesh.ensure_generated(black_box(slices), black_box(stacks))
            .expect("valid tessellation");
        black_box(mesh.vertices().len());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  generate ({slices}x{stacks}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_cached_emit(slices: u32, stacks: u32, iterations: usize) {
    let mut mesh = SphereMesh::new();
    let start = Instant::now();
    for _ in 0..iterations {
        let mut rec = RecordingBackend::new();
        mesh.emit(&mut rec, black_box(1.0), slices, stacks)
            .expect("valid tessellation");
        black_box(rec.vertex_count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  cached emit ({slices}x{stacks}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_frame_batch(iterations: usize) {
    let mut renderer = SceneRenderer::new();
    let scene = Scene::default();
    let start = Instant::now();
    for _ in 0..iterations {
        let mut batch = FrameBatch::new();
        renderer
            .render_frame(&mut batch, black_box(&scene))
            .expect("default scene renders");
        black_box(batch.triangle_count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  frame batch ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== SphereMesh benchmarks ===");
    bench_generate(16, 16, 1_000);
    bench_generate(32, 32, 1_000);
    bench_generate(128, 64, 100);
    bench_cached_emit(32, 32, 1_000);
    bench_frame_batch(200);
}
