use std::hint::black_box;
use std::time::Instant;

use scrollscape_scene::{starfield, Scene, Showcase, ShowcaseConfig};

fn bench_scatter(star_count: usize, iterations: usize) {
    let start = Instant::now();
    for i in 0..iterations {
        let mut scene = Scene::new();
        let ids = starfield::scatter(black_box(&mut scene), star_count, 100.0, i as u64);
        black_box(ids);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  scatter ({star_count} stars, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_advance_frame(iterations: usize) {
    let (mut scene, _, show) = Showcase::build(&ShowcaseConfig::default());
    let start = Instant::now();
    for _ in 0..iterations {
        show.advance_frame(black_box(&mut scene));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  advance_frame ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_apply_scroll(iterations: usize) {
    let (mut scene, mut camera, show) = Showcase::build(&ShowcaseConfig::default());
    let start = Instant::now();
    for i in 0..iterations {
        let t = -((i % 2000) as f32);
        show.apply_scroll(black_box(&mut scene), black_box(&mut camera), black_box(t));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  apply_scroll ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Showcase Benchmarks ===\n");

    println!("Star scatter:");
    bench_scatter(200, 1000);
    bench_scatter(2000, 100);
    bench_scatter(20000, 10);

    println!("\nPer-frame update:");
    bench_advance_frame(1_000_000);

    println!("\nScroll response:");
    bench_apply_scroll(1_000_000);

    println!("\n=== Done ===");
}
