use clap::{Parser, Subcommand};
use glam::Vec3;
use scrollscape_controls::ScrollTracker;
use scrollscape_render::{SceneRenderer, TextRenderer};
use scrollscape_scene::{starfield, Scene, Showcase, ShowcaseConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrollscape-cli", about = "CLI tool for scrollscape operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info and a showcase summary
    Info,
    /// Run the showcase headless and check it is deterministic
    Simulate {
        /// Number of frames to advance
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Final scroll offset to reach (0 = top of page)
        #[arg(short = 't', long, default_value = "-480.0", allow_hyphen_values = true)]
        scroll_to: f32,
        /// Number of scroll events spread across the run
        #[arg(short, long, default_value = "12")]
        events: u64,
        /// Starfield seed
        #[arg(short, long, default_value = "1")]
        seed: u64,
    },
    /// Scatter a starfield and report its bounds
    Stars {
        /// Number of stars
        #[arg(short, long, default_value = "200")]
        count: usize,
        /// Spread of the cube the stars land in
        #[arg(long, default_value = "100.0")]
        spread: f32,
        /// Starfield seed
        #[arg(short, long, default_value = "1")]
        seed: u64,
    },
}

/// Drive the showcase for `frames` frames with `events` scroll events
/// folded in, then render the end state as text.
fn run_simulation(frames: u64, scroll_to: f32, events: u64, seed: u64) -> String {
    let config = ShowcaseConfig {
        star_seed: seed,
        ..ShowcaseConfig::default()
    };
    let (mut scene, mut camera, showcase) = Showcase::build(&config);
    let mut tracker = ScrollTracker::new(scroll_to.abs());

    let step = if events > 0 {
        scroll_to / events as f32
    } else {
        0.0
    };
    let interval = if events > 0 {
        (frames / events).max(1)
    } else {
        u64::MAX
    };
    let mut fired = 0u64;
    for frame in 0..frames {
        showcase.advance_frame(&mut scene);
        if fired < events && (frame + 1) % interval == 0 {
            let t = tracker.scroll_pixels(step);
            showcase.apply_scroll(&mut scene, &mut camera, t);
            fired += 1;
        }
    }
    tracing::debug!(frames, events = fired, t = tracker.offset(), "simulation finished");

    TextRenderer::new().render(&scene, &camera)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("scrollscape-cli v{}", env!("CARGO_PKG_VERSION"));
            let (scene, _, showcase) = Showcase::build(&ShowcaseConfig::default());
            println!(
                "scene: {} objects ({} stars)",
                scene.object_count(),
                showcase.star_count()
            );
            println!("render: {}", scrollscape_render::crate_info());
            println!("controls: {}", scrollscape_controls::crate_info());
        }
        Commands::Simulate {
            frames,
            scroll_to,
            events,
            seed,
        } => {
            println!("Deterministic showcase run: seed={seed}, frames={frames}, events={events}");

            let first = run_simulation(frames, scroll_to, events, seed);
            println!("{first}");

            let second = run_simulation(frames, scroll_to, events, seed);
            println!(
                "Match: {}",
                if first == second { "OK" } else { "MISMATCH" }
            );
        }
        Commands::Stars {
            count,
            spread,
            seed,
        } => {
            let mut scene = Scene::new();
            let ids = starfield::scatter(&mut scene, count, spread, seed);
            println!("Scattered {} stars (seed={seed}, spread={spread})", ids.len());

            if !ids.is_empty() {
                let mut min = Vec3::splat(f32::INFINITY);
                let mut max = Vec3::splat(f32::NEG_INFINITY);
                for id in &ids {
                    if let Some(star) = scene.object(*id) {
                        min = min.min(star.transform.position);
                        max = max.max(star.transform.position);
                    }
                }
                println!("x: [{:.2}, {:.2}]", min.x, max.x);
                println!("y: [{:.2}, {:.2}]", min.y, max.y);
                println!("z: [{:.2}, {:.2}]", min.z, max.z);

                let half = spread * 0.5;
                let inside = ids.iter().all(|id| {
                    scene
                        .object(*id)
                        .map(|star| star.transform.position.abs().max_element() <= half)
                        .unwrap_or(false)
                });
                println!(
                    "All within +/-{half:.1}: {}",
                    if inside { "OK" } else { "OUT OF RANGE" }
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_without_scroll_events_keeps_the_initial_camera() {
        let out = run_simulation(10, -480.0, 0, 1);
        assert!(out.contains("pos=(0.0000, 0.0000, 30.0000)"));
        assert!(out.contains("yaw=0.0000"));
    }

    #[test]
    fn simulation_is_deterministic() {
        let first = run_simulation(120, -480.0, 12, 7);
        let second = run_simulation(120, -480.0, 12, 7);
        assert_eq!(first, second);
    }
}
