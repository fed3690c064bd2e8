//! # Walk Demo - Frustum Grid in a Frame Loop
//!
//! Walks a perspective camera across the meadow and prints the grid after a
//! few key moments:
//!
//! ```text
//! 1. Cold start        - every visible cell seeds at alpha 0.01
//! 2. Standing still    - alphas rise to 1
//! 3. Turning           - fades snap, cells swap instantly
//! 4. Walking forward   - cells behind the camera fade out
//! ```
//!
//! A second thread plays the renderer, reading published frames.

use std::f64::consts::FRAC_PI_2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use meadow_core::RecordExchange;
use meadow_rendering::debug::render_ascii;
use meadow_rendering::{CameraPose, CellRecord, FrustumGrid, GridConfig, PerspectiveParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════════════");
    println!("   MEADOW - Frustum Grid Walk Demo");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let config = GridConfig::from_perspective(&PerspectiveParams {
        field_of_view: FRAC_PI_2,
        aspect_ratio: 1.5,
        z_offset: 0.5,
        z_extent: 12.0,
        grid_dim: 12,
    })
    .with_snap_on_translation(false);
    println!(
        "Footprint: near {:.2}  far {:.2}  depth {:.2}  cell {:.2}",
        config.near_scale,
        config.far_scale,
        config.z_extent,
        config.cell_size()
    );

    let mut grid = FrustumGrid::with_config(config)?;
    let exchange = Arc::new(RecordExchange::<CellRecord>::with_capacity(grid.num_cells() as usize));
    let done = Arc::new(AtomicBool::new(false));

    let renderer = {
        let exchange = Arc::clone(&exchange);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut frames = 0u64;
            let mut last_generation = 0;
            while !done.load(Ordering::Acquire) {
                let frame = exchange.read();
                if frame.generation() != last_generation {
                    last_generation = frame.generation();
                    frames += 1;
                }
            }
            frames
        })
    };

    let mut pose = CameraPose::new(0.0, 0.0, 0.0);
    let tick = |grid: &mut FrustumGrid, pose: CameraPose| {
        grid.update_pose(pose);
        grid.publish(&exchange);
    };

    // === 1. Cold start ===
    tick(&mut grid, pose);
    print_moment("1. Cold start", &grid);

    // === 2. Standing still ===
    for _ in 0..15 {
        tick(&mut grid, pose);
    }
    print_moment("2. Standing still for 15 ticks", &grid);

    // === 3. Quarter turn to the left over 8 ticks ===
    for _ in 0..8 {
        pose.heading += FRAC_PI_2 / 8.0;
        tick(&mut grid, pose);
    }
    print_moment("3. Quarter turn left", &grid);

    // === 4. Walk forward (now along -X) ===
    for _ in 0..10 {
        pose.x -= 0.4;
        tick(&mut grid, pose);
    }
    print_moment("4. Walking forward 4 units", &grid);

    done.store(true, Ordering::Release);
    let frames = renderer.join().map_err(|_| "renderer thread panicked")?;

    println!("Renderer observed {frames} distinct frames of {} published", exchange.generation());
    Ok(())
}

fn print_moment(title: &str, grid: &FrustumGrid) {
    let stats = grid.stats();
    println!("── {title} ──");
    println!(
        "   candidates {}  intersecting {}  +{} ={} -{}  coverage {:.0}%",
        stats.candidates,
        stats.intersecting,
        stats.allocated,
        stats.retained,
        stats.released,
        stats.coverage() * 100.0
    );
    print!("{}", render_ascii(grid));
    println!();
}
