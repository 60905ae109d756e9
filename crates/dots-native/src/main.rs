use std::f32::consts::TAU;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dots_core::{DotsEngine, DotsParams, Rgb};

mod args;
mod raster;

use args::Args;
use raster::PixmapSurface;

const FPS: f32 = 60.0;
const FRAMES_PER_STATE: u32 = 120;
const BACKGROUND: u32 = 0xFFFFFF;
const SEED: u64 = 42;

/// Stand-in for a microphone: a wobbling level between one and three tiles.
fn synthetic_level(t_sec: f32, tile: f32) -> f32 {
    tile * (2.0 + (t_sec * TAU * 1.3).sin() * (t_sec * TAU * 0.4).cos())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let params = DotsParams {
        debug_grid: args.grid,
        ..DotsParams::default()
    };
    let mut engine = DotsEngine::with_seed(params, SEED)?;
    engine.init(args.size, args.size);
    let mut surface = PixmapSurface::new(args.size, args.size)?;

    let frame = Duration::from_secs_f32(1.0 / FPS);
    let background = Rgb::from_hex(BACKGROUND);
    let mut frame_no: u32 = 0;
    for state in &args.states {
        engine.set_state(*state);
        for _ in 0..FRAMES_PER_STATE {
            let t = frame_no as f32 / FPS;
            engine.set_input_level(synthetic_level(t, engine.layout().tile_height));
            engine.tick(frame);

            surface.clear(background);
            engine.render(&mut surface);
            let path = args.out_dir.join(format!("frame_{frame_no:05}.png"));
            surface
                .save_png(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            frame_no += 1;
        }
        log::info!("[native] rendered {} ({:?})", state, engine.phase());
    }

    log::info!(
        "[native] wrote {} frames of {}x{} to {}",
        frame_no,
        args.size,
        args.size,
        args.out_dir.display()
    );
    Ok(())
}
