use clap::Parser;
use log::{error, info};
use orbit_patrol::config::GameConfig;
use orbit_patrol::error::GameError;
use orbit_patrol::frame::{FrameDriver, RunOutcome};
use orbit_patrol::game::GameWorld;
use orbit_patrol::logging;
use orbit_patrol::platform::{SdlHost, SdlRenderer, TextureSet};
use std::path::PathBuf;

/// Dodge the patrols, grab the items
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (defaults are used for anything it leaves out)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed seed for enemy spawn positions
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), GameError> {
    let mut config = GameConfig::load_or_default(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.tuning.seed = Some(seed);
    }

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump()?;

    let textures = TextureSet::load(&texture_creator, &config.textures);
    let mut host = SdlHost::new(
        canvas,
        event_pump,
        SdlRenderer::new(textures),
        config.window.clear_color,
    );
    let mut driver = FrameDriver::new(config.window.camera_zoom);
    let mut world = GameWorld::new(config);
    host.refresh_title(&world)?;

    info!("Controls: W/A/S/D move, Q quit");

    let outcome = driver.run(&mut world, &mut host)?;
    if outcome == RunOutcome::Terminated && world.is_player_dead() {
        println!("Game Over");
    }

    Ok(())
}
