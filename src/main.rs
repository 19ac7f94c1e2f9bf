mod assets;
mod game;
mod render;

use carsim::config::{self, DEFAULT_MASK_ASSET, START_X, START_Y};
use carsim::logging::{self, DEBUG_TOPICS};
use carsim::playlist::Playlist;
use carsim::road_mask::{self, RoadMask};
use carsim::types::Point;
use carsim::{SimError, Simulation};
use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Road mask PNG. Black pixels are walls, pure green pixels refuel pads.
    /// Defaults to the bundled track.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Picture drawn under the car. Defaults to the mask itself.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Song names for the music menu (repeatable)
    #[arg(long = "song")]
    songs: Vec<String>,

    /// Debug filter to specify log topics (e.g., "vehicle,terrain")
    /// Available topics: vehicle, terrain, gate, view, ui
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Car Simulation".to_owned(),
        window_width: config::WINDOW_WIDTH,
        window_height: config::WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

fn load_mask_image(args: &Args) -> Result<Image, SimError> {
    match &args.mask {
        Some(path) => road_mask::load_mask_image(path),
        None => {
            let bytes = assets::get_asset_bytes(DEFAULT_MASK_ASSET)?;
            road_mask::decode_mask_image(&bytes, DEFAULT_MASK_ASSET)
        }
    }
}

fn build_playlist(songs: Vec<String>) -> Result<Playlist, SimError> {
    if songs.is_empty() {
        Ok(Playlist::default())
    } else {
        Playlist::new(songs)
    }
}

async fn setup(args: Args) -> Result<(game::Game, render::Renderer), SimError> {
    let image = load_mask_image(&args)?;
    let mask = RoadMask::from_image(&image)?;

    let map = match &args.map {
        Some(path) => match load_texture(&path.display().to_string()).await {
            Ok(texture) => texture,
            Err(e) => {
                warn!("Could not load map {}: {}. Drawing the mask instead.", path.display(), e);
                Texture2D::from_image(&image)
            }
        },
        None => Texture2D::from_image(&image),
    };

    let start = Point::new(START_X, START_Y);
    let sim = Simulation::new(mask, start)?;
    let playlist = build_playlist(args.songs)?;

    let game = game::Game::new(sim, playlist);
    let renderer = render::Renderer::new(map, game.ui.theme());
    Ok((game, renderer))
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    let log_level = logging::parse_level(&args.log_level);
    let debug_filter = args.debug_filter.clone();
    if let Err(e) = logging::init_logger(log_level, debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    for topic in debug_filter.iter().flat_map(|f| f.split(',')) {
        let topic = topic.trim();
        if !topic.is_empty() && !DEBUG_TOPICS.contains(&topic) {
            warn!("Unknown debug topic '{}'. Available: {}", topic, DEBUG_TOPICS.join(", "));
        }
    }

    info!("Initializing Car Simulation...");

    let (mut game, mut renderer) = match setup(args).await {
        Ok(parts) => parts,
        Err(e) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };
    info!("Renderer initialized.");

    game.run(&mut renderer).await;
}
