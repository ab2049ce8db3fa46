use std::path::PathBuf;
use std::process;

use clap::Parser;

use hexworld::ascii;
use hexworld::cell::Terrain;
use hexworld::config::{MapParams, WorldSize};
use hexworld::world::WorldBuilder;

#[derive(Parser, Debug)]
#[command(name = "hexworld")]
#[command(about = "Generate hexagonal strategy-game world maps")]
struct Args {
    /// Named world size (tiny/small/normal/huge)
    #[arg(long, default_value = "normal")]
    size: WorldSizeArg,

    /// Grid dimension, a power of two; overrides --size
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Number of seasons in a year
    #[arg(long)]
    seasons: Option<usize>,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Load map parameters from a JSON file
    #[arg(long)]
    params: Option<PathBuf>,

    /// Write the effective parameters to a JSON file
    #[arg(long)]
    save_params: Option<PathBuf>,

    /// Output path for the terrain dump (timestamped name by default)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Debug)]
struct WorldSizeArg(WorldSize);

impl std::str::FromStr for WorldSizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(WorldSizeArg)
    }
}

fn main() {
    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<MapParams>(&text).map_err(|e| e.to_string()))
        {
            Ok(params) => params,
            Err(e) => {
                eprintln!("Failed to load parameters from {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => MapParams::with_size(args.size.0),
    };
    if let Some(dimension) = args.dimension {
        params.dimension = dimension;
    }
    if let Some(seasons) = args.seasons {
        params.num_seasons = seasons;
    }

    let seed = args.seed.unwrap_or_else(rand::random);

    println!(
        "Generating map '{}' ({}x{} hexes) with seed {}",
        params.name, params.dimension, params.dimension, seed
    );
    let mut world = match WorldBuilder::new(params) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Invalid parameters: {}", e);
            process::exit(1);
        }
    };
    world.on_progress(|phase, percent| println!("[{:3}%] {}", percent, phase.name()));

    if let Err(e) = world.generate(seed) {
        eprintln!("Generation failed: {}", e);
        process::exit(1);
    }

    print_summary(&world);

    if let Some(path) = &args.save_params {
        let json = serde_json::to_string_pretty(world.params()).expect("params serialize");
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("Failed to save parameters to {}: {}", path.display(), e);
            process::exit(1);
        }
        println!("Parameters saved to {}", path.display());
    }

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(ascii::default_dump_filename()));
    if let Err(e) = ascii::export_file(&world, &output) {
        eprintln!("Failed to write terrain dump to {}: {}", output.display(), e);
        process::exit(1);
    }
    println!("Terrain dump written to {}", output.display());
    println!("Re-run with --seed {} to reproduce this map", seed);
}

fn print_summary(world: &WorldBuilder) {
    let total = world.grid().len();
    let water = world.grid().cells().iter().filter(|c| c.is_water()).count();
    let mountains = world
        .grid()
        .cells()
        .iter()
        .filter(|c| c.terrain.is_mountain())
        .count();
    let ice = world
        .grid()
        .cells()
        .iter()
        .filter(|c| c.terrain == Terrain::Ice)
        .count();
    println!(
        "Water: {} cells ({:.1}%), mountains: {}, ice: {}",
        water,
        100.0 * water as f64 / total as f64,
        mountains,
        ice
    );

    let temp_scale = world.params().temp_scale;
    let mean_temp: f32 = world
        .grid()
        .cells()
        .iter()
        .map(|c| c.avg_temperature_f(temp_scale))
        .sum::<f32>()
        / total as f32;
    let mean_rain: f32 = world
        .grid()
        .cells()
        .iter()
        .map(|c| c.avg_rainfall())
        .sum::<f32>()
        / total as f32;
    println!(
        "Mean temperature: {:.1} F, mean rainfall: {:.0}",
        mean_temp, mean_rain
    );

    let cutoffs = world.cutoffs();
    println!(
        "Elevation cutoffs: deep {:.3}, ocean {:.3}, mountain {:.3}, impassable {:.3}",
        cutoffs.deep_ocean, cutoffs.ocean, cutoffs.mountains, cutoffs.impassable
    );
}
