use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kiln_runtime::{LevelLoader, WorldInspector};
use kiln_world::GameWorld;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kiln-cli", about = "CLI driver for the kiln world core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and workspace info
    Info,
    /// Load a level and drive the frame loop
    Run {
        /// Level document to load
        #[arg(short, long, default_value = "assets/levels/demo_level.json")]
        level: PathBuf,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Fixed timestep in seconds
        #[arg(long, default_value = "0.016")]
        dt: f32,
    },
    /// Walk through create/destroy/reuse and show handle invalidation
    Churn {
        /// Pool capacity
        #[arg(short, long, default_value = "2")]
        capacity: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("kiln-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("world core: generational pool + service registry");
            println!("level protocol: Services -> Capacity -> GameObjects");
        }
        Commands::Run { level, frames, dt } => {
            let mut world = GameWorld::new();
            LevelLoader::new().load(&mut world, &level)?;
            println!("loaded {}", level.display());
            println!("{}", WorldInspector::summary(&world));

            for _ in 0..frames {
                world.update(dt);
                world.render();
                world.debug_ui();
            }

            println!("after {frames} frames at dt={dt}:");
            println!("{}", WorldInspector::summary(&world));
            for name in WorldInspector::object_names(&world) {
                println!("  object: {name}");
            }
            world.terminate();
        }
        Commands::Churn { capacity } => {
            let mut world = GameWorld::new();
            world.initialize(capacity);

            let alpha = world.pool_mut().create("alpha").map(|o| o.handle());
            let beta = world.pool_mut().create("beta").map(|o| o.handle());
            println!("alpha -> {alpha:?}");
            println!("beta  -> {beta:?}");
            println!("extra -> {:?}", world.pool_mut().create("extra").map(|o| o.handle()));

            if let Some(handle) = alpha {
                world.destroy_game_object(handle);
                println!(
                    "alpha destroyed; resolvable before flush: {}",
                    world.get_game_object(handle).is_some()
                );
                world.update(0.0);
                let gamma = world.pool_mut().create("gamma").map(|o| o.handle());
                println!("gamma -> {gamma:?}");
                println!(
                    "old alpha handle still valid: {}",
                    world.pool().is_valid(handle)
                );
            }
            println!("{}", WorldInspector::summary(&world));
            world.terminate();
        }
    }

    Ok(())
}
