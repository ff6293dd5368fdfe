//! House Run headless driver
//!
//! Runs the world simulation against a simulated frame clock and reports what
//! the renderer would have been asked to draw.

use std::path::PathBuf;

use clap::Parser;

use house_run::{ConfigError, WorldConfig};
use house_run::consts::*;
use house_run::sim::{SlotId, WorldState, tick};

#[derive(Parser)]
#[command(name = "house-run", about = "Run the endless house world headless")]
struct Cli {
    /// JSON world config (defaults are used if omitted or unreadable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the config seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(short = 't', long, default_value = "60")]
    seconds: f64,

    /// Simulated display refresh rate
    #[arg(long, default_value = "60")]
    fps: f64,

    /// Print one JSON frame per rendered frame to stdout
    #[arg(long)]
    frames: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Fixed-timestep loop over a frame clock
struct Driver {
    state: WorldState,
    accumulator: f64,
}

impl Driver {
    fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: WorldState::new(config)?,
            accumulator: 0.0,
        })
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f64) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.events {
                let name = self
                    .state
                    .decoration(event.slot)
                    .map(|d| d.name.as_str())
                    .unwrap_or("?");
                match event.slot {
                    SlotId::Mousehole => log::info!("{} respawned at x={:.0}", name, event.x),
                    SlotId::Layer { .. } if event.visible => {
                        log::info!("{} respawned at x={:.0}", name, event.x)
                    }
                    SlotId::Layer { .. } => {
                        log::info!("{} respawned hidden at x={:.0}", name, event.x)
                    }
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> WorldConfig {
    let mut config = match &cli.config {
        Some(path) => WorldConfig::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default config");
            WorldConfig::default()
        }),
        None => WorldConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli);

    if cli.dump_config {
        match config.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("{e}"),
        }
        return;
    }

    log::info!("House Run (headless) starting with seed {}", config.seed);

    let frame_dt = 1.0 / cli.fps.max(1.0);
    let frames = (cli.seconds.max(0.0) / frame_dt).round() as u64;
    let mut driver = match Driver::new(&config) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    for _ in 0..frames {
        driver.update(frame_dt);
        if cli.frames {
            match serde_json::to_string(&driver.state.frame()) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("Frame encode failed: {e}"),
            }
        }
    }

    let state = &driver.state;
    let stats = &state.stats;
    println!(
        "ticks={} scroll_x={:.0} recycles={} (mousehole={}, {}={}, {}={}) hidden={}",
        state.time_ticks,
        state.camera.scroll_x(),
        stats.total_recycles(),
        stats.mousehole_recycles,
        state.layers[0].name,
        stats.layer_recycles[0],
        state.layers[1].name,
        stats.layer_recycles[1],
        stats.hidden,
    );
}
