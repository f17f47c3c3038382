use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{debug, info, warn};

use portfolio_quest::constants::{DEFAULT_DEMO_SEED, PLAYER_ATTACK_RANGE};
use portfolio_quest::systems::item_defs;
use portfolio_quest::{logging, GameEngine, GameMode, HudSnapshot, Section, SimConfig};

/// Runs the portfolio quest headless with an autopilot at the controls
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with simulation tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 20_000)]
    max_frames: u32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Maximum defeats before giving up
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the final HUD as JSON
    #[arg(long)]
    json: bool,
}

/// Gear the autopilot tries to craft, best first within each slot
const CRAFT_PREFERENCE: [&str; 5] = [
    "Crystal Blade",
    "Iron Sword",
    "Dragon Scale Armor",
    "Iron Armor",
    "Iron Shield",
];

/// Distance below which the autopilot stops steering along an axis
const STEER_DEADZONE: f32 = 0.25;

/// Drives the engine through its key API the way a player would
struct Autopilot {
    held: Vec<&'static str>,
    crafted: bool,
    retries: u32,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            held: Vec::new(),
            crafted: false,
            retries: 0,
        }
    }

    /// Hold exactly `keys`, releasing anything else
    fn hold(&mut self, engine: &mut GameEngine, keys: &[&'static str]) {
        for key in &self.held {
            if !keys.contains(key) {
                engine.key_up(key);
            }
        }
        for key in keys {
            if !self.held.contains(key) {
                engine.key_down(key);
            }
        }
        self.held = keys.to_vec();
    }

    /// Keys that move toward `target` along one axis (exploration moves one axis at a time)
    fn explore_keys(from: Vec3, target: Vec3) -> Vec<&'static str> {
        let delta = target - from;
        if delta.z < -STEER_DEADZONE {
            vec!["KeyW"]
        } else if delta.z > STEER_DEADZONE {
            vec!["KeyS"]
        } else if delta.x < -STEER_DEADZONE {
            vec!["KeyA"]
        } else if delta.x > STEER_DEADZONE {
            vec!["KeyD"]
        } else {
            Vec::new()
        }
    }

    /// Keys that move toward `target` on both axes at once
    fn battle_keys(from: Vec3, target: Vec3) -> Vec<&'static str> {
        let delta = target - from;
        let mut keys = Vec::new();
        if delta.z < -STEER_DEADZONE {
            keys.push("ArrowUp");
        } else if delta.z > STEER_DEADZONE {
            keys.push("ArrowDown");
        }
        if delta.x < -STEER_DEADZONE {
            keys.push("ArrowLeft");
        } else if delta.x > STEER_DEADZONE {
            keys.push("ArrowRight");
        }
        keys
    }

    fn next_section(engine: &GameEngine) -> Option<Section> {
        let progress = &engine.state.sections;
        Section::ALL
            .into_iter()
            .find(|s| !progress.is_unlocked(*s) || !progress.is_claimed(*s))
    }

    fn craft_gear(&mut self, engine: &mut GameEngine) {
        let mut filled = Vec::new();
        for name in CRAFT_PREFERENCE {
            if !engine.can_craft(name) {
                continue;
            }
            let Some(def) = item_defs::get_def(name) else {
                continue;
            };
            if filled.contains(&def.slot) {
                continue;
            }
            match engine.craft(name) {
                Ok(slot) => filled.push(slot),
                Err(e) => debug!("Skipping {}: {}", name, e),
            }
        }
        self.crafted = true;
    }

    /// One frame of decisions. Returns false once there is nothing left to do.
    fn drive(&mut self, engine: &mut GameEngine, max_retries: u32) -> bool {
        match engine.mode() {
            GameMode::Exploring => {
                if let Some(section) = Self::next_section(engine) {
                    if engine.nearby_station() == Some(section) {
                        self.hold(engine, &[]);
                        if !engine.state.sections.is_unlocked(section) {
                            engine.key_down("Enter");
                            engine.key_up("Enter");
                        }
                        if let Err(e) = engine.claim_reward(section) {
                            warn!("Claim failed at {}: {}", section.title(), e);
                        }
                    } else {
                        let keys = Self::explore_keys(engine.player_position(), section.station_position());
                        self.hold(engine, &keys);
                    }
                    return true;
                }

                self.hold(engine, &[]);
                if !self.crafted {
                    self.craft_gear(engine);
                }
                match engine.start_battle() {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Cannot start battle: {}", e);
                        false
                    }
                }
            }
            GameMode::Battle => {
                let time = engine.state.game_clock.time;
                let dragon = engine.dragon_position();
                // Circle in front of the dragon to pull projectiles off target
                let orbit = Vec3::new(time.sin() as f32 * 3.0, 0.0, PLAYER_ATTACK_RANGE * 0.5);
                let mut keys = Self::battle_keys(engine.player_position(), dragon + orbit);
                if engine.hud().attacks_in_flight {
                    keys.push("ShiftLeft");
                }
                self.hold(engine, &keys);
                engine.key_down("Space");
                engine.key_up("Space");
                true
            }
            GameMode::Defeat if self.retries < max_retries => {
                self.retries += 1;
                info!("Retrying battle ({}/{})", self.retries, max_retries);
                self.hold(engine, &[]);
                engine.retry()
            }
            GameMode::Defeat | GameMode::Victory => false,
        }
    }
}

fn print_summary(hud: &HudSnapshot, frames: u32) {
    println!("mode:       {:?}", hud.mode);
    println!("frames:     {} ({:.2}s)", frames, hud.time);
    println!("level:      {} ({} xp)", hud.level, hud.experience);
    println!("health:     {}/{}", hud.health, hud.max_health);
    println!("dragon:     {}/{}", hud.dragon_health, hud.dragon_max_health);
    println!(
        "equipment:  {} / {} / {}",
        hud.equipment.weapon, hud.equipment.armor, hud.equipment.shield
    );
    let sections: Vec<&str> = hud.unlocked_sections.iter().map(|s| s.title()).collect();
    println!("sections:   {}", sections.join(", "));
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    config.seed = args.seed.or(config.seed).or(Some(DEFAULT_DEMO_SEED));
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be positive, got {}",
        args.fps
    );
    let dt = 1.0 / args.fps;

    info!("Starting headless run with seed {:?}", config.seed);
    let mut engine = GameEngine::new(config);
    let mut pilot = Autopilot::new();
    let mut frames = 0;
    let mut event_count = 0;

    while frames < args.max_frames {
        if !pilot.drive(&mut engine, args.max_retries) {
            break;
        }
        engine.tick(dt);
        event_count += engine.drain_events().len();
        frames += 1;
    }

    if engine.mode() != GameMode::Victory {
        warn!("Run ended without a victory after {} frames", frames);
    }
    info!("{} events over {} frames", event_count, frames);

    let hud = engine.hud();
    if args.json {
        let text = serde_json::to_string_pretty(&hud).context("serializing HUD")?;
        println!("{}", text);
    } else {
        print_summary(&hud, frames);
    }
    Ok(())
}
