//! Astro Dodge entry point
//!
//! The native build has no window; it drives a seeded session headlessly with
//! a simple autopilot and prints a JSON summary of the run.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, bail};
    use serde::Serialize;

    use astro_dodge::platform::{LogHud, LogMusic};
    use astro_dodge::renderer::NullRenderer;
    use astro_dodge::sim::{DirectionalInput, Session, nearest_obstacle};
    use astro_dodge::{DifficultyPreset, GameConfig, GameLoop, LoopControl, frame_duration};

    /// Obstacles closer than this get dodged
    const DODGE_DISTANCE: f32 = 1.2;

    struct Args {
        config_path: Option<String>,
        preset: Option<DifficultyPreset>,
        seed: Option<u64>,
        frames: u64,
    }

    impl Args {
        fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
            let mut parsed = Self {
                config_path: None,
                preset: None,
                seed: None,
                frames: 60 * 60,
            };
            while let Some(arg) = args.next() {
                let mut value = |name: &str| {
                    args.next()
                        .with_context(|| format!("{} needs a value", name))
                };
                match arg.as_str() {
                    "--config" => parsed.config_path = Some(value("--config")?),
                    "--preset" => {
                        let name = value("--preset")?;
                        let preset = DifficultyPreset::from_str(&name)
                            .ok_or(astro_dodge::ConfigError::UnknownPreset(name))?;
                        parsed.preset = Some(preset);
                    }
                    "--seed" => parsed.seed = Some(value("--seed")?.parse().context("--seed")?),
                    "--frames" => parsed.frames = value("--frames")?.parse().context("--frames")?,
                    other => bail!("unknown argument: {}", other),
                }
            }
            Ok(parsed)
        }
    }

    #[derive(Serialize)]
    struct RunSummary {
        seed: u64,
        frames: u64,
        score: u32,
        level: u32,
        lives: u8,
        live_obstacles: usize,
        game_over: bool,
    }

    /// Sidestep whatever is about to land on the ship
    fn autopilot(session: &Session) -> DirectionalInput {
        let pos = session.player.pos;
        let Some((obstacle, distance)) = nearest_obstacle(pos, session.field.obstacles()) else {
            return DirectionalInput::NONE;
        };
        if distance > DODGE_DISTANCE || obstacle.pos.y < pos.y {
            return DirectionalInput::NONE;
        }
        let go_left = if pos.x <= -2.5 {
            false
        } else if pos.x >= 2.5 {
            true
        } else {
            obstacle.pos.x >= pos.x
        };
        DirectionalInput {
            left: go_left,
            right: !go_left,
            ..DirectionalInput::NONE
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        log::info!("Astro Dodge (native, headless) starting...");

        let args = Args::parse(std::env::args().skip(1))?;
        let mut config = match &args.config_path {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(preset) = args.preset {
            config.apply_preset(preset);
        }
        let seed = args.seed.or(config.seed).unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let mut game = GameLoop::new(
            config,
            seed,
            NullRenderer,
            LogHud::default(),
            LogMusic::default(),
        )?;
        game.start_session()?;

        let dt = frame_duration();
        let mut frames = 0;
        while frames < args.frames {
            let input = game
                .session()
                .map(autopilot)
                .unwrap_or(DirectionalInput::NONE);
            frames += 1;
            if game.frame(dt, &input) == LoopControl::Halt {
                break;
            }
        }

        let session = game.session().context("no session was started")?;
        let summary = RunSummary {
            seed,
            frames,
            score: session.progression.score(),
            level: session.progression.level(),
            lives: session.progression.lives(),
            live_obstacles: session.field.len(),
            game_over: session.is_over(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `GameLoop` directly; nothing to do here
}
