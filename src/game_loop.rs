//! Frame-driven game loop
//!
//! Owns the live `Session` and the collaborators around it. The host calls
//! `frame` once per display refresh and keeps scheduling frames for as long
//! as it returns `LoopControl::Continue`.

use std::time::Duration;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::platform::{HudListener, MusicPlayer};
use crate::renderer::{FrameSnapshot, PlayerSkin, Renderer};
use crate::sim::{GameEvent, InputSource, KeyCommand, Session, tick};

/// Loop-level phase, on top of the session's damage state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// No session started yet
    Idle,
    Running,
    Paused,
    /// Session ended; waiting for a restart
    GameOver,
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Halt,
}

pub struct GameLoop<R, H, M> {
    config: GameConfig,
    base_seed: u64,
    sessions_started: u64,
    session: Option<Session>,
    phase: LoopPhase,
    skin: PlayerSkin,
    renderer: R,
    hud: H,
    music: M,
}

impl<R: Renderer, H: HudListener, M: MusicPlayer> GameLoop<R, H, M> {
    /// Validate the config up front; a bad config never reaches a frame.
    pub fn new(
        config: GameConfig,
        seed: u64,
        renderer: R,
        hud: H,
        music: M,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            base_seed: seed,
            sessions_started: 0,
            session: None,
            phase: LoopPhase::Idle,
            skin: PlayerSkin::default(),
            renderer,
            hud,
            music,
        })
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn skin(&self) -> PlayerSkin {
        self.skin
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    /// Begin a brand-new session, replacing any previous one
    pub fn start_session(&mut self) -> Result<LoopControl, ConfigError> {
        if matches!(self.phase, LoopPhase::Running | LoopPhase::Paused) {
            self.music.stop_music();
        }
        let seed = self.base_seed.wrapping_add(self.sessions_started);
        let session = Session::new(self.config.clone(), seed)?;
        self.sessions_started += 1;
        log::info!("Started session {} with seed {}", self.sessions_started, seed);

        let progression = &session.progression;
        self.hud.on_score_changed(progression.score(), progression.level(), progression.lives());
        self.session = Some(session);
        self.phase = LoopPhase::Running;
        self.music.play_music();
        Ok(LoopControl::Continue)
    }

    /// Throw the current session away and start over
    pub fn restart_session(&mut self) -> Result<LoopControl, ConfigError> {
        self.session = None;
        self.start_session()
    }

    /// Freeze the loop. Returns false if there was nothing running to pause.
    pub fn pause(&mut self) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        self.phase = LoopPhase::Paused;
        self.music.pause_music();
        self.hud.on_pause_requested();
        true
    }

    /// Unfreeze; the host should schedule a frame if this returns `Continue`
    pub fn resume(&mut self) -> LoopControl {
        match self.phase {
            LoopPhase::Paused => {}
            LoopPhase::Running => return LoopControl::Continue,
            LoopPhase::Idle | LoopPhase::GameOver => return LoopControl::Halt,
        }
        self.phase = LoopPhase::Running;
        self.music.play_music();
        log::info!("Resumed");
        LoopControl::Continue
    }

    /// Apply a non-movement key command
    pub fn handle_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Pause => {
                self.pause();
            }
        }
    }

    /// An asset failed to load. Logged; the game keeps running on fallback
    /// visuals.
    pub fn report_asset_failure(&mut self, asset: &str, reason: &str) {
        log::warn!("Failed to load {}: {} (using fallback visuals)", asset, reason);
        self.skin = PlayerSkin::Fallback;
    }

    /// Run one frame that took `dt` since the previous one
    pub fn frame(&mut self, dt: Duration, input: &impl InputSource) -> LoopControl {
        if self.phase != LoopPhase::Running {
            return LoopControl::Halt;
        }
        let Some(session) = self.session.as_mut() else {
            return LoopControl::Halt;
        };

        let intent = input.sample(session.player.pos);
        let report = tick(session, &intent, dt);
        for event in &report.events {
            dispatch_event(&mut self.hud, event);
        }

        self.renderer
            .render_frame(&FrameSnapshot::capture(session, self.skin));

        if session.is_over() {
            self.phase = LoopPhase::GameOver;
            self.music.stop_music();
            return LoopControl::Halt;
        }
        LoopControl::Continue
    }
}

fn dispatch_event(hud: &mut impl HudListener, event: &GameEvent) {
    match *event {
        GameEvent::ScoreChanged {
            score,
            level,
            lives,
        } => hud.on_score_changed(score, level, lives),
        GameEvent::LevelUp { level, .. } => hud.on_level_up(level),
        GameEvent::GameOver { score, level } => hud.on_game_over(score, level),
        GameEvent::LifeLost { lives } => log::debug!("Life lost, {} remaining", lives),
        GameEvent::InvulnerabilityEnded => log::debug!("Invulnerability ended"),
    }
}
