//! Per-frame glue between input, simulation, camera and scene

use glam::{Quat, Vec3};

use crate::camera::{CameraRig, PointerTracker};
use crate::consts::*;
use crate::platform::{InputSnapshot, KeyBindings};
use crate::scene::{ObjectHandle, Scene};
use crate::settings::{BannerPolicy, Settings};
use crate::sim::{GameEvent, Side, Simulation};

/// Banner placement above the far edge of the table
const BANNER_POSITION: Vec3 = Vec3::new(0.0, 0.8, 1.8);
const BANNER_TILT: f32 = -0.5;
const BANNER_SCALE: Vec3 = Vec3::new(2.0, 1.0, 1.0);

fn banner_mesh(winner: Side) -> &'static str {
    match winner {
        Side::Right => "R_win",
        Side::Left => "L_win",
    }
}

/// What a frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Quit was requested; the simulation did not run this frame
    pub quit: bool,
    pub events: Vec<GameEvent>,
}

/// Running tally of rounds won
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

/// A running game: simulation plus the scene objects it drives
pub struct Game {
    pub sim: Simulation,
    pub scene: Scene,
    pub rig: CameraRig,
    pointer: PointerTracker,
    bindings: KeyBindings,
    banner_policy: BannerPolicy,
    paddles: [ObjectHandle; 2],
    ball: ObjectHandle,
    banners: Vec<ObjectHandle>,
    pub score: Score,
}

impl Game {
    /// Add the paddles and ball to `scene` and set up the camera
    pub fn new(mut scene: Scene, settings: &Settings) -> anyhow::Result<Self> {
        let sim = Simulation::default();
        let state = &sim.state;

        let paddle_scale = Vec3::splat(PADDLE_SCALE);
        let paddles = [
            scene.add_object(
                "Spin",
                state.paddles[0].position,
                state.paddles[0].rotation(),
                paddle_scale,
            )?,
            scene.add_object(
                "Spin",
                state.paddles[1].position,
                state.paddles[1].rotation(),
                paddle_scale,
            )?,
        ];
        let ball = scene.add_object(
            "Ball",
            state.ball.position,
            Quat::IDENTITY,
            Vec3::splat(BALL_SCALE),
        )?;

        let rig = settings.camera.orbit;
        scene.camera.transform = rig.transform();

        Ok(Self {
            sim,
            scene,
            rig,
            pointer: PointerTracker::new(settings.window.width, settings.window.height),
            bindings: settings.bindings,
            banner_policy: settings.banner_policy,
            paddles,
            ball,
            banners: Vec::new(),
            score: Score::default(),
        })
    }

    /// Run one frame: camera drags, quit check, simulation, scene sync
    pub fn frame(&mut self, input: &InputSnapshot, elapsed: f32) -> anyhow::Result<FrameOutcome> {
        for motion in &input.pointer {
            let delta = self.pointer.motion(motion.x, motion.y);
            if motion.button_held {
                self.rig.drag(delta);
            }
        }

        if self.bindings.wants_quit(input) {
            log::info!("Quit requested");
            return Ok(FrameOutcome {
                quit: true,
                events: Vec::new(),
            });
        }

        let events = self.sim.step(&self.bindings.sample(input), elapsed);
        self.sync_transforms();

        for event in &events {
            if let GameEvent::RoundWon { winner } = *event {
                match winner {
                    Side::Left => self.score.left += 1,
                    Side::Right => self.score.right += 1,
                }
                self.show_banner(winner)?;
            }
        }

        self.scene.camera.transform = self.rig.transform();

        Ok(FrameOutcome {
            quit: false,
            events,
        })
    }

    /// Copy simulation state into the scene objects
    fn sync_transforms(&mut self) {
        let state = &self.sim.state;
        for (handle, paddle) in self.paddles.iter().zip(state.paddles.iter()) {
            let t = self.scene.transform_mut(*handle);
            t.position = paddle.position;
            t.rotation = paddle.rotation();
        }
        self.scene.transform_mut(self.ball).position = state.ball.position;
    }

    fn show_banner(&mut self, winner: Side) -> anyhow::Result<()> {
        let mesh = banner_mesh(winner);
        let reuse = match self.banner_policy {
            BannerPolicy::ReplacePrevious => self.banners.last().copied(),
            BannerPolicy::Accumulate => None,
        };

        match reuse {
            Some(handle) => self.scene.set_mesh(handle, mesh)?,
            None => {
                let rotation = Quat::from_axis_angle(Vec3::X, BANNER_TILT);
                let handle = self
                    .scene
                    .add_object(mesh, BANNER_POSITION, rotation, BANNER_SCALE)?;
                self.banners.push(handle);
            }
        }

        log::info!(
            "Score: left {} - right {} ({} banner objects, {})",
            self.score.left,
            self.score.right,
            self.banners.len(),
            self.banner_policy.as_str()
        );
        Ok(())
    }

    pub fn paddle_handles(&self) -> [ObjectHandle; 2] {
        self.paddles
    }

    pub fn ball_handle(&self) -> ObjectHandle {
        self.ball
    }

    /// Banner objects currently shown, oldest first
    pub fn banners(&self) -> &[ObjectHandle] {
        &self.banners
    }
}
