//! Ripplecatch - drag across the water to make ripples, click creatures to catch them.
//!
//! Keys: 1/2/3 switch zone, B cycles bait, O cycles ocean state, Esc quits.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ripplecatch::cli::Args;
use ripplecatch::events::GameEvent;
use ripplecatch::frame_loop::{FrameLoop, LoopControl};
use ripplecatch::params::{RecordingConfig, ZoneId};
use ripplecatch::recording::{FrameRecorder, RecordingError};
use ripplecatch::rendering::Presenter;
use ripplecatch::simulation::{Simulation, SimulationConfig};

/// Hits needed to defeat the boss
const BOSS_MAX_HEALTH: u32 = 10;

/// Frames between scripted clicks in recording mode
const RECORD_CLICK_INTERVAL: u64 = 45;

/// Game state the core leaves to its host: money and boss health
#[derive(Debug, Default)]
struct Purse {
    total: u64,
    catches: u32,
    boss_health: u32,
}

impl Purse {
    /// Apply a core event, updating the simulation when the boss falls
    fn handle(&mut self, event: GameEvent, sim: &mut Simulation) {
        match event {
            GameEvent::Capture {
                species_name,
                value,
                spawn_chance,
            } => {
                self.total += value as u64;
                self.catches += 1;
                log::info!(
                    "Caught {} (+{}, chance {:.3}%) - purse {}",
                    species_name,
                    value,
                    spawn_chance * 100.0,
                    self.total
                );
            }
            GameEvent::BossHit => {
                self.boss_health = self.boss_health.saturating_sub(1);
                sim.set_boss_health(self.boss_health as f32 / BOSS_MAX_HEALTH as f32);
                log::info!("Boss hit! {}/{}", self.boss_health, BOSS_MAX_HEALTH);

                if self.boss_health == 0 {
                    let reward = boss_reward(sim);
                    self.total += reward;
                    log::info!("Boss defeated (+{}) - purse {}", reward, self.total);
                    self.enter_zone(ZoneId::Surface, sim);
                }
            }
        }
    }

    /// Move to another zone; re-entering the current one keeps a fight going
    fn enter_zone(&mut self, zone: ZoneId, sim: &mut Simulation) {
        if zone == sim.zone() {
            return;
        }
        sim.set_zone(zone);
        if zone.is_boss_zone() {
            self.start_boss_fight(sim);
        }
    }

    fn start_boss_fight(&mut self, sim: &mut Simulation) {
        self.boss_health = BOSS_MAX_HEALTH;
        sim.set_boss_health(1.0);
    }
}

fn boss_reward(sim: &Simulation) -> u64 {
    let director = sim.scene().director();
    director
        .boss()
        .and_then(|boss| director.species_of(boss))
        .map_or(0, |species| species.value as u64)
}

/// Everything alive while the window is open
struct Running {
    window: Arc<Window>,
    presenter: Presenter,
    sim: Simulation,
    purse: Purse,
    cursor: Option<PhysicalPosition<f64>>,
}

impl Running {
    fn update_title(&self) {
        self.window.set_title(&format!(
            "Ripplecatch - {} | bait: {} | ocean: {} | purse: {}",
            self.sim.zone(),
            self.sim.bait(),
            self.sim.ocean_state(),
            self.purse.total
        ));
    }
}

/// Main application state
struct App {
    config: SimulationConfig,
    frames: FrameLoop<Running>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            frames: FrameLoop::new(),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let render = &self.config.render;
        let window_attributes = Window::default_attributes()
            .with_title("Ripplecatch")
            .with_inner_size(winit::dpi::LogicalSize::new(
                render.window_width,
                render.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let presenter = pollster::block_on(Presenter::new(Arc::clone(&window)))
            .context("failed to initialize rendering")?;

        let mut sim = Simulation::init(self.config.clone());
        let size = window.inner_size();
        sim.resize(size.width, size.height);

        let mut purse = Purse::default();
        if sim.zone().is_boss_zone() {
            purse.start_boss_fight(&mut sim);
        }

        let running = Running {
            window,
            presenter,
            sim,
            purse,
            cursor: None,
        };
        running.update_title();

        self.frames.run(running, |running, _frame| {
            let Some(frame) = running.sim.step() else {
                return LoopControl::Continue;
            };
            match running.presenter.present(frame) {
                Ok(()) => LoopControl::Continue,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    running.presenter.reconfigure();
                    LoopControl::Continue
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Surface out of memory");
                    LoopControl::Stop
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    LoopControl::Continue
                }
            }
        });

        println!("\nRipplecatch is running!");
        println!("Click creatures to catch them. 1/2/3 zone, B bait, O ocean, ESC quits\n");
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut running) = self.frames.stop() {
            running.sim.dispose();
            log::info!(
                "Caught {} creatures, purse {}",
                running.purse.catches,
                running.purse.total
            );
        }
        event_loop.exit();
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        if key == KeyCode::Escape {
            self.shutdown(event_loop);
            return;
        }
        let Some(running) = self.frames.state_mut() else {
            return;
        };

        let sim = &mut running.sim;
        match key {
            KeyCode::Digit1 => running.purse.enter_zone(ZoneId::Surface, sim),
            KeyCode::Digit2 => running.purse.enter_zone(ZoneId::DiamondPit, sim),
            KeyCode::Digit3 => running.purse.enter_zone(ZoneId::AbyssalVoid, sim),
            KeyCode::KeyB => sim.set_bait(sim.bait().next()),
            KeyCode::KeyO => sim.set_ocean_state(sim.ocean_state().next()),
            _ => return,
        }
        running.update_title();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frames.is_running() {
            // The frame callback gave up (surface out of memory)
            if self.frames.state().is_some() {
                self.shutdown(event_loop);
            }
            return;
        }
        if let Some(running) = self.frames.state() {
            running.window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.frames.state().is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.start(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key, event_loop),
            WindowEvent::Resized(size) => {
                if let Some(running) = self.frames.state_mut() {
                    running.presenter.resize(size.width, size.height);
                    running.sim.resize(size.width, size.height);
                }
            }
            WindowEvent::Occluded(occluded) => self.frames.set_visible(!occluded),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(running) = self.frames.state_mut() {
                    running.cursor = Some(position);
                    running.sim.pointer_move(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let Some(running) = self.frames.state_mut() else {
                    return;
                };
                let Some(position) = running.cursor else {
                    return;
                };
                if let Some(event) = running
                    .sim
                    .pointer_primary(position.x as f32, position.y as f32)
                {
                    running.purse.handle(event, &mut running.sim);
                    running.update_title();
                }
            }
            WindowEvent::RedrawRequested => {
                self.frames.tick();
            }
            _ => {}
        }
    }
}

/// State of a headless recording run
struct Recording {
    sim: Simulation,
    recorder: FrameRecorder,
    purse: Purse,
    error: Option<RecordingError>,
}

/// Pointer path used while recording: a slow figure eight over the display
fn scripted_pointer(frame: u64, fps: u32, width: u32, height: u32) -> Vec2 {
    let t = frame as f32 / fps.max(1) as f32;
    Vec2::new(
        width as f32 * (0.5 + 0.35 * (t * 0.9).sin()),
        height as f32 * (0.5 + 0.3 * (t * 1.8).sin()),
    )
}

/// Run the simulation without a window and save every frame as PNG
fn record(config: SimulationConfig, recording: RecordingConfig) -> anyhow::Result<()> {
    let (width, height) = (config.render.window_width, config.render.window_height);
    let fps = recording.fps;

    let mut sim = Simulation::init(config);
    sim.resize(width, height);
    if !sim.scene().field().is_ready() {
        anyhow::bail!(
            "a {}x{} display leaves no water to record at this resolution divisor",
            width,
            height
        );
    }
    let mut purse = Purse::default();
    if sim.zone().is_boss_zone() {
        purse.start_boss_fight(&mut sim);
    }

    let recorder = FrameRecorder::create(recording).context("failed to prepare recording")?;
    let mut frames = FrameLoop::new();
    frames.run(
        Recording {
            sim,
            recorder,
            purse,
            error: None,
        },
        move |state: &mut Recording, frame| {
            let pointer = scripted_pointer(frame, fps, width, height);
            state.sim.pointer_move(pointer.x, pointer.y);

            // Aim the periodic click at the oldest creature
            if frame % RECORD_CLICK_INTERVAL == RECORD_CLICK_INTERVAL - 1 {
                let target = state
                    .sim
                    .scene()
                    .director()
                    .instances()
                    .first()
                    .and_then(|creature| state.sim.display_point(creature.position));
                if let Some(target) = target {
                    if let Some(event) = state.sim.pointer_primary(target.x, target.y) {
                        state.purse.handle(event, &mut state.sim);
                    }
                }
            }

            if let Some(image) = state.sim.step() {
                if let Err(e) = state.recorder.capture(image) {
                    state.error = Some(e);
                    return LoopControl::Stop;
                }
            }

            if state.recorder.is_finished() {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        },
    );

    while frames.tick() {}

    let Some(mut state) = frames.stop() else {
        return Ok(());
    };
    state.sim.dispose();
    if let Some(e) = state.error {
        return Err(e.into());
    }

    println!(
        "Recorded {} frames to {} ({} catches, purse {})",
        state.recorder.frames_written(),
        state.recorder.config().frames_dir(),
        state.purse.catches,
        state.purse.total
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.simulation_config();

    if let Some(recording) = args.recording_config() {
        return record(config, recording).context("recording failed");
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
