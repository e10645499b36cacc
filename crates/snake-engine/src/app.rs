//! Application lifecycle management.
//!
//! Owns the window and renderer and drives the game loop once per redraw.

use anyhow::Result;
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use snake_gameplay::{
    DirectionInput, FrameReport, GameLoop, GameSettings, GameState, RenderSink,
};

use crate::config::EngineConfig;
use crate::input::InputHandler;
use crate::renderer::Renderer;
use crate::timing::{FpsCounter, FrameTiming, GameClock};

/// Window title.
const WINDOW_TITLE: &str = "Snake";

/// Why the application is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    /// Quit key pressed
    Quit,
    /// Window closed
    Closed,
    /// The game ended with this score
    GameOver(usize),
    /// Presenting a frame failed
    RenderFailed,
}

/// One game and the clock it runs on, started once the renderer exists.
struct Session {
    game: GameLoop,
    clock: GameClock,
}

impl Session {
    /// Starts the clock and the game at time zero.
    fn start(settings: &GameSettings) -> Self {
        let clock = GameClock::new();
        let game = GameLoop::new(settings, clock.now());
        Self { game, clock }
    }

    /// Runs one game frame at the current clock time.
    fn frame<S: RenderSink + ?Sized>(
        &mut self,
        input: &DirectionInput,
        sink: &mut S,
    ) -> FrameReport {
        self.game.frame(input, self.clock.now(), sink)
    }
}

/// Application state machine.
struct SnakeApp {
    /// Engine configuration
    config: EngineConfig,
    /// Renderer (initialized after window creation, dropped before it)
    renderer: Option<Renderer>,
    /// Window handle (created after resume)
    window: Option<Window>,

    // === Game Systems ===
    /// Running game (created after the renderer)
    session: Option<Session>,
    /// Input handler
    input: InputHandler,
    /// Frame timing
    timing: FrameTiming,
    /// FPS counter, present only when FPS logging is on
    fps_counter: Option<FpsCounter>,
    /// Set once shutdown has begun
    exit: Option<ExitReason>,
}

impl SnakeApp {
    /// Creates a new application instance.
    fn new(config: EngineConfig) -> Self {
        let timing = FrameTiming::new(config.target_fps).with_vsync(config.vsync);
        let input = InputHandler::with_keys(&config.keys);
        let fps_counter = config.show_fps.then(FpsCounter::new);

        Self {
            config,
            renderer: None,
            window: None,

            session: None,
            input,
            timing,
            fps_counter,
            exit: None,
        }
    }

    /// Score of the finished game, if it ended by collision or a full board.
    fn final_score(&self) -> Option<usize> {
        match self.exit {
            Some(ExitReason::GameOver(score)) => Some(score),
            _ => None,
        }
    }

    /// Runs one frame: input, simulation, present.
    fn update_and_render(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit.is_some() {
            return;
        }

        let dt = self.timing.begin_frame();

        if let Some(counter) = self.fps_counter.as_mut() {
            if let Some((fps, frame_time)) = counter.tick(dt) {
                debug!("FPS: {fps:.1}, Frame: {frame_time:.2}ms");
            }
        }

        if self.input.quit_pressed() {
            self.shutdown(event_loop, ExitReason::Quit);
            return;
        }

        let (Some(renderer), Some(session)) = (self.renderer.as_mut(), self.session.as_mut())
        else {
            return;
        };

        let input = self.input.direction_input();
        let report = session.frame(&input, renderer);
        self.input.end_frame();

        if let Err(e) = renderer.present() {
            error!("Render failed: {e}");
            self.shutdown(event_loop, ExitReason::RenderFailed);
            return;
        }

        if let GameState::GameOver { score, .. } = report.state {
            self.shutdown(event_loop, ExitReason::GameOver(score));
            return;
        }

        self.timing.sleep_remainder();
    }

    /// Records the exit reason. Returns false if shutdown already began.
    fn begin_exit(&mut self, reason: ExitReason) -> bool {
        if self.exit.is_some() {
            return false;
        }
        match reason {
            ExitReason::Quit => info!("Escape pressed, shutting down..."),
            ExitReason::Closed => info!("Close requested, shutting down..."),
            ExitReason::GameOver(score) => info!("Game over! Score: {score}"),
            ExitReason::RenderFailed => info!("Shutting down after render failure"),
        }
        self.exit = Some(reason);
        true
    }

    /// Saves config and stops the event loop, once.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop, reason: ExitReason) {
        if !self.begin_exit(reason) {
            return;
        }
        if let Err(e) = self.config.save() {
            warn!("Failed to save config: {e}");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for SnakeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        info!("Application resumed, creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                info!("Window created successfully");

                match pollster::block_on(Renderer::new(&window, self.config.vsync)) {
                    Ok(renderer) => {
                        self.renderer = Some(renderer);
                        self.session = Some(Session::start(&self.config.game_settings()));
                    },
                    Err(e) => {
                        warn!("Failed to initialize renderer: {e:#}");
                        event_loop.exit();
                        return;
                    },
                }

                window.request_redraw();
                self.window = Some(window);

                // Reset timing after window creation
                self.timing.reset();

                info!(
                    "Snake ready - {}x{} @ {} ticks/s",
                    self.config.window_width,
                    self.config.window_height,
                    self.config.ticks_per_second
                );
            },
            Err(e) => {
                warn!("Failed to create window: {e}");
                event_loop.exit();
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.input.handle_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop, ExitReason::Closed);
            },
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            },
            WindowEvent::RedrawRequested => {
                self.update_and_render(event_loop);

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            },
            _ => {},
        }
    }
}

/// Runs the main application loop.
///
/// Returns the final score if the game ended by collision.
pub fn run() -> Result<Option<usize>> {
    let config = EngineConfig::load();

    info!("Configuration loaded:");
    info!("  Window: {}x{}", config.window_width, config.window_height);
    info!("  VSync: {}", config.vsync);
    info!("  Speed: {} ticks/s", config.ticks_per_second);

    info!("Creating event loop...");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SnakeApp::new(config);

    info!("Starting event loop...");
    event_loop.run_app(&mut app)?;

    Ok(app.final_score())
}
