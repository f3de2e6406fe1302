use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use sdl2::image::{InitFlag, Sdl2ImageContext};
use sdl2::{AudioSubsystem, Sdl};
use tracing::{debug, info, warn};

use crate::asset::TextureManifest;
use crate::audio::{spawn_music_thread, TrackCue, TrackSelector};
use crate::constants::{CANVAS_SIZE, LOOP_TIME, SCALE};
use crate::error::{GameError, GameResult};
use crate::game::Game;

/// Main application wrapper that manages SDL initialization, window lifecycle,
/// the music thread, and the game loop.
pub struct App {
    pub game: Game,
    selector: TrackSelector,
    music_thread: Option<JoinHandle<()>>,
    last_tick: Instant,
    // Keep SDL alive for the app lifetime so subsystems (audio) are not shut down
    _sdl_context: Sdl,
    _audio_subsystem: AudioSubsystem,
    _image_context: Sdl2ImageContext,
}

impl App {
    /// Initializes SDL subsystems, creates the game window, starts the music
    /// thread, and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or
    /// propagates errors from texture loading and `Game::new()`.
    pub fn new() -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(|e| GameError::Sdl(e.to_string()))?;

        debug!("Initializing SDL2 subsystems");
        let video_subsystem = sdl_context.video().map_err(|e| GameError::Sdl(e.to_string()))?;
        let audio_subsystem = sdl_context.audio().map_err(|e| GameError::Sdl(e.to_string()))?;
        let image_context = sdl2::image::init(InitFlag::PNG).map_err(|e| GameError::Sdl(e.to_string()))?;
        let event_pump = sdl_context.event_pump().map_err(|e| GameError::Sdl(e.to_string()))?;

        debug!(
            width = (CANVAS_SIZE.x as f32 * SCALE).round() as u32,
            height = (CANVAS_SIZE.y as f32 * SCALE).round() as u32,
            scale = SCALE,
            "Creating game window"
        );
        let window = video_subsystem
            .window(
                "Perllert",
                (CANVAS_SIZE.x as f32 * SCALE).round() as u32,
                (CANVAS_SIZE.y as f32 * SCALE).round() as u32,
            )
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let texture_creator = canvas.texture_creator();
        let textures = TextureManifest::load(&texture_creator)?;

        // The selector is the only thing shared with the music thread. It
        // starts silent; Game::new() cues the starting map's theme.
        let selector = TrackSelector::new(TrackCue::Silence);
        let music_thread = spawn_music_thread(selector.clone())?;

        info!("Starting game initialization");
        let game = Game::new(canvas, textures, event_pump, selector.clone())?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            selector,
            music_thread: Some(music_thread),
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
            _audio_subsystem: audio_subsystem,
            _image_context: image_context,
        })
    }

    /// Executes a single frame of the game loop with consistent timing.
    ///
    /// Calculates delta time since the last frame, runs game logic via
    /// `game.tick()`, and limits the frame rate by sleeping for the
    /// remaining time if the frame finished early.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        let exit = self.game.tick(dt);
        if exit {
            return false;
        }

        // Sleep if we still have time left
        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        }

        true
    }

    /// Tears the application down in dependency order: the game world first,
    /// then the shutdown cue, then the music thread join.
    ///
    /// The selector is never written again after the shutdown cue, so the
    /// music thread's final observation is always the shutdown.
    pub fn shutdown(self) {
        info!("Shutting down");
        let App {
            game,
            selector,
            music_thread,
            _sdl_context,
            _audio_subsystem,
            _image_context,
            ..
        } = self;

        drop(game);

        selector.select(TrackCue::Shutdown);
        if let Some(handle) = music_thread {
            if handle.join().is_err() {
                warn!("Music thread panicked");
            }
        }
        info!("Shutdown complete");
    }
}
