//! This module handles music playback and the cross-thread track selector.
//!
//! All mixer state lives on a dedicated music thread. The game thread never
//! touches the audio device; it publishes [`TrackCue`]s through a shared
//! [`TrackSelector`] which the music thread polls at a fixed interval.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Result};
use bevy_ecs::resource::Resource;
use sdl2::mixer::{self, InitFlag, Music, AUDIO_S16LSB};
use tracing::{debug, info, warn};

use crate::asset::Asset;
use crate::constants::{TRACK_POLL_INTERVAL, TRACK_SETTLE_DELAY};
use crate::error::GameResult;

const AUDIO_FREQUENCY: i32 = 44_100;
const AUDIO_CHANNELS: i32 = 2;
const CHUNK_SIZE: i32 = 1_024;

/// What the game wants the music thread to do, encoded through the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackCue {
    /// Halt playback and wait.
    Silence,
    /// Loop the numbered track until further notice.
    Track(u8),
    /// Release the audio device and end the music thread.
    Shutdown,
}

impl TrackCue {
    /// Encodes the cue as the raw selector integer.
    pub const fn to_raw(self) -> i32 {
        match self {
            TrackCue::Silence => 0,
            TrackCue::Track(n) => n as i32,
            TrackCue::Shutdown => -1,
        }
    }

    /// Decodes a raw selector integer. Every negative value reads as shutdown;
    /// track numbers beyond one byte saturate.
    pub fn from_raw(raw: i32) -> TrackCue {
        match raw {
            0 => TrackCue::Silence,
            n if n > 0 => TrackCue::Track(n.min(i32::from(u8::MAX)) as u8),
            _ => TrackCue::Shutdown,
        }
    }
}

/// Shared handle the game thread writes cues through and the music thread polls.
///
/// Clones share a single atomic cell. Writes use release ordering and reads
/// acquire, so a cue published after game-side cleanup is only ever observed
/// after that cleanup.
#[derive(Resource, Clone, Debug)]
pub struct TrackSelector(Arc<AtomicI32>);

impl TrackSelector {
    pub fn new(initial: TrackCue) -> Self {
        Self(Arc::new(AtomicI32::new(initial.to_raw())))
    }

    /// Publishes a cue. Last write wins.
    pub fn select(&self, cue: TrackCue) {
        self.0.store(cue.to_raw(), Ordering::Release);
    }

    /// The most recently published cue.
    pub fn current(&self) -> TrackCue {
        TrackCue::from_raw(self.0.load(Ordering::Acquire))
    }
}

/// Change detection for the polling side of the selector.
#[derive(Debug)]
pub struct TrackWatcher {
    last_seen: TrackCue,
}

impl TrackWatcher {
    pub fn new(initial: TrackCue) -> Self {
        Self { last_seen: initial }
    }

    /// Returns the cue if it differs from the last one observed.
    pub fn observe(&mut self, cue: TrackCue) -> Option<TrackCue> {
        if cue == self.last_seen {
            return None;
        }
        self.last_seen = cue;
        Some(cue)
    }
}

/// The music file behind a track number.
fn track_asset(track: u8) -> Option<Asset> {
    match track {
        1 => Some(Asset::TownTheme),
        2 => Some(Asset::CenterTheme),
        3 => Some(Asset::RuinsTheme),
        _ => None,
    }
}

/// Mixer state owned by the music thread: the opened device and every track
/// that loaded successfully.
struct MusicPlayer {
    _mixer_context: mixer::Sdl2MixerContext,
    tracks: HashMap<u8, Music<'static>>,
}

impl MusicPlayer {
    fn try_new() -> Result<Self> {
        mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, AUDIO_CHANNELS, CHUNK_SIZE)
            .map_err(|e| anyhow!("Failed to open audio: {}", e))?;

        let mixer_context = mixer::init(InitFlag::OGG).map_err(|e| anyhow!("Failed to initialize SDL2_mixer: {}", e))?;

        // Load whatever tracks are present; a missing file costs one track,
        // not the whole music system.
        let tracks: HashMap<u8, Music<'static>> = (1..=u8::MAX)
            .map_while(|track| track_asset(track).map(|asset| (track, asset)))
            .filter_map(|(track, asset)| match Music::from_file(asset.path()) {
                Ok(music) => Some((track, music)),
                Err(e) => {
                    warn!(track, path = asset.path(), "Failed to load track: {}", e);
                    None
                }
            })
            .collect();

        if tracks.is_empty() {
            return Err(anyhow!("No tracks loaded successfully"));
        }

        Ok(MusicPlayer {
            _mixer_context: mixer_context,
            tracks,
        })
    }

    /// Starts a track looping forever. Unknown or unloaded tracks log and play nothing.
    fn play(&self, track: u8) {
        match self.tracks.get(&track) {
            Some(music) => {
                if let Err(e) = music.play(-1) {
                    warn!(track, "Could not play track: {}", e);
                }
            }
            None => warn!(track, "Selected track is not loaded"),
        }
    }

    /// Halts whatever is playing. Harmless when nothing is.
    fn halt(&self) {
        Music::halt();
    }

    /// Frees every track, then closes the device.
    fn shutdown(self) {
        let MusicPlayer { _mixer_context, tracks } = self;
        drop(tracks);
        mixer::close_audio();
    }
}

/// Spawns the music thread.
///
/// The thread owns all mixer state; the game communicates with it exclusively
/// through `selector`. Publish [`TrackCue::Shutdown`] and join the returned
/// handle to stop it.
///
/// # Errors
///
/// Returns an error if the OS refuses to spawn the thread. Audio device
/// failures are not errors here; the thread logs them and ends, and the game
/// plays on without music.
pub fn spawn_music_thread(selector: TrackSelector) -> GameResult<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("music".into())
        .spawn(move || music_loop(&selector))?;
    Ok(handle)
}

/// Polls the selector until a shutdown cue arrives.
///
/// On every observed change: halt playback, let the device settle, then
/// dispatch the new cue. Unchanged selector values are never re-dispatched,
/// so a looping track keeps looping across polls.
fn music_loop(selector: &TrackSelector) {
    let player = match MusicPlayer::try_new() {
        Ok(player) => player,
        Err(e) => {
            warn!("Failed to initialize audio: {}. Music will be disabled.", e);
            return;
        }
    };

    info!("Music thread ready");
    let mut watcher = TrackWatcher::new(TrackCue::Silence);

    loop {
        if let Some(cue) = watcher.observe(selector.current()) {
            debug!(?cue, "Track cue changed");
            player.halt();
            thread::sleep(TRACK_SETTLE_DELAY);

            match cue {
                TrackCue::Shutdown => break,
                TrackCue::Silence => {}
                TrackCue::Track(track) => player.play(track),
            }
        }

        thread::sleep(TRACK_POLL_INTERVAL);
    }

    player.shutdown();
    info!("Music thread stopped");
}
