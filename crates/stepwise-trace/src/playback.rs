//! Playback controls for a recorded trace.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::snapshot::{Snapshot, Trace};

/// Autoplay delay used when nothing else is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(800);

/// Shortest autoplay delay accepted; shorter requests are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Playback speed preset, relative to a base delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    /// 0.25x speed
    QuarterSpeed,
    /// 0.5x speed
    HalfSpeed,
    /// Normal speed (1x)
    #[default]
    Normal,
    /// 2x speed
    Double,
    /// 4x speed
    Quadruple,
    /// 10x speed
    TenX,
}

impl PlaybackSpeed {
    /// Get the speed multiplier.
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::QuarterSpeed => 0.25,
            PlaybackSpeed::HalfSpeed => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
            PlaybackSpeed::TenX => 10.0,
        }
    }

    /// Delay between autoplay steps at this speed.
    pub fn interval(&self, base: Duration) -> Duration {
        base.div_f64(self.multiplier()).max(MIN_INTERVAL)
    }
}

impl FromStr for PlaybackSpeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0.25x" | "quarter" => Ok(PlaybackSpeed::QuarterSpeed),
            "0.5x" | "half" => Ok(PlaybackSpeed::HalfSpeed),
            "1x" | "normal" => Ok(PlaybackSpeed::Normal),
            "2x" | "double" => Ok(PlaybackSpeed::Double),
            "4x" => Ok(PlaybackSpeed::Quadruple),
            "10x" => Ok(PlaybackSpeed::TenX),
            _ => Err(Error::UnknownSpeed(s.to_string())),
        }
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Not started, or stopped and rewound
    Stopped,
    /// Autoplay is advancing the cursor
    Playing,
    /// Autoplay was interrupted
    Paused,
    /// Autoplay ran off the last snapshot
    Finished,
}

/// Everything a UI can ask the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackCommand {
    StepForward,
    StepBackward,
    Seek { index: usize },
    Play,
    Pause,
    Toggle,
    Stop,
    SetSpeed { interval_ms: u64 },
}

/// Keys a viewer binds to playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Home,
    End,
}

impl Key {
    /// The command this key triggers. Holding a key repeats it safely.
    pub fn command(self) -> PlaybackCommand {
        match self {
            Key::Left => PlaybackCommand::StepBackward,
            Key::Right => PlaybackCommand::StepForward,
            Key::Space => PlaybackCommand::Toggle,
            Key::Home => PlaybackCommand::Seek { index: 0 },
            // Seeks clamp, so this lands on the last snapshot.
            Key::End => PlaybackCommand::Seek { index: usize::MAX },
        }
    }
}

/// Cursor over an immutable trace.
///
/// This is the pure state machine: nothing here schedules timers. A host
/// calls [`tick`](Self::tick) once per autoplay interval (see
/// [`Player`](crate::Player) for a tokio-driven host).
#[derive(Debug)]
pub struct Playback<S> {
    trace: Trace<S>,
    cursor: usize,
    state: PlaybackState,
    interval: Duration,
}

impl<S> Playback<S> {
    /// Create a new playback controller at the first snapshot.
    pub fn new(trace: Trace<S>) -> Self {
        Self::with_interval(trace, DEFAULT_INTERVAL)
    }

    pub fn with_interval(trace: Trace<S>, interval: Duration) -> Self {
        Self {
            trace,
            cursor: 0,
            state: PlaybackState::Stopped,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Index of the snapshot on display.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots in the trace.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn trace(&self) -> &Trace<S> {
        &self.trace
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Delay between autoplay steps.
    pub fn speed(&self) -> Duration {
        self.interval
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor == self.trace.last_index()
    }

    /// The snapshot at the cursor.
    pub fn current_snapshot(&self) -> &Snapshot<S> {
        &self.trace.snapshots()[self.cursor]
    }

    /// Move the cursor, clamping into the trace.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.trace.last_index());
    }

    /// Step forward one snapshot. Returns whether the cursor moved.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step backward one snapshot, pausing autoplay. Returns whether the
    /// cursor moved.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        if self.is_playing() {
            self.state = PlaybackState::Paused;
        }
        true
    }

    /// Start autoplay, rewinding first when already at the end.
    pub fn play(&mut self) {
        if self.is_at_end() {
            self.cursor = 0;
        }
        self.state = PlaybackState::Playing;
    }

    /// Pause autoplay.
    pub fn pause(&mut self) {
        if self.is_playing() {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop playback and return to beginning.
    pub fn stop(&mut self) {
        self.cursor = 0;
        self.state = PlaybackState::Stopped;
    }

    /// Change the autoplay delay. A running timer picks it up on its next
    /// scheduled tick.
    pub fn set_speed(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_INTERVAL);
    }

    /// One autoplay tick: advance, or finish when already at the end.
    /// Returns whether autoplay should keep ticking.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if self.step_forward() {
            true
        } else {
            self.state = PlaybackState::Finished;
            false
        }
    }

    /// Run one command.
    pub fn apply(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::StepForward => {
                self.step_forward();
            }
            PlaybackCommand::StepBackward => {
                self.step_backward();
            }
            PlaybackCommand::Seek { index } => self.seek(index),
            PlaybackCommand::Play => self.play(),
            PlaybackCommand::Pause => self.pause(),
            PlaybackCommand::Toggle => self.toggle(),
            PlaybackCommand::Stop => self.stop(),
            PlaybackCommand::SetSpeed { interval_ms } => {
                self.set_speed(Duration::from_millis(interval_ms));
            }
        }
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        let last = self.trace.last_index();
        if last == 0 {
            1.0
        } else {
            self.cursor as f64 / last as f64
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }
}

/// Playback status for sending to a viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub cursor: usize,
    pub len: usize,
    pub state: PlaybackState,
    pub interval_ms: u64,
    pub progress: f64,
}

impl<S> From<&Playback<S>> for PlaybackStatus {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            cursor: playback.cursor,
            len: playback.len(),
            state: playback.state,
            interval_ms: u64::try_from(playback.interval.as_millis()).unwrap_or(u64::MAX),
            progress: playback.progress(),
        }
    }
}
