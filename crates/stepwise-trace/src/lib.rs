//! Stepwise Trace
//!
//! Record an algorithm run as a linear, replayable sequence of snapshots and
//! play it back.
//!
//! # Architecture
//!
//! - **Snapshot / Trace**: immutable per-step records in a sealed sequence
//! - **Recorder**: append-only builder that instrumented algorithms call into
//! - **Call stack**: explicit recursion frames carried in each snapshot
//! - **Playback**: cursor over a trace with clamped stepping and seeking
//! - **Player**: tokio timer that drives playback during autoplay
//!
//! # Usage
//!
//! ```ignore
//! let mut recorder = Recorder::new(MyState::default());
//! recorder.record("compare a[0] and a[1]", Some(3), |s| s.comparisons += 1);
//! let trace = recorder.finish();
//!
//! let mut player = Player::from_config(trace, &PlayerConfig::default());
//! player.play().await;
//! ```

mod callstack;
mod config;
mod error;
mod playback;
mod player;
mod recorder;
mod snapshot;

pub use callstack::{stack_events, CallStack, Frame, HasCallStack, Side, Span, StackEvent};
pub use config::PlayerConfig;
pub use error::{Error, Result};
pub use playback::{
    Key, Playback, PlaybackCommand, PlaybackSpeed, PlaybackState, PlaybackStatus,
    DEFAULT_INTERVAL, MIN_INTERVAL,
};
pub use player::Player;
pub use recorder::Recorder;
pub use snapshot::{Snapshot, StepState, Trace};
