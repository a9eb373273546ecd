//! Timer-driven autoplay on top of [`Playback`].
//!
//! All commands and timer ticks go through one `tokio::sync::Mutex`, so they
//! are applied one at a time. The autoplay timer is a spawned task that is
//! aborted whenever playback pauses, the speed changes, a new trace is
//! loaded, or the player is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::PlayerConfig;
use crate::playback::{Playback, PlaybackCommand, PlaybackState, PlaybackStatus};
use crate::snapshot::{Snapshot, Trace};

/// Owns a playback controller and its autoplay timer.
#[derive(Debug)]
pub struct Player<S> {
    playback: Arc<Mutex<Playback<S>>>,
    status_tx: watch::Sender<PlaybackStatus>,
    timer: Option<JoinHandle<()>>,
}

impl<S> Player<S>
where
    S: Clone + Send + 'static,
{
    /// Create a stopped player over `trace`.
    pub fn new(trace: Trace<S>, interval: Duration) -> Self {
        let playback = Playback::with_interval(trace, interval);
        let (status_tx, _) = watch::channel(playback.status());
        Self {
            playback: Arc::new(Mutex::new(playback)),
            status_tx,
            timer: None,
        }
    }

    pub fn from_config(trace: Trace<S>, config: &PlayerConfig) -> Self {
        Self::new(trace, config.interval())
    }

    /// Receive a status update every time the cursor or state changes,
    /// including changes made by autoplay.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status_tx.subscribe()
    }

    pub async fn status(&self) -> PlaybackStatus {
        self.playback.lock().await.status()
    }

    pub async fn cursor(&self) -> usize {
        self.playback.lock().await.cursor()
    }

    pub async fn len(&self) -> usize {
        self.playback.lock().await.len()
    }

    /// A copy of the snapshot at the cursor. Changing it never touches the
    /// trace.
    pub async fn current_snapshot(&self) -> Snapshot<S> {
        self.playback.lock().await.current_snapshot().clone()
    }

    /// Whether an autoplay timer task is alive.
    pub fn is_autoplaying(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    pub async fn step_forward(&mut self) {
        self.apply(PlaybackCommand::StepForward).await;
    }

    pub async fn step_backward(&mut self) {
        self.apply(PlaybackCommand::StepBackward).await;
    }

    pub async fn seek(&mut self, index: usize) {
        self.apply(PlaybackCommand::Seek { index }).await;
    }

    pub async fn play(&mut self) {
        self.apply(PlaybackCommand::Play).await;
    }

    pub async fn pause(&mut self) {
        self.apply(PlaybackCommand::Pause).await;
    }

    pub async fn toggle(&mut self) {
        self.apply(PlaybackCommand::Toggle).await;
    }

    pub async fn stop(&mut self) {
        self.apply(PlaybackCommand::Stop).await;
    }

    pub async fn set_speed(&mut self, interval: Duration) {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self.apply(PlaybackCommand::SetSpeed { interval_ms }).await;
    }

    /// Run one command and bring the timer in line with the result.
    pub async fn apply(&mut self, command: PlaybackCommand) {
        // Publish under the lock so a concurrent tick cannot be overwritten
        // by an older status.
        let (playing, interval, speed_changed) = {
            let mut playback = self.playback.lock().await;
            let before = playback.speed();
            playback.apply(command);
            let status = playback.status();
            let playing = status.state == PlaybackState::Playing;
            self.status_tx.send_replace(status);
            (playing, playback.speed(), playback.speed() != before)
        };

        if !playing {
            self.cancel_timer();
        } else if speed_changed || !self.is_autoplaying() {
            self.cancel_timer();
            self.spawn_timer(interval);
        }
    }

    /// Replace the trace. Any running timer is cancelled first and the
    /// cursor starts over at 0.
    pub async fn load(&mut self, trace: Trace<S>) {
        self.cancel_timer();
        let mut playback = self.playback.lock().await;
        let interval = playback.speed();
        *playback = Playback::with_interval(trace, interval);
        self.status_tx.send_replace(playback.status());
        tracing::debug!(snapshots = playback.len(), "trace loaded");
    }

    fn spawn_timer(&mut self, interval: Duration) {
        let playback = Arc::clone(&self.playback);
        let status_tx = self.status_tx.clone();
        tracing::debug!(?interval, "autoplay timer started");

        self.timer = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut playback = playback.lock().await;
                let keep_going = playback.tick();
                status_tx.send_replace(playback.status());
                if !keep_going {
                    break;
                }
            }
            tracing::debug!("autoplay timer finished");
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::debug!("autoplay timer cancelled");
        }
    }
}

impl<S> Drop for Player<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
