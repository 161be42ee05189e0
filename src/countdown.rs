//! Countdown timer component for Bubble Tea applications.
//!
//! The component is a small state machine over a single countdown: a
//! configured duration, the remaining time while running, and a
//! `Ready`/`Running`/`Finished` lifecycle. It owns no rendering; the
//! application observes it through the bubbletea-rs message loop.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, new_with_interval};
//! use std::time::Duration;
//!
//! // A 90-second countdown with the default 100ms tick cadence
//! let countdown = new(Duration::from_secs(90));
//!
//! // Custom cadence for coarser updates
//! let countdown = new_with_interval(Duration::from_secs(90), Duration::from_secs(1));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_countdown::countdown::{new, FinishedMsg, Model};
//! use std::time::Duration;
//!
//! struct App {
//!     countdown: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = new(Duration::from_secs(90));
//!         let cmd = countdown.start().ok();
//!         (Self { countdown, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
//!             if finished.id == self.countdown.id() {
//!                 self.done = true;
//!                 return None;
//!             }
//!         }
//!         // Forwarding tick messages drives the countdown; the fresh
//!         // remaining time is then visible through view()/remaining().
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         if self.done {
//!             "Countdown finished!".to_string()
//!         } else {
//!             format!("Time remaining: {}", self.countdown.view())
//!         }
//!     }
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates unique identifiers for countdown instances.
///
/// Each model created gets its own ID so that several countdowns can coexist
/// in one application without picking up each other's messages.
fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Default tick cadence: ten updates per second.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle state of a countdown.
///
/// The only transitions are `Ready -> Running` (via [`Model::start`]),
/// `Running -> Finished` (time elapses), `Running -> Ready` and
/// `Finished -> Ready` (via [`Model::reset`]), and `Finished -> Running`
/// (via [`Model::start`] again).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Armed but not counting; remaining time equals the configured duration.
    Ready,
    /// Counting down; remaining time decreases toward zero.
    Running,
    /// The countdown reached zero; remaining time is zero.
    Finished,
}

/// Error returned when an operation is not valid in the current state.
///
/// Produced by [`Model::start`] and [`Model::set_duration`] when the
/// countdown is already running. The model is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{op} is not valid while the countdown is running")]
pub struct InvalidTransition {
    /// The rejected operation, e.g. `"start"`.
    pub op: &'static str,
}

/// Message delivered on every tick cadence point while the countdown runs.
///
/// Forward it to [`Model::update`]; afterwards [`Model::remaining`] and
/// [`Model::view`] reflect the newly observed remaining time. Ticks carry
/// the id of the instance that scheduled them and an internal schedule tag,
/// so stale ticks from before a `reset()` or restart are dropped instead of
/// being applied.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The unique identifier of the countdown that scheduled this tick.
    pub id: i64,
    /// Schedule generation this tick belongs to. A tick scheduled before the
    /// most recent `start()`/`reset()` carries an older tag and is ignored.
    tag: i64,
}

/// Message delivered exactly once when the countdown reaches zero.
///
/// It arrives after the final tick has been processed, i.e. after the model
/// has already transitioned to [`State::Finished`] with zero remaining.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// The unique identifier of the countdown that finished.
    pub id: i64,
}

/// A single countdown timer.
///
/// Owns a configurable duration and tracks remaining time while running.
/// Remaining time is computed from the instant `start()` was called rather
/// than accumulated tick by tick, so it cannot drift, and successive
/// observations are non-increasing.
#[derive(Debug, Clone)]
pub struct Model {
    /// How frequently the countdown ticks while running.
    pub interval: Duration,
    duration: Duration,
    remaining: Duration,
    started_at: Option<Instant>,
    state: State,
    id: i64,
    tag: i64,
}

/// Creates a countdown of the given duration with the default cadence.
///
/// The model starts in [`State::Ready`] with the full duration remaining;
/// nothing is scheduled until [`Model::start`] is called.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, State};
/// use std::time::Duration;
///
/// let countdown = new(Duration::from_secs(90));
/// assert_eq!(countdown.state(), State::Ready);
/// assert_eq!(countdown.remaining(), Duration::from_secs(90));
/// ```
pub fn new(duration: Duration) -> Model {
    new_with_interval(duration, DEFAULT_INTERVAL)
}

/// Creates a countdown with a custom tick cadence.
///
/// The cadence only controls how often the application is notified; the
/// remaining time itself is derived from wall-clock elapsed time.
pub fn new_with_interval(duration: Duration, interval: Duration) -> Model {
    Model {
        interval,
        duration,
        remaining: duration,
        started_at: None,
        state: State::Ready,
        id: next_id(),
        tag: 0,
    }
}

impl Model {
    /// Returns the unique identifier of this countdown instance.
    ///
    /// Use it to match [`TickMsg`] and [`FinishedMsg`] to the right instance
    /// when running more than one countdown in the same program.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the configured countdown duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the remaining time.
    ///
    /// While running this is computed live as `duration - elapsed`, clamped
    /// to zero; in [`State::Ready`] it equals the configured duration and in
    /// [`State::Finished`] it is zero.
    pub fn remaining(&self) -> Duration {
        match (self.state, self.started_at) {
            (State::Running, Some(started)) => self.duration.saturating_sub(started.elapsed()),
            _ => self.remaining,
        }
    }

    /// Returns whether the countdown is currently running.
    pub fn running(&self) -> bool {
        self.state == State::Running
    }

    /// Returns whether the countdown has reached zero.
    pub fn finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Reconfigures the countdown duration.
    ///
    /// Only valid while not running: returns [`InvalidTransition`] (leaving
    /// the duration untouched) if called in [`State::Running`]. Otherwise the
    /// new duration is stored, the remaining time is reset to it, and the
    /// countdown returns to [`State::Ready`] — reconfiguring a finished
    /// countdown re-arms it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    /// use std::time::Duration;
    ///
    /// let mut countdown = new(Duration::from_secs(90));
    /// countdown.set_duration(Duration::from_secs(30)).unwrap();
    /// assert_eq!(countdown.remaining(), Duration::from_secs(30));
    /// ```
    pub fn set_duration(&mut self, duration: Duration) -> Result<(), InvalidTransition> {
        if self.state == State::Running {
            return Err(InvalidTransition { op: "set_duration" });
        }
        self.duration = duration;
        self.remaining = duration;
        self.state = State::Ready;
        Ok(())
    }

    /// Starts the countdown and returns the command that begins ticking.
    ///
    /// Valid from [`State::Ready`] and [`State::Finished`] (a finished
    /// countdown restarts with its full duration). Returns
    /// [`InvalidTransition`] if already running, leaving the live tick
    /// schedule untouched.
    ///
    /// The returned [`Cmd`] must be handed to the bubbletea runtime; it
    /// produces the first [`TickMsg`] after one interval.
    pub fn start(&mut self) -> Result<Cmd, InvalidTransition> {
        if self.state == State::Running {
            return Err(InvalidTransition { op: "start" });
        }
        self.started_at = Some(Instant::now());
        self.remaining = self.duration;
        self.state = State::Running;
        self.tag += 1;
        debug!(id = self.id, duration_ms = self.duration.as_millis() as u64, "countdown started");
        Ok(self.tick())
    }

    /// Returns the countdown to [`State::Ready`] with the full duration
    /// remaining.
    ///
    /// Valid from any state and idempotent. Bumping the schedule tag here
    /// invalidates any tick command already in flight, so no stale tick can
    /// be applied after the reset.
    pub fn reset(&mut self) {
        self.tag += 1;
        self.started_at = None;
        self.remaining = self.duration;
        self.state = State::Ready;
        debug!(id = self.id, "countdown reset");
    }

    /// Schedules the next tick under the current tag.
    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Delivers [`FinishedMsg`] on the next pass through the runtime.
    fn finished_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }

    /// Processes messages and advances the countdown.
    ///
    /// Handles [`TickMsg`] for this instance while running: the remaining
    /// time is recomputed from the start instant; if time is left the next
    /// tick is scheduled, otherwise the countdown transitions to
    /// [`State::Finished`], the schedule stops, and a command delivering
    /// [`FinishedMsg`] is returned.
    ///
    /// Everything else — foreign ids, ticks carrying a stale tag, ticks
    /// arriving while not running, unrelated message types — is ignored and
    /// yields `None`. That makes the handler idempotent against ticks that
    /// were already in flight when `reset()` was called.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if self.state != State::Running || tick_msg.id != self.id {
                return None;
            }
            // A tick scheduled before the latest start()/reset() carries an
            // older tag; dropping it keeps exactly one tick cycle alive.
            if tick_msg.tag != self.tag {
                return None;
            }

            let elapsed = self.started_at.map_or(Duration::ZERO, |t| t.elapsed());
            self.remaining = self.duration.saturating_sub(elapsed);

            if self.remaining.is_zero() {
                self.state = State::Finished;
                self.started_at = None;
                debug!(id = self.id, "countdown finished");
                return Some(self.finished_cmd());
            }
            return Some(self.tick());
        }

        None
    }

    /// Renders the remaining time as `HH:MM:SS.cc` clock text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    /// use std::time::Duration;
    ///
    /// let countdown = new(Duration::from_secs(90));
    /// assert_eq!(countdown.view(), "00:01:30.00");
    /// ```
    pub fn view(&self) -> String {
        format_clock(self.remaining())
    }
}

impl BubbleTeaModel for Model {
    /// Standalone use: a 60-second countdown that starts immediately.
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(Duration::from_secs(60));
        let cmd = model.start().ok();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    /// A 60-second countdown with the default cadence, in [`State::Ready`].
    fn default() -> Self {
        new(Duration::from_secs(60))
    }
}

/// Formats a duration as "HH:MM:SS.cc" (centiseconds).
fn format_clock(d: Duration) -> String {
    let total_secs = d.as_secs();
    let cs = d.subsec_millis() / 10;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
}
