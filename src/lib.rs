#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A countdown timer component for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate provides a single component: a countdown model that owns a
//! configurable duration, tracks the remaining time while running, and
//! walks a small `Ready` → `Running` → `Finished` lifecycle. It follows the
//! Elm Architecture pattern used across the bubbletea ecosystem — the model
//! is pure state plus an `update()` method, ticking is driven by commands
//! scheduled on the runtime, and the application is notified through
//! messages rather than callbacks:
//!
//! - a [`countdown::TickMsg`] flows through the update loop on every
//!   cadence point while the countdown runs; forward it to the model and
//!   read the fresh remaining time afterwards,
//! - a [`countdown::FinishedMsg`] arrives exactly once when the countdown
//!   reaches zero.
//!
//! Rendering, input handling, and how the finish event is surfaced (label,
//! alert, bell, ...) are entirely the application's business; the component
//! only exposes its state and a plain `HH:MM:SS.cc` [`countdown::Model::view`].
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use std::time::Duration;
//!
//! let mut countdown = countdown_new(Duration::from_secs(90));
//! assert_eq!(countdown.state(), CountdownState::Ready);
//!
//! // Hand the returned command to the bubbletea runtime to begin ticking.
//! let first_tick = countdown.start().unwrap();
//! # drop(first_tick);
//! assert!(countdown.running());
//!
//! countdown.reset();
//! assert_eq!(countdown.remaining(), Duration::from_secs(90));
//! ```
//!
//! Operations that make no sense in the current state — starting an
//! already-running countdown, reconfiguring the duration mid-run — return
//! [`countdown::InvalidTransition`] instead of being silently absorbed, so
//! the application can decide what to do with them.

pub mod countdown;

pub use countdown::{
    new as countdown_new, new_with_interval as countdown_new_with_interval,
    FinishedMsg as CountdownFinishedMsg, InvalidTransition, Model as Countdown,
    State as CountdownState, TickMsg as CountdownTickMsg, DEFAULT_INTERVAL,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
/// ```
pub mod prelude {
    pub use crate::countdown::{
        new as countdown_new, new_with_interval as countdown_new_with_interval,
        FinishedMsg as CountdownFinishedMsg, InvalidTransition, Model as Countdown,
        State as CountdownState, TickMsg as CountdownTickMsg, DEFAULT_INTERVAL,
    };
}
