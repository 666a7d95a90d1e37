//! Async host for the [`TimerEngine`](crate::timer::TimerEngine).
//!
//! One tokio task owns the engine. Commands arrive on a queue and ticks come
//! from a [`Ticker`] task, so every mutation happens on that single task.
//! Observers get a `watch` channel of [`Snapshot`](crate::events::Snapshot)s
//! and a `broadcast` channel of [`Event`](crate::events::Event)s.

mod session;
mod ticker;

pub use session::{SessionDriver, SessionHandle};
pub use ticker::{Tick, Ticker, TICK_PERIOD};
