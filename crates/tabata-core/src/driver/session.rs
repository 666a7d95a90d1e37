use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::ticker::{Tick, Ticker, TICK_PERIOD};
use crate::error::{CoreError, Result};
use crate::events::{Event, Snapshot};
use crate::timer::{SessionConfig, TimerEngine};

const REQUEST_QUEUE: usize = 32;
const EVENT_BUFFER: usize = 256;

#[derive(Debug)]
enum Command {
    Start(SessionConfig),
    Pause,
    Resume,
    Stop,
    Acknowledge,
    Shutdown,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Stop => "stop",
            Command::Acknowledge => "acknowledge",
            Command::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug)]
struct Request {
    command: Command,
    reply: oneshot::Sender<Result<()>>,
}

/// Cloneable front door to a running [`SessionDriver`].
///
/// Commands resolve once the driver has applied them; a refused command
/// comes back as the engine's error and changes nothing.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    requests: mpsc::Sender<Request>,
    snapshots: watch::Receiver<Snapshot>,
    events: broadcast::Sender<Event>,
}

impl SessionHandle {
    pub async fn start(&self, config: SessionConfig) -> Result<()> {
        self.request(Command::Start(config)).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.request(Command::Resume).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.request(Command::Stop).await
    }

    pub async fn acknowledge(&self) -> Result<()> {
        self.request(Command::Acknowledge).await
    }

    /// Stop any session and end the driver task.
    pub async fn shutdown(self) -> Result<()> {
        self.request(Command::Shutdown).await
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Observe the engine state; updated after every command and tick.
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    async fn request(&self, command: Command) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .await
            .map_err(|_| CoreError::DriverClosed)?;
        response.await.map_err(|_| CoreError::DriverClosed)?
    }
}

/// The task that owns a [`TimerEngine`] and its countdown.
pub struct SessionDriver {
    engine: TimerEngine,
    requests: mpsc::Receiver<Request>,
    tick_tx: mpsc::UnboundedSender<Tick>,
    ticks: mpsc::UnboundedReceiver<Tick>,
    ticker: Option<Ticker>,
    period: Duration,
    snapshots: watch::Sender<Snapshot>,
    events: broadcast::Sender<Event>,
}

impl SessionDriver {
    /// Spawn a driver with the standard one-second cadence.
    ///
    /// Must be called from within a tokio runtime. The task ends on
    /// [`SessionHandle::shutdown`] or once every handle is dropped.
    pub fn spawn() -> (SessionHandle, JoinHandle<()>) {
        Self::spawn_with_period(TICK_PERIOD)
    }

    pub fn spawn_with_period(period: Duration) -> (SessionHandle, JoinHandle<()>) {
        let engine = TimerEngine::new();
        let (requests_tx, requests) = mpsc::channel(REQUEST_QUEUE);
        let (tick_tx, ticks) = mpsc::unbounded_channel();
        let (snapshots, snapshots_rx) = watch::channel(engine.snapshot());
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        let handle = SessionHandle {
            requests: requests_tx,
            snapshots: snapshots_rx,
            events: events.clone(),
        };
        let driver = SessionDriver {
            engine,
            requests,
            tick_tx,
            ticks,
            ticker: None,
            period,
            snapshots,
            events,
        };
        (handle, tokio::spawn(driver.run()))
    }

    async fn run(mut self) {
        info!("session driver started");
        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => {
                        if !self.handle(request) {
                            break;
                        }
                    }
                    None => break,
                },
                Some(tick) = self.ticks.recv() => self.on_tick(tick),
            }
        }
        if let Ok(events) = self.engine.stop() {
            self.publish(events);
        }
        self.ticker = None;
        info!("session driver stopped");
    }

    /// Apply one command. Returns false when the driver should exit.
    fn handle(&mut self, request: Request) -> bool {
        let Request { command, reply } = request;
        let operation = command.name();
        debug!(operation, "command received");

        let result = match command {
            Command::Start(config) => self.engine.start(config),
            Command::Pause => self.engine.pause(),
            Command::Resume => self.engine.resume(),
            Command::Stop => self.engine.stop(),
            Command::Acknowledge => self.engine.acknowledge(),
            Command::Shutdown => {
                let result = self.engine.stop().map(|events| self.publish(events));
                self.sync_ticker();
                let _ = reply.send(result);
                return false;
            }
        };

        let result = match result {
            Ok(events) => {
                self.publish(events);
                Ok(())
            }
            Err(err) => {
                warn!(operation, error = %err, "command rejected");
                Err(err)
            }
        };
        self.sync_ticker();
        // The caller may have stopped waiting; nothing to do then.
        let _ = reply.send(result);
        true
    }

    fn on_tick(&mut self, tick: Tick) {
        let events = self.engine.tick(tick.generation);
        if !events.is_empty() {
            self.publish(events);
        }
        self.sync_ticker();
    }

    /// Keep exactly one ticker, running under the engine's countdown generation.
    fn sync_ticker(&mut self) {
        let wanted = self.engine.countdown_generation();
        if self.ticker.as_ref().map(Ticker::generation) == wanted {
            return;
        }
        // Replacing the old ticker drops, and so aborts, it.
        self.ticker = wanted.map(|generation| {
            debug!(generation, "starting countdown ticker");
            Ticker::spawn(generation, self.period, self.tick_tx.clone())
        });
    }

    fn publish(&mut self, events: Vec<Event>) {
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        self.snapshots.send_replace(self.engine.snapshot());
    }
}
