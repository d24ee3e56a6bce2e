// app/engine_loop.rs
// The engine thread: drains queued commands, advances running particles on a
// fixed tick and publishes a snapshot for readers after every tick.

use log::{debug, error, info};
use parking_lot::Mutex;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::commands::{process_command, CommandOutcome, EngineCommand};
use crate::engine::{Engine, Snapshot};
use crate::error::{EngineError, LoopError};
use crate::field::FieldLine;
use crate::profile_scope;

type Reply = Sender<Result<CommandOutcome, EngineError>>;

enum Message {
    Command(EngineCommand, Reply),
    Shutdown,
}

/// Field lines traced for one charge-set version, shared with every snapshot taken at that version.
pub struct FieldLineCache {
    version: Option<u64>,
    lines: Arc<[FieldLine]>,
}

impl Default for FieldLineCache {
    fn default() -> Self {
        Self { version: None, lines: Arc::from(Vec::new()) }
    }
}

impl FieldLineCache {
    /// Lines for the engine's current charges, retraced only when the charges changed.
    pub fn lines(&mut self, engine: &Engine) -> Arc<[FieldLine]> {
        let version = engine.charges_version();
        if self.version != Some(version) {
            self.lines = engine.all_field_lines().into();
            self.version = Some(version);
            debug!("retraced {} field lines for charge version {version}", self.lines.len());
        }
        Arc::clone(&self.lines)
    }
}

/// Owner-side handle to an engine running on its own thread.
pub struct EngineHandle {
    tx: Sender<Message>,
    snapshot: Arc<Mutex<Snapshot>>,
    thread: Option<JoinHandle<Engine>>,
}

impl EngineHandle {
    pub fn spawn(engine: Engine, tick: Duration) -> Self {
        let (tx, rx) = channel();
        let snapshot = Arc::new(Mutex::new(Snapshot::capture(&engine)));
        let shared = Arc::clone(&snapshot);
        let thread = std::thread::spawn(move || run_engine_loop(rx, engine, shared, tick));
        Self { tx, snapshot, thread: Some(thread) }
    }

    /// Spawn with the engine's configured time step as the tick period.
    pub fn spawn_realtime(engine: Engine) -> Self {
        let tick = Duration::from_secs_f64(engine.config().time_step);
        Self::spawn(engine, tick)
    }

    /// Queue a command and block until the engine thread has applied it.
    pub fn request(&self, cmd: EngineCommand) -> Result<CommandOutcome, LoopError> {
        let (reply_tx, reply_rx) = channel();
        self.tx
            .send(Message::Command(cmd, reply_tx))
            .map_err(|_| LoopError::Stopped)?;
        let outcome = reply_rx.recv().map_err(|_| LoopError::Stopped)?;
        Ok(outcome?)
    }

    /// True once the engine thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().clone()
    }

    /// Stop the thread and take the engine back.
    pub fn shutdown(mut self) -> Option<Engine> {
        self.stop()
    }

    fn stop(&mut self) -> Option<Engine> {
        let thread = self.thread.take()?;
        let _ = self.tx.send(Message::Shutdown);
        thread.join().ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn publish(engine: &Engine, cache: &mut FieldLineCache, shared: &Mutex<Snapshot>) {
    let lines = cache.lines(engine);
    *shared.lock() = Snapshot::capture(engine).with_field_lines(lines);
}

fn run_engine_loop(
    rx: Receiver<Message>,
    mut engine: Engine,
    shared: Arc<Mutex<Snapshot>>,
    tick: Duration,
) -> Engine {
    info!("engine thread started, tick {:?}", tick);
    let mut cache = FieldLineCache::default();
    loop {
        // Handle commands
        loop {
            match rx.try_recv() {
                Ok(Message::Command(cmd, reply)) => {
                    let _ = reply.send(process_command(cmd, &mut engine));
                }
                Ok(Message::Shutdown) | Err(TryRecvError::Disconnected) => {
                    publish(&engine, &mut cache, &shared);
                    info!("engine thread stopped at frame {}", engine.frame);
                    return engine;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if engine.is_running() {
            profile_scope!("engine_loop");
            match engine.step() {
                Ok(()) => {
                    if let Some(limit) = engine.config().trajectory_limit {
                        engine.trim_trajectories(limit);
                    }
                }
                Err(e) => {
                    error!("tick rejected, pausing: {e}");
                    engine.set_paused(true);
                }
            }
        }

        publish(&engine, &mut cache, &shared);

        #[cfg(feature = "profiling")]
        {
            if engine.is_running() && engine.frame % 100 == 0 {
                crate::PROFILER.lock().log_and_clear(engine.frame);
            }
        }

        std::thread::sleep(tick);
    }
}
