//! Spawning and lifecycle of the actor population.
//!
//! The supervisor draws a population of one to five actors per role from
//! the entropy collaborator, announces it, pauses, then spawns one named
//! OS thread per actor and waits. The process normally lives until it is
//! killed; `shutdown` exists so embedders and tests can wind a run down.

use crate::actor::{run_deleter, run_inserter, run_searcher};
use crate::board::{SimConfig, Switchboard};
use crate::entropy::{Entropy, SeededEntropy};
use crate::events::{EventSink, ProtocolEvent, Role};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::info;

/// How many actors of each role a run was populated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCounts {
    /// Searcher actors.
    pub searchers: usize,
    /// Inserter actors.
    pub inserters: usize,
    /// Deleter actors.
    pub deleters: usize,
}

/// Owns the actor threads of one simulation run.
pub struct Supervisor {
    board: Arc<Switchboard>,
    stop: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
    counts: RoleCounts,
}

impl Supervisor {
    /// Picks populations, announces them through `sink`, waits the
    /// configured start delay and spawns every actor thread.
    ///
    /// Failing to spawn a thread is fatal and surfaces as the underlying
    /// [`io::Error`]; there is no partial-recovery path.
    #[allow(clippy::cast_possible_truncation, clippy::needless_pass_by_value)]
    pub fn spawn(config: SimConfig, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let mut entropy = match config.seed {
            Some(seed) => SeededEntropy::seeded(seed),
            None => SeededEntropy::from_os(),
        };
        let counts = RoleCounts {
            searchers: entropy.pick(config.population.clone()) as usize,
            inserters: entropy.pick(config.population.clone()) as usize,
            deleters: entropy.pick(config.population.clone()) as usize,
        };
        info!(
            searchers = counts.searchers,
            inserters = counts.inserters,
            deleters = counts.deleters,
            "spawning actor population"
        );
        sink.record(ProtocolEvent::Population {
            searchers: counts.searchers,
            inserters: counts.inserters,
            deleters: counts.deleters,
        });
        if config.start_delay_ms > 0 {
            thread::sleep(Duration::from_millis(config.start_delay_ms));
        }

        let board = Arc::new(Switchboard::new());
        let stop = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(counts.searchers + counts.inserters + counts.deleters);

        let mut spawn_role = |role: Role, count: usize| -> io::Result<()> {
            for id in 0..count {
                let board = board.clone();
                let sink = sink.clone();
                let config = config.clone();
                let stop = stop.clone();
                let mut entropy = actor_entropy(config.seed, role, id);
                let name = format!("{}-{id}", role.label().to_lowercase());
                let handle = thread::Builder::new().name(name).spawn(move || match role {
                    Role::Searcher => {
                        run_searcher(id, &board, sink.as_ref(), &mut entropy, &config, &stop);
                    }
                    Role::Inserter => {
                        run_inserter(id, &board, sink.as_ref(), &mut entropy, &config, &stop);
                    }
                    Role::Deleter => {
                        run_deleter(id, &board, sink.as_ref(), &mut entropy, &config, &stop);
                    }
                })?;
                handles.push(handle);
            }
            Ok(())
        };

        spawn_role(Role::Searcher, counts.searchers)?;
        spawn_role(Role::Inserter, counts.inserters)?;
        spawn_role(Role::Deleter, counts.deleters)?;
        drop(spawn_role);

        Ok(Self {
            board,
            stop,
            handles,
            counts,
        })
    }

    /// The populations this run was spawned with.
    pub fn counts(&self) -> RoleCounts {
        self.counts
    }

    /// The board the actors coordinate through.
    pub fn board(&self) -> &Arc<Switchboard> {
        &self.board
    }

    /// Blocks until every actor exits. Actors never exit on their own;
    /// without [`shutdown`](Self::shutdown) this waits forever.
    pub fn join(self) {
        for handle in self.handles {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
    }

    /// Raises the stop flag and waits for every actor to finish its
    /// current turn.
    pub fn shutdown(self) {
        self.stop.store(true, Ordering::Relaxed);
        info!("stop flag raised, draining actors");
        for handle in &self.handles {
            handle.thread().unpark();
        }
        self.join();
    }
}

fn actor_entropy(seed: Option<u64>, role: Role, id: usize) -> SeededEntropy {
    match seed {
        // Distinct stream per actor, still fully determined by the seed.
        Some(base) => SeededEntropy::seeded(base ^ ((role as u64) << 32) ^ id as u64),
        None => SeededEntropy::from_os(),
    }
}
