// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Masternode housekeeping
//!
//! A background thread that drives masternode sync once per tick and, once
//! the blockchain is synced, runs the announce and cleanup work on their
//! own cadences.
//!

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Name of the housekeeping thread.
pub const THREAD_NAME: &str = "basex-mnpool";

/// Drives masternode list sync.
pub trait MasternodeSync: Send + Sync {
    /// Advances sync by one step.
    fn process(&self);
    /// Whether the blockchain is considered synced.
    fn is_blockchain_synced(&self) -> bool;
}

/// The local masternode, if this node runs one.
pub trait ActiveMasternode: Send + Sync {
    /// Activates or pings the local masternode.
    fn manage_status(&self);
}

/// The known masternodes.
pub trait MasternodeList: Send + Sync {
    /// Drops masternodes that are expired or invalid.
    fn check_and_remove(&self);
    /// Closes connections opened only for masternode traffic.
    fn process_connections(&self);
}

/// Masternode payment votes.
pub trait PaymentList: Send + Sync {
    /// Drops stale payment votes.
    fn clean_payment_list(&self);
}

/// Transaction lock requests.
pub trait TransactionLocks: Send + Sync {
    /// Drops expired transaction locks.
    fn clean_transaction_locks(&self);
}

/// The subsystems housekeeping calls into.
#[derive(Clone)]
pub struct Collaborators {
    /// Masternode sync
    pub sync: Arc<dyn MasternodeSync>,
    /// Local masternode
    pub active_masternode: Arc<dyn ActiveMasternode>,
    /// Masternode list
    pub masternodes: Arc<dyn MasternodeList>,
    /// Payment votes
    pub payments: Arc<dyn PaymentList>,
    /// Transaction locks
    pub locks: Arc<dyn TransactionLocks>,
}

/// Housekeeping settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HousekeepingConfig {
    /// No thread is started in lite mode
    pub lite_mode: bool,
    /// Sleep between ticks
    pub tick_interval: Duration,
    /// Synced ticks between announcements
    pub announce_ticks: u64,
    /// Synced ticks between cleanups
    pub cleanup_ticks: u64,
}

impl Default for HousekeepingConfig {
    fn default() -> Self {
        HousekeepingConfig {
            lite_mode: false,
            tick_interval: Duration::from_secs(1),
            announce_ticks: 300,
            cleanup_ticks: 60,
        }
    }
}

/// A named periodic timer over the synced tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    name: &'static str,
    period: u64,
}

impl Cadence {
    /// A timer firing every `period` ticks. A zero period never fires.
    pub const fn new(name: &'static str, period: u64) -> Cadence {
        Cadence { name, period }
    }

    /// The timer's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the timer fires at `counter`.
    pub fn fires(&self, counter: u64) -> bool {
        self.period != 0 && counter % self.period == 0
    }
}

/// One housekeeping state machine. [Housekeeping::spawn] runs it on its
/// own thread; [Housekeeping::tick] runs a single iteration in place.
pub struct Housekeeping {
    collaborators: Collaborators,
    announce: Cadence,
    cleanup: Cadence,
    counter: AtomicU64,
}

impl Housekeeping {
    /// Housekeeping with the cadences of `config`.
    pub fn new(config: &HousekeepingConfig, collaborators: Collaborators) -> Housekeeping {
        Housekeeping {
            collaborators,
            announce: Cadence::new("announce", config.announce_ticks),
            cleanup: Cadence::new("cleanup", config.cleanup_ticks),
            counter: AtomicU64::new(0),
        }
    }

    /// Starts the housekeeping thread. Returns `None` in lite mode, or
    /// when the thread cannot be created.
    pub fn spawn(config: HousekeepingConfig, collaborators: Collaborators) -> Option<HousekeepingHandle> {
        if config.lite_mode {
            info!("Lite mode, masternode housekeeping disabled");
            return None;
        }

        let housekeeping = Arc::new(Housekeeping::new(&config, collaborators));
        let shared = Arc::new(Shared {
            stopped: Mutex::new(false),
            condition: Condvar::new(),
        });

        let thread = {
            let housekeeping = Arc::clone(&housekeeping);
            let shared = Arc::clone(&shared);
            let interval = config.tick_interval;
            thread::Builder::new()
                .name(THREAD_NAME.to_string())
                .spawn(move || housekeeping.run(&shared, interval))
        };

        match thread {
            Ok(thread) => {
                info!("Masternode housekeeping started");
                Some(HousekeepingHandle {
                    housekeeping,
                    shared,
                    thread: Some(thread),
                })
            }
            Err(e) => {
                error!("Could not start masternode housekeeping: {}", e);
                None
            }
        }
    }

    /// Runs one iteration: a sync step, then the timers once synced.
    pub fn tick(&self) {
        let c = &self.collaborators;
        c.sync.process();
        if !c.sync.is_blockchain_synced() {
            return;
        }

        let counter = self.counter.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        if self.announce.fires(counter) {
            debug!("{} at tick {}", self.announce.name(), counter);
            c.active_masternode.manage_status();
        }
        if self.cleanup.fires(counter) {
            debug!("{} at tick {}", self.cleanup.name(), counter);
            c.masternodes.check_and_remove();
            c.masternodes.process_connections();
            c.payments.clean_payment_list();
            c.locks.clean_transaction_locks();
        }
    }

    /// Synced ticks so far.
    pub fn synced_ticks(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    fn run(&self, shared: &Shared, interval: Duration) {
        let mut stopped = shared.lock();
        loop {
            let deadline = Instant::now() + interval;
            while !*stopped {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                stopped = match shared.condition.wait_timeout(stopped, deadline - now) {
                    Ok((guard, _)) => guard,
                    Err(poisoned) => poisoned.into_inner().0,
                };
            }
            if *stopped {
                break;
            }

            drop(stopped);
            self.tick();
            stopped = shared.lock();
        }
    }
}

struct Shared {
    stopped: Mutex<bool>,
    condition: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<bool> {
        match self.stopped.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Owner of a running housekeeping thread. Dropping the handle stops the
/// thread too.
pub struct HousekeepingHandle {
    housekeeping: Arc<Housekeeping>,
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl HousekeepingHandle {
    /// The state machine the thread drives.
    pub fn housekeeping(&self) -> &Housekeeping {
        &self.housekeeping
    }

    /// Wakes the thread out of its sleep and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            *self.shared.lock() = true;
            self.shared.condition.notify_all();
            if thread.join().is_err() {
                warn!("Masternode housekeeping thread panicked");
            }
            info!("Masternode housekeeping stopped");
        }
    }
}

impl Drop for HousekeepingHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
