//! Keeps COM initialized for the process while any handle is alive.
//!
//! Every handle takes a [`Lease`] when it is created and gives it back when it
//! closes. When the first lease is taken a keeper thread enters the
//! multithreaded apartment and parks; when the last lease is returned the
//! keeper leaves the apartment and exits. While the keeper runs, the process
//! has an MTA, so interface pointers obtained on one thread may be used from
//! any other thread that [`run`](super::run) puts into the MTA.
//!
//! # Examples
//! ```
//! use adsi::com::runtime;
//!
//! let lease = runtime::global().acquire();
//! assert!(runtime::global().active() >= 1);
//! drop(lease);
//! ```

use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use super::apartment::Apartment;

static RUNTIME: Runtime = Runtime::new();

/// Returns the process-wide runtime shared by every handle.
pub fn global() -> &'static Runtime {
    &RUNTIME
}

/// Reference-counted COM initialization state.
pub struct Runtime {
    state: Mutex<State>,
}

struct State {
    count: usize,
    keeper: Option<Keeper>,
}

struct Keeper {
    stop: mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

/// One handle's share of the runtime. Dropping it releases the share.
#[must_use = "dropping a lease immediately releases it"]
pub struct Lease {
    runtime: &'static Runtime,
}

impl Runtime {
    /// Creates a runtime with no live leases.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(State {
                count: 0,
                keeper: None,
            }),
        }
    }

    /// Takes a lease, starting the keeper thread if this is the first one.
    ///
    /// Never fails. If the keeper cannot enter the apartment the error is
    /// logged and later COM calls report their own failures.
    pub fn acquire(&'static self) -> Lease {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.count == 0 {
            state.keeper = Keeper::start();
        }
        state.count += 1;
        Lease { runtime: self }
    }

    fn release(&self) {
        let keeper = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.count = state.count.saturating_sub(1);
            if state.count > 0 {
                return;
            }
            state.keeper.take()
        };
        if let Some(keeper) = keeper {
            keeper.stop();
        }
    }

    /// Returns the number of live leases.
    pub fn active(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).count
    }

    /// Reports whether the keeper thread is running.
    pub fn is_running(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keeper
            .is_some()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.runtime.release();
    }
}

impl Keeper {
    fn start() -> Option<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let (ready, entered) = mpsc::channel::<()>();

        let spawned = thread::Builder::new()
            .name("adsi-com-runtime".into())
            .spawn(move || {
                let apartment = match Apartment::enter() {
                    Ok(apartment) => Some(apartment),
                    Err(err) => {
                        log::error!("COM runtime could not enter the apartment: {err}");
                        None
                    }
                };
                let _ = ready.send(());
                // Parks until the sender is dropped.
                let _ = stopped.recv();
                drop(apartment);
            });

        match spawned {
            Ok(thread) => {
                let _ = entered.recv();
                log::debug!("COM runtime started");
                Some(Self { stop, thread })
            }
            Err(err) => {
                log::error!("failed to spawn COM runtime thread: {err}");
                None
            }
        }
    }

    fn stop(self) {
        drop(self.stop);
        if self.thread.join().is_err() {
            log::error!("COM runtime thread panicked");
        }
        log::debug!("COM runtime stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaked() -> &'static Runtime {
        Box::leak(Box::new(Runtime::new()))
    }

    #[test]
    fn test_first_lease_starts_keeper() {
        let runtime = leaked();
        assert!(!runtime.is_running());

        let lease = runtime.acquire();
        assert_eq!(runtime.active(), 1);
        assert!(runtime.is_running());

        drop(lease);
        assert_eq!(runtime.active(), 0);
        assert!(!runtime.is_running());
    }

    #[test]
    fn test_keeper_lives_until_last_lease() {
        let runtime = leaked();
        let a = runtime.acquire();
        let b = runtime.acquire();
        let c = runtime.acquire();
        assert_eq!(runtime.active(), 3);

        drop(b);
        drop(a);
        assert_eq!(runtime.active(), 1);
        assert!(runtime.is_running());

        drop(c);
        assert!(!runtime.is_running());
    }

    #[test]
    fn test_restarts_after_idle() {
        let runtime = leaked();
        drop(runtime.acquire());
        assert!(!runtime.is_running());

        let lease = runtime.acquire();
        assert!(runtime.is_running());
        drop(lease);
        assert!(!runtime.is_running());
    }

    #[test]
    fn test_leases_from_many_threads() {
        let runtime = leaked();
        let workers: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _lease = runtime.acquire();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(runtime.active(), 0);
        assert!(!runtime.is_running());
    }
}
