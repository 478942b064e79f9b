//! Address-stability watchdog.
//!
//! Tracks whether the host still owns the tailnet address the server was
//! bound to at startup. The machine is fed one observation per tick and
//! decides continue vs. fatal; the caller performs the actual process exit.

use std::net::IpAddr;

use crate::error::TailvaneError;

/// Consecutive fetch failures tolerated before giving up.
pub const FAILURE_THRESHOLD: u32 = 20;

/// Watchdog position in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchState {
    /// Last observation was a healthy fetch of the bound address.
    Running,
    /// One or more consecutive fetch failures, below the threshold.
    Degraded {
        /// Consecutive failures so far.
        failures: u32,
    },
    /// Absorbing: only a process restart leaves this state.
    Terminated,
}

/// Outcome of feeding one observation.
#[derive(Debug)]
pub enum Verdict {
    /// Keep ticking.
    Continue,
    /// The process can no longer serve under its advertised identity.
    Fatal(TailvaneError),
}

/// State machine comparing each observed self address against the address the
/// server was bound to at startup.
#[derive(Debug)]
pub struct AddressWatchdog {
    bound: IpAddr,
    state: WatchState,
    fatal_cause: Option<TailvaneError>,
}

impl AddressWatchdog {
    /// Start watching the given boot address.
    pub fn new(bound: IpAddr) -> Self {
        Self {
            bound,
            state: WatchState::Running,
            fatal_cause: None,
        }
    }

    /// The address the server was bound to.
    pub fn bound(&self) -> IpAddr {
        self.bound
    }

    /// Current state.
    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Feed one tick's observation: the freshly fetched self address, or the
    /// fetch error. Termination is absorbing; once fatal, every further call
    /// repeats the fatal verdict unchanged.
    pub fn observe(&mut self, observed: Result<IpAddr, TailvaneError>) -> Verdict {
        if let Some(cause) = &self.fatal_cause {
            return Verdict::Fatal(cause.clone());
        }
        match observed {
            Ok(addr) if addr == self.bound => {
                self.state = WatchState::Running;
                Verdict::Continue
            }
            Ok(addr) => self.fatal(TailvaneError::IdentityDrift {
                bound: self.bound,
                observed: addr,
            }),
            Err(err) => {
                let failures = match self.state {
                    WatchState::Degraded { failures } => failures + 1,
                    _ => 1,
                };
                if failures >= FAILURE_THRESHOLD {
                    self.fatal(TailvaneError::FetchExhaustion {
                        failures,
                        last_error: err.to_string(),
                    })
                } else {
                    tracing::warn!(failures, error = %err, "status fetch failed; retrying next tick");
                    self.state = WatchState::Degraded { failures };
                    Verdict::Continue
                }
            }
        }
    }

    fn fatal(&mut self, cause: TailvaneError) -> Verdict {
        self.state = WatchState::Terminated;
        self.fatal_cause = Some(cause.clone());
        Verdict::Fatal(cause)
    }
}
