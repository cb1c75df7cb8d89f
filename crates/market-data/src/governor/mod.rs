//! Outbound request governor.
//!
//! Protects the gateway from upstream rate-limiting by pacing outbound
//! calls per provider: a single-concurrency slot per provider, granted in
//! FIFO arrival order, with a minimum interval between dispatches enforced
//! even when the slot sits idle. The governor never retries; a rate-limit
//! rejection surfaces as `UpstreamUnavailable` and the caller decides
//! whether to retry the whole request.
//!
//! Pacing runs on `tokio::time`, so tests exercise it under paused time
//! instead of a wall clock.

use std::time::Duration;

use log::debug;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep, Instant};

use crate::classifier::ProviderKind;

/// Default minimum interval between outbound calls to a given provider.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Pacing configuration, passed at construction time.
///
/// Keeping this an explicit value rather than process-wide state is what
/// makes the pacing behavior testable with a controlled clock.
#[derive(Clone, Debug)]
pub struct GovernorConfig {
    /// Minimum interval between consecutive dispatches per provider.
    pub min_interval: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

#[derive(Debug)]
struct SlotState {
    last_dispatch: Option<Instant>,
}

/// Single-concurrency paced queue for one provider.
#[derive(Debug)]
struct ProviderSlot {
    state: Mutex<SlotState>,
    min_interval: Duration,
}

impl ProviderSlot {
    fn new(min_interval: Duration) -> Self {
        Self {
            state: Mutex::new(SlotState {
                last_dispatch: None,
            }),
            min_interval,
        }
    }

    async fn acquire(&self) -> MutexGuard<'_, SlotState> {
        // tokio's mutex hands out locks in FIFO order, which is what keeps
        // outbound calls in strict arrival order.
        let mut state = self.state.lock().await;
        if let Some(last) = state.last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        state.last_dispatch = Some(Instant::now());
        state
    }
}

/// Permission to perform one outbound call.
///
/// The provider's slot stays exclusively held until the permit is dropped,
/// so callers hold it across the outbound request to keep at most one call
/// in flight per provider.
pub struct SlotPermit<'a> {
    _state: MutexGuard<'a, SlotState>,
}

/// Per-provider single-concurrency queue with paced dispatch.
pub struct RequestGovernor {
    tw: ProviderSlot,
    us: ProviderSlot,
}

impl RequestGovernor {
    pub fn new(config: GovernorConfig) -> Self {
        Self {
            tw: ProviderSlot::new(config.min_interval),
            us: ProviderSlot::new(config.min_interval),
        }
    }

    /// Wait for the provider's slot, in FIFO arrival order.
    ///
    /// Resolves once the previous call has finished and the minimum
    /// inter-call interval since the previous dispatch has passed.
    pub async fn acquire(&self, provider: ProviderKind) -> SlotPermit<'_> {
        let slot = match provider {
            ProviderKind::Tw => &self.tw,
            ProviderKind::Us => &self.us,
        };
        let state = slot.acquire().await;
        debug!("governor: dispatching outbound call to '{}'", provider.as_str());
        SlotPermit { _state: state }
    }
}

impl Default for RequestGovernor {
    fn default() -> Self {
        Self::new(GovernorConfig::default())
    }
}
