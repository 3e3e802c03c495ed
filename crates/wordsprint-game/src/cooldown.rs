//! Dual-key guess rate limiter.
//!
//! A short-lived lock is kept under two keys: the session identifier (when
//! the browser presented one) and the network address (always). A guess is
//! accepted only when *both* keys could be newly set; either existing lock
//! blocks it. Locks expire on their own and are never deleted.

use std::time::Duration;

use wordsprint_store::{KvStore, keys};

use crate::error::GameError;

/// Marker value stored under cooldown lock keys.
const LOCK_VALUE: &str = "1";

/// Enforces a minimum spacing between accepted guesses.
#[derive(Debug, Clone)]
pub struct CooldownLimiter<S> {
    store: S,
    cooldown: Duration,
}

impl<S: KvStore> CooldownLimiter<S> {
    /// Create a limiter with the given lock duration.
    pub const fn new(store: S, cooldown: Duration) -> Self {
        Self { store, cooldown }
    }

    /// Seconds until the caller may guess again: the maximum remaining TTL
    /// across whichever of the two lock keys exist, 0 if neither does.
    pub async fn time_remaining(
        &self,
        session: Option<&str>,
        addr: &str,
    ) -> Result<u64, GameError> {
        let mut lock_keys = Vec::with_capacity(2);
        if let Some(sid) = session {
            lock_keys.push(keys::cooldown_session(sid));
        }
        lock_keys.push(keys::cooldown_addr(addr));

        let ttls = self.store.ttl_batch(&lock_keys).await?;
        let best = ttls.into_iter().max().unwrap_or(0);
        Ok(u64::try_from(best).unwrap_or(0))
    }

    /// Try to set both lock keys with the configured expiry, set-if-absent.
    /// Returns `true` only if every attempted key was newly set.
    ///
    /// The two SETs are independent: when one key is already locked, the
    /// other may still be set by this call even though the acquisition as a
    /// whole fails. That partial lock is kept deliberately -- it biases the
    /// limiter toward stricter blocking under the same session/address, not
    /// looser.
    pub async fn try_acquire(&self, session: Option<&str>, addr: &str) -> Result<bool, GameError> {
        let mut acquired = true;

        if let Some(sid) = session
            && !self
                .store
                .set_nx(&keys::cooldown_session(sid), LOCK_VALUE, Some(self.cooldown))
                .await?
        {
            acquired = false;
        }

        if !self
            .store
            .set_nx(&keys::cooldown_addr(addr), LOCK_VALUE, Some(self.cooldown))
            .await?
        {
            acquired = false;
        }

        Ok(acquired)
    }

    /// The configured lock duration in whole seconds.
    pub const fn cooldown_seconds(&self) -> u64 {
        self.cooldown.as_secs()
    }
}
