// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A thread-safe, lazily growing stack of reusable objects.

use std::convert::Infallible;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::provider::{Provider, ProviderError};

/// A point-in-time view of a pool's occupancy and traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Instances currently idle in the pool.
    pub available: usize,
    /// Instances the pool has ever constructed (the ledger length).
    pub created: usize,
    /// Acquisitions served from the idle stack.
    pub hits: u64,
    /// Acquisitions that had to call the provider.
    pub misses: u64,
    /// Calls to `release`.
    pub releases: u64,
    /// Provider calls that failed.
    pub provider_failures: u64,
}

impl PoolStats {
    /// The number of instances handed out and not yet released.
    ///
    /// Only meaningful when callers release nothing but instances that came
    /// from the same pool.
    pub fn outstanding(&self) -> usize {
        self.created.saturating_sub(self.available)
    }

    /// The fraction of acquisitions served without construction, in `[0, 1]`.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct PoolState<T> {
    /// Idle instances, used as a LIFO stack.
    available: Vec<T>,
    /// Append-only, construction order.
    ever_created: Vec<T>,
    hits: u64,
    misses: u64,
    releases: u64,
    provider_failures: u64,
}

impl<T> PoolState<T> {
    fn new(capacity: usize) -> Self {
        Self {
            available: Vec::with_capacity(capacity),
            ever_created: Vec::with_capacity(capacity),
            hits: 0,
            misses: 0,
            releases: 0,
            provider_failures: 0,
        }
    }
}

/// A reusable-object pool backed by a [`Provider`].
///
/// `acquire` pops the most recently released instance, so frequently cycled
/// objects stay hot in cache. When nothing is idle the provider constructs a
/// new instance, which is recorded in the pool's ledger and handed straight to
/// the caller. The ledger is never pruned: it lists every instance the pool
/// has built, in construction order, for bulk iteration.
///
/// All mutations, including the provider call on a miss, happen under a
/// single lock. Exactly one instance is constructed per miss, and a slow
/// provider stalls other callers for the duration of the call.
///
/// Because both the ledger and the caller hold the instance, construction
/// requires `T: Clone`. Pooled types are expected to be cheap handles such as
/// `Arc<Mutex<..>>`, ids, or small `Copy` values.
///
/// # Releasing
///
/// [`release`](Self::release) does not check where a value came from.
/// Releasing a value the pool never built, or releasing the same instance
/// twice, is a caller error: the value will be handed out again, and ledger
/// based bookkeeping such as [`PoolStats::outstanding`] stops being accurate.
///
/// # Examples
///
/// ```
/// use ember_core::memory::ReusablePool;
///
/// let pool: ReusablePool<u32> = ReusablePool::with_default();
/// let a = pool.acquire().unwrap();
/// pool.release(a);
/// assert_eq!(pool.created_len(), 1);
/// assert_eq!(pool.available_len(), 1);
/// ```
pub struct ReusablePool<T> {
    state: Mutex<PoolState<T>>,
    provider: Box<dyn Provider<T>>,
}

impl<T> ReusablePool<T> {
    /// Creates an empty pool that grows through `provider`.
    pub fn new(provider: impl Provider<T> + 'static) -> Self {
        Self::with_capacity(provider, 0)
    }

    /// Creates an empty pool whose internal storage is pre-sized for
    /// `capacity` instances. No instance is constructed.
    pub fn with_capacity(provider: impl Provider<T> + 'static, capacity: usize) -> Self {
        Self {
            state: Mutex::new(PoolState::new(capacity)),
            provider: Box::new(provider),
        }
    }

    /// Returns `instance` to the pool. It becomes the next one handed out.
    pub fn release(&self, instance: T) {
        let mut state = self.lock();
        state.available.push(instance);
        state.releases += 1;
        log::trace!(
            "Released pooled instance ({} available)",
            state.available.len()
        );
    }

    /// The number of idle instances.
    pub fn available_len(&self) -> usize {
        self.lock().available.len()
    }

    /// The number of instances the pool has ever constructed.
    pub fn created_len(&self) -> usize {
        self.lock().ever_created.len()
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        let state = self.lock();
        PoolStats {
            available: state.available.len(),
            created: state.ever_created.len(),
            hits: state.hits,
            misses: state.misses,
            releases: state.releases,
            provider_failures: state.provider_failures,
        }
    }

    /// Calls `f` on every instance ever constructed, in construction order,
    /// without cloning.
    ///
    /// The pool lock is held for the whole walk: `f` must not call back into
    /// this pool.
    pub fn for_each_created<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        let state = self.lock();
        for instance in &state.ever_created {
            f(instance);
        }
    }

    /// Every mutation leaves the state consistent before anything that can
    /// panic runs, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, PoolState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Default + 'static> ReusablePool<T> {
    /// Creates a pool whose provider is `T::default()` and therefore never
    /// fails.
    pub fn with_default() -> Self {
        Self::new(|| Ok::<T, Infallible>(T::default()))
    }
}

impl<T: Clone> ReusablePool<T> {
    /// Takes an instance out of the pool, constructing one if none is idle.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`ProviderError`] when the pool is empty and
    /// construction fails. The idle stack and the ledger are left untouched
    /// and the failure is not retried.
    pub fn acquire(&self) -> Result<T, ProviderError> {
        let mut state = self.lock();

        if let Some(instance) = state.available.pop() {
            state.hits += 1;
            return Ok(instance);
        }

        match self.provider.provide() {
            Ok(instance) => {
                let recorded = instance.clone();
                state.ever_created.push(recorded);
                state.misses += 1;
                log::debug!(
                    "Pool miss, constructed instance #{}",
                    state.ever_created.len()
                );
                Ok(instance)
            }
            Err(err) => {
                state.provider_failures += 1;
                log::warn!("Pool could not grow: {err}");
                Err(err)
            }
        }
    }

    /// Like [`acquire`](Self::acquire), but wraps the instance in a guard
    /// that releases it back to this pool when dropped.
    pub fn acquire_scoped(&self) -> Result<Pooled<'_, T>, ProviderError> {
        let instance = self.acquire()?;
        Ok(Pooled {
            pool: self,
            instance: Some(instance),
        })
    }

    /// Constructs `count` instances up front and parks them on the idle stack.
    ///
    /// Returns the number of idle instances afterwards.
    ///
    /// # Errors
    ///
    /// Stops at the first provider failure and returns it. Instances built
    /// before the failure stay in the pool.
    pub fn prefill(&self, count: usize) -> Result<usize, ProviderError> {
        let mut state = self.lock();
        state.available.reserve(count);
        state.ever_created.reserve(count);

        for _ in 0..count {
            match self.provider.provide() {
                Ok(instance) => {
                    let recorded = instance.clone();
                    state.ever_created.push(recorded);
                    state.available.push(instance);
                }
                Err(err) => {
                    state.provider_failures += 1;
                    log::warn!("Pool prefill stopped early: {err}");
                    return Err(err);
                }
            }
        }

        log::debug!(
            "Prefilled pool with {count} instances ({} available)",
            state.available.len()
        );
        Ok(state.available.len())
    }

    /// Returns a snapshot of every instance ever constructed, in construction
    /// order.
    ///
    /// Later growth is not reflected in the returned vector; call again or
    /// use [`for_each_created`](Self::for_each_created) for a live walk.
    pub fn all_ever_created(&self) -> Vec<T> {
        self.lock().ever_created.clone()
    }
}

impl<T> fmt::Debug for ReusablePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReusablePool")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// An instance on loan from a [`ReusablePool`].
///
/// Dereferences to the pooled value and releases it back to its pool on drop.
#[derive(Debug)]
pub struct Pooled<'a, T> {
    pool: &'a ReusablePool<T>,
    instance: Option<T>,
}

impl<T> Pooled<'_, T> {
    /// Takes the instance out of the guard. It will not be released.
    pub fn detach(mut self) -> T {
        self.instance
            .take()
            .expect("pooled instance is present until the guard is consumed")
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.instance
            .as_ref()
            .expect("pooled instance is present until the guard is consumed")
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.instance
            .as_mut()
            .expect("pooled instance is present until the guard is consumed")
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            self.pool.release(instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting_pool() -> ReusablePool<u32> {
        let next = AtomicU32::new(0);
        ReusablePool::new(move || Ok::<u32, Infallible>(next.fetch_add(1, Ordering::Relaxed)))
    }

    #[test]
    fn test_acquire_on_empty_pool_constructs() {
        let pool = counting_pool();

        assert_eq!(pool.acquire().unwrap(), 0);
        assert_eq!(pool.acquire().unwrap(), 1);
        assert_eq!(pool.created_len(), 2);
        assert_eq!(pool.available_len(), 0);
    }

    #[test]
    fn test_release_then_acquire_returns_same_instance() {
        let pool = counting_pool();
        let first = pool.acquire().unwrap();
        let _second = pool.acquire().unwrap();

        pool.release(first);
        assert_eq!(pool.acquire().unwrap(), first);
        assert_eq!(pool.created_len(), 2);
    }

    #[test]
    fn test_acquire_order_is_lifo() {
        let pool = counting_pool();
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let c = pool.acquire().unwrap();

        pool.release(a);
        pool.release(b);
        pool.release(c);

        assert_eq!(pool.acquire().unwrap(), c);
        assert_eq!(pool.acquire().unwrap(), b);
        assert_eq!(pool.acquire().unwrap(), a);
    }

    #[test]
    fn test_provider_failure_leaves_pool_untouched() {
        let used = AtomicBool::new(false);
        let pool: ReusablePool<u32> = ReusablePool::new(move || {
            if used.swap(true, Ordering::SeqCst) {
                Err("provider exhausted")
            } else {
                Ok(7)
            }
        });

        assert_eq!(pool.acquire().unwrap(), 7);
        assert_eq!(pool.available_len(), 0);

        let err = pool.acquire().unwrap_err();
        assert_eq!(err.cause().to_string(), "provider exhausted");
        assert_eq!(pool.available_len(), 0);
        assert_eq!(pool.created_len(), 1);
        assert_eq!(pool.stats().provider_failures, 1);
    }

    #[test]
    fn test_ledger_keeps_construction_order() {
        let pool = counting_pool();
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(b);
        pool.release(a);
        let _ = pool.acquire().unwrap();
        let _ = pool.acquire().unwrap();
        let _ = pool.acquire().unwrap();

        assert_eq!(pool.all_ever_created(), vec![0, 1, 2]);
    }

    #[test]
    fn test_ledger_reaches_shared_instances() {
        let pool: ReusablePool<Arc<AtomicU32>> = ReusablePool::with_default();
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        a.store(5, Ordering::Relaxed);
        b.store(9, Ordering::Relaxed);
        pool.release(a);

        // Bulk reset through the ledger also reaches `b`, which is still on loan.
        pool.for_each_created(|counter| counter.store(0, Ordering::Relaxed));
        assert_eq!(b.load(Ordering::Relaxed), 0);
        assert_eq!(pool.acquire().unwrap().load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_prefill_parks_instances() {
        let pool = counting_pool();
        assert_eq!(pool.prefill(3).unwrap(), 3);

        let stats = pool.stats();
        assert_eq!(stats.available, 3);
        assert_eq!(stats.created, 3);
        assert_eq!(stats.misses, 0);

        // Prefilled instances are handed out last-constructed first.
        assert_eq!(pool.acquire().unwrap(), 2);
        assert_eq!(pool.stats().hits, 1);
    }

    #[test]
    fn test_prefill_keeps_instances_built_before_failure() {
        let budget = AtomicU32::new(2);
        let pool: ReusablePool<u32> = ReusablePool::new(move || {
            let left = budget.load(Ordering::SeqCst);
            if left == 0 {
                return Err("budget spent");
            }
            budget.store(left - 1, Ordering::SeqCst);
            Ok(left)
        });

        assert!(pool.prefill(5).is_err());
        assert_eq!(pool.available_len(), 2);
        assert_eq!(pool.created_len(), 2);
    }

    #[test]
    fn test_scoped_guard_releases_on_drop() {
        let pool = counting_pool();
        {
            let mut guard = pool.acquire_scoped().unwrap();
            *guard += 100;
            assert_eq!(pool.available_len(), 0);
        }
        assert_eq!(pool.available_len(), 1);
        assert_eq!(pool.acquire().unwrap(), 100);
    }

    #[test]
    fn test_detached_guard_is_not_released() {
        let pool = counting_pool();
        let value = pool.acquire_scoped().unwrap().detach();

        assert_eq!(value, 0);
        assert_eq!(pool.available_len(), 0);
        assert_eq!(pool.stats().releases, 0);
    }

    #[test]
    fn test_release_accepts_foreign_values() {
        let pool = counting_pool();
        pool.release(999);

        assert_eq!(pool.available_len(), 1);
        assert_eq!(pool.created_len(), 0);
        assert_eq!(pool.acquire().unwrap(), 999);
    }

    #[test]
    fn test_stats_ratios() {
        let pool = counting_pool();
        assert_eq!(pool.stats().hit_ratio(), 0.0);

        let a = pool.acquire().unwrap();
        pool.release(a);
        let _a = pool.acquire().unwrap();

        let stats = pool.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_ratio(), 0.5);
        assert_eq!(stats.outstanding(), 1);
    }

    #[test]
    fn test_stats_serialize() {
        let pool = counting_pool();
        pool.prefill(2).unwrap();

        let json = serde_json::to_value(pool.stats()).unwrap();
        assert_eq!(json["available"], 2);
        assert_eq!(json["created"], 2);
    }
}
