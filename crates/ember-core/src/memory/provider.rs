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

//! The factory contract used by [`ReusablePool`](super::ReusablePool) to grow.

use std::error::Error;

/// The type-erased cause carried by a [`ProviderError`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Raised when a [`Provider`] fails to construct a new instance.
///
/// The original failure is preserved and reachable through
/// [`Error::source`] or [`ProviderError::cause`].
#[derive(Debug, thiserror::Error)]
#[error("object provider failed to construct an instance: {source}")]
pub struct ProviderError {
    #[source]
    source: BoxError,
}

impl ProviderError {
    /// Wraps the underlying failure reported by a provider.
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            source: cause.into(),
        }
    }

    /// Returns the original failure.
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Consumes the error and returns the original failure.
    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

/// A zero-argument, fallible factory producing one fresh `T` per call.
///
/// Any `Fn() -> Result<T, E>` closure whose error converts into a
/// [`BoxError`] (every `std::error::Error`, `String` and `&str`) is a
/// provider.
///
/// ```
/// use ember_core::memory::ReusablePool;
///
/// let pool: ReusablePool<Vec<u8>> =
///     ReusablePool::new(|| Ok::<_, std::convert::Infallible>(Vec::with_capacity(256)));
/// assert!(pool.acquire().is_ok());
/// ```
pub trait Provider<T>: Send + Sync {
    /// Constructs a new instance.
    fn provide(&self) -> Result<T, ProviderError>;
}

impl<T, E, F> Provider<T> for F
where
    F: Fn() -> Result<T, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn provide(&self) -> Result<T, ProviderError> {
        self().map_err(ProviderError::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct DeviceLost;

    impl fmt::Display for DeviceLost {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "device lost")
        }
    }

    impl Error for DeviceLost {}

    #[test]
    fn test_closure_is_a_provider() {
        let provider = || Ok::<u32, DeviceLost>(42);
        assert_eq!(provider.provide().unwrap(), 42);
    }

    #[test]
    fn test_failure_keeps_original_cause() {
        let provider = || Err::<u32, _>(DeviceLost);
        let err = provider.provide().unwrap_err();

        assert!(err.to_string().contains("device lost"));
        assert!(err.cause().downcast_ref::<DeviceLost>().is_some());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_string_causes_are_accepted() {
        let provider = || Err::<u32, _>("out of handles");
        let err = provider.provide().unwrap_err();
        assert_eq!(err.into_cause().to_string(), "out of handles");
    }
}
