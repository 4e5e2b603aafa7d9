//! Lock guarding a game's table and the in-memory repository.
//!
//! With `std` this wraps [`std::sync::Mutex`] and recovers from poisoning.
//! Without `std` the spin lock is used directly.

#[cfg(feature = "std")]
use std::sync::MutexGuard;

#[cfg(feature = "std")]
#[derive(Default)]
pub struct Mutex<T>(std::sync::Mutex<T>);

#[cfg(feature = "std")]
impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("lock poisoned by a panicked holder, recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub use spin::Mutex;
