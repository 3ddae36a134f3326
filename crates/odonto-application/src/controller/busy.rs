use odonto_core::{OdontoError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// Held while a controller mutation is in flight.
///
/// Released on drop, including when the mutation future is dropped
/// before it settles.
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Claims `flag`, or fails with `OdontoError::Busy` if it is held.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| OdontoError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
