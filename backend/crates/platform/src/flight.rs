//! Single-flight guard
//!
//! At most one operation of a kind may be pending at a time. A second caller
//! is turned away instead of racing the first one.

use std::sync::atomic::{AtomicBool, Ordering};

/// In-flight flag for one kind of operation
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

impl InFlight {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the flag. `None` if another operation already holds it.
    ///
    /// The flag is released when the returned guard is dropped, including
    /// when the owning future is dropped mid-await.
    pub fn try_begin(&self) -> Option<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { flag: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases its [`InFlight`] on drop
#[derive(Debug)]
pub struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected() {
        let flight = InFlight::new();
        let guard = flight.try_begin();
        assert!(guard.is_some());
        assert!(flight.is_busy());
        assert!(flight.try_begin().is_none());
    }

    #[test]
    fn test_release_on_drop() {
        let flight = InFlight::new();
        {
            let _guard = flight.try_begin().unwrap();
        }
        assert!(!flight.is_busy());
        assert!(flight.try_begin().is_some());
    }

    #[tokio::test]
    async fn test_release_when_future_is_dropped() {
        let flight = std::sync::Arc::new(InFlight::new());
        let held = flight.clone();
        let task = tokio::spawn(async move {
            let _guard = held.try_begin().unwrap();
            std::future::pending::<()>().await;
        });

        while !flight.is_busy() {
            tokio::task::yield_now().await;
        }
        task.abort();
        let _ = task.await;

        assert!(!flight.is_busy());
    }
}
