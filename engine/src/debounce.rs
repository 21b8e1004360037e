use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

/// Last-call-wins delayed invocation: arming again before the window
/// elapses replaces the pending call, and dropping the debouncer
/// cancels whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to run once the window elapses, replacing any
    /// action that hasn't fired yet.
    pub fn call<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            action();
        }));
    }

    /// Abort the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::Debouncer;

    #[tokio::test]
    async fn a_burst_of_calls_fires_once_with_the_last_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(20));

        for value in [1usize, 2, 3] {
            let fired = Arc::clone(&fired);
            debouncer.call(move || {
                fired.store(value, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn cancel_prevents_the_pending_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(10));

        {
            let fired = Arc::clone(&fired);
            debouncer.call(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn drop_tears_down_the_pending_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(10));
            let fired = Arc::clone(&fired);
            debouncer.call(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
