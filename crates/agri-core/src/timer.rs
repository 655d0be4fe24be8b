//! Timers
//!
//! One-shot delays for the single-threaded UI loop. The browser build
//! supplies its own `Timer`; native builds and tests use `TokioTimer`.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Source of one-shot delays
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

impl<T: Timer + ?Sized> Timer for std::rc::Rc<T> {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        (**self).sleep(duration)
    }
}

/// Timer backed by `tokio::time`
#[cfg(feature = "tokio-timer")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "tokio-timer")]
impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Run `work` after the timer elapses
pub async fn delayed<F: std::future::Future>(timer: &dyn Timer, delay: Duration, work: F) -> F::Output {
    timer.sleep(delay).await;
    work.await
}
