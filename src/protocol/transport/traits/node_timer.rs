//! Timer abstraction providing the clock and delay primitives required by the
//! queue timeouts, the recovery holds and the handshake retry logic.
use core::future::Future;

/// Monotonic millisecond clock plus asynchronous delay.
pub trait NodeTimer {
    /// Milliseconds since an arbitrary epoch. Wraps around; callers compare
    /// with `wrapping_sub`.
    fn now_ms(&self) -> u32;

    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a;
}

//==================================================================================EMBASSY
/// [`NodeTimer`] backed by the embassy time driver.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy-time")]
impl NodeTimer for EmbassyTimer {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }

    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a {
        embassy_time::Timer::after_millis(millis as u64)
    }
}
