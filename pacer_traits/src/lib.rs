pub mod clock;

pub use clock::{Clock, MonotonicClock};

use std::time::Instant;

/// A source of paced release instants.
///
/// Each call to `take` is one tick of the schedule: it blocks the caller until
/// the tick is due (or returns immediately when the caller is already late)
/// and reports the instant the tick was released at.
pub trait Pacer {
    fn take(&mut self) -> Instant;
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
    #[inline]
    fn take(&mut self) -> Instant {
        (**self).take()
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    #[inline]
    fn take(&mut self) -> Instant {
        (**self).take()
    }
}
