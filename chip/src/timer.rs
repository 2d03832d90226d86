pub trait Timed {
    /// Will create a new timer with the given value.
    fn new(value: u8) -> Self;

    /// Will set the value from which the timer shall count down from.
    fn set_value(&mut self, value: u8);

    /// Will get the value that the counter is currently at.
    fn get_value(&self) -> u8;

    /// Will count the timer down by one, it never goes below zero.
    fn tick(&mut self);
}

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given.
///
/// The timer has no clock of its own, the host is expected to call
/// [`tick`](Timed::tick) at 60Hz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// will store the value of the timer
    value: u8,
}

impl Timed for Timer {
    fn new(value: u8) -> Self {
        Self { value }
    }

    fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    fn get_value(&self) -> u8 {
        self.value
    }

    fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::timer::HERTZ;

    #[test]
    fn test_timer() {
        let mut timer = Timer::new(HERTZ);

        // one second worth of ticks
        for _ in 0..HERTZ {
            timer.tick();
        }
        assert_eq!(timer.get_value(), 0);

        timer.tick();
        assert_eq!(timer.get_value(), 0);
    }

    #[test]
    fn test_set_value() {
        let mut timer = Timer::default();
        timer.set_value(2);
        timer.tick();
        assert_eq!(timer.get_value(), 1);
    }
}
