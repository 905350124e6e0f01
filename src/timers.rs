use std::convert::TryFrom;
use std::time::Duration;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// # Timers
/// The delay and sound timers count down towards 0 at a fixed rate (60Hz)
/// regardless of how fast the CPU is stepped.
///
/// Elapsed time is accumulated as nanoseconds multiplied by the timer frequency so
/// that one timer period is exactly `NANOS_PER_SECOND` units and no rounding
/// error builds up between ticks.
#[derive(Clone)]
pub struct Timers {
    delay_timer: u8,
    sound_timer: u8,
    frequency: u32,
    delay_counter: u128,
}

impl Timers {
    /// # Arguments
    /// * `frequency` how many times per second the timers decrement
    pub fn new(frequency: u32) -> Self {
        Timers {
            delay_timer: 0,
            sound_timer: 0,
            frequency,
            delay_counter: 0,
        }
    }

    /// Advance the timer clock by `elapsed`.
    /// - every timer period crossed decrements both timers once if they're above 0
    /// - returns how many periods were crossed
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        self.delay_counter += elapsed.as_nanos() * u128::from(self.frequency);

        let periods = self.delay_counter / NANOS_PER_SECOND;
        self.delay_counter %= NANOS_PER_SECOND;

        let decrement = u8::try_from(periods).unwrap_or(u8::MAX);
        self.delay_timer = self.delay_timer.saturating_sub(decrement);
        self.sound_timer = self.sound_timer.saturating_sub(decrement);

        u32::try_from(periods).unwrap_or(u32::MAX)
    }

    pub fn delay(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// A tone should be playing while the sound timer is above 0
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn reset(&mut self) {
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.delay_counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TIMER_FREQUENCY;

    #[test]
    fn test_doesnt_decrement_before_a_period() {
        let mut timers = Timers::new(TIMER_FREQUENCY);
        timers.set_delay(10);
        assert_eq!(timers.tick(Duration::from_millis(16)), 0);
        assert_eq!(timers.delay(), 10);
    }

    #[test]
    fn test_accumulates_short_ticks() {
        let mut timers = Timers::new(TIMER_FREQUENCY);
        timers.set_delay(10);
        timers.tick(Duration::from_millis(10));
        timers.tick(Duration::from_millis(10));
        assert_eq!(timers.delay(), 9);
    }

    #[test]
    fn test_catches_up_on_long_ticks() {
        let mut timers = Timers::new(TIMER_FREQUENCY);
        timers.set_delay(10);
        timers.set_sound(4);
        assert_eq!(timers.tick(Duration::from_millis(100)), 6);
        assert_eq!(timers.delay(), 4);
        assert_eq!(timers.sound(), 0);
    }

    #[test]
    fn test_decrements_sixty_times_a_second() {
        let mut timers = Timers::new(TIMER_FREQUENCY);
        timers.set_delay(60);
        let mut periods = 0;
        for _ in 0..1000 {
            periods += timers.tick(Duration::from_millis(1));
            assert!(timers.delay() <= 60);
        }
        assert_eq!(periods, 60);
        assert_eq!(timers.delay(), 0);
    }

    #[test]
    fn test_never_goes_below_zero() {
        let mut timers = Timers::new(TIMER_FREQUENCY);
        timers.set_sound(1);
        timers.tick(Duration::from_secs(600));
        assert_eq!(timers.sound(), 0);
        assert!(!timers.sound_active());
    }

    #[test]
    fn test_reset_drops_partial_period() {
        let mut timers = Timers::new(TIMER_FREQUENCY);
        timers.tick(Duration::from_millis(16));
        timers.reset();
        timers.set_delay(1);
        timers.tick(Duration::from_millis(1));
        assert_eq!(timers.delay(), 1);
    }
}
