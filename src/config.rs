use crate::constants::{CLOCK_SPEED, TIMER_FREQUENCY};
use crate::error::Chip8Error;

/// Host supplied settings for a Chip-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second
    pub clock_speed: u32,
    /// Timer decrements per second
    pub timer_frequency: u32,
    /// Seed for the random numbers handed out by RND; drawn from entropy if absent
    pub seed: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<(), Chip8Error> {
        if self.clock_speed == 0 {
            return Err(Chip8Error::InvalidConfig(
                "clock speed must be above 0Hz".to_string(),
            ));
        }
        if self.timer_frequency == 0 {
            return Err(Chip8Error::InvalidConfig(
                "timer frequency must be above 0Hz".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            timer_frequency: TIMER_FREQUENCY,
            seed: None,
        }
    }
}
