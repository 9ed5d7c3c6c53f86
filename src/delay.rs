use crate::message::Delay;
use std::time::Duration;

impl Delay {
    ///
    /// Duration the delay stands for, or `None` when nothing should be
    /// waited (I2C delay for a bus speed without a known timing).
    ///
    pub fn duration(self) -> Option<Duration> {
        match self {
            Delay::Nanos(n) => Some(Duration::from_nanos(n as u64)),
            Delay::HundredNanos(n) => Some(Duration::from_nanos(n as u64 * 100)),
            Delay::TenMicros(n) => Some(Duration::from_micros(n as u64 * 10)),
            Delay::Millis(n) => Some(Duration::from_millis(n as u64)),
            // half a clock period at 100 kHz / 400 kHz
            Delay::I2c(1) => Some(Duration::from_micros(5)),
            Delay::I2c(4) => Some(Duration::from_nanos(1250)),
            Delay::I2c(_) => None,
        }
    }

    ///
    /// Blocks the calling thread for at least the delay's duration.
    ///
    pub fn block(self) {
        if let Some(duration) = self.duration() {
            spin_sleep::sleep(duration);
        }
    }
}
