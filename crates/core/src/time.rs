/// Q32.32 fixed-point duration in microseconds.
///
/// Config durations are authored in milliseconds and turned into whole ticks
/// once, so game logic never accumulates float error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(u64);

impl Micros {
    const FRAC_BITS: u32 = 32;
    const MICROS_PER_SEC: u64 = 1_000_000;

    pub const fn from_millis(millis: u32) -> Self {
        Self((millis as u64 * 1_000) << Self::FRAC_BITS)
    }

    /// Length of one frame at `tick_hz`.
    pub const fn per_tick(tick_hz: u32) -> Self {
        Self((Self::MICROS_PER_SEC << Self::FRAC_BITS) / tick_hz as u64)
    }

    /// Whole ticks at `tick_hz`, rounded down. 128-bit intermediate.
    pub const fn to_ticks(self, tick_hz: u32) -> u64 {
        let numer = self.0 as u128 * tick_hz as u128;
        let denom = Self::MICROS_PER_SEC << Self::FRAC_BITS;
        (numer / denom as u128) as u64
    }

    /// Lossy, for per-frame physics.
    pub fn as_secs_f32(self) -> f32 {
        let whole_micros = (self.0 >> Self::FRAC_BITS) as f64;
        let frac = (self.0 & 0xFFFF_FFFF) as f64 / (1u64 << Self::FRAC_BITS) as f64;
        ((whole_micros + frac) / Self::MICROS_PER_SEC as f64) as f32
    }
}
