/// Counts scrolled pixels and fires once every `interval`.
#[derive(Clone, Debug)]
pub struct DistanceTrigger {
    travelled: f32,
    interval: f32,
}

impl DistanceTrigger {
    pub fn new(interval: f32) -> Self {
        Self {
            travelled: 0.0,
            interval,
        }
    }

    /// Add `step` pixels. True when the interval has been strictly exceeded;
    /// the overshoot carries into the next interval.
    pub fn advance(&mut self, step: f32) -> bool {
        self.travelled += step;
        if self.travelled > self.interval {
            self.travelled -= self.interval;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.travelled = 0.0;
    }
}
