/// Count-down register. The cycle driver ticks it once per step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    count: u8,
}

impl Timer {
    pub fn new(init_count: u8) -> Self {
        Self { count: init_count }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn get(&self) -> u8 {
        self.count
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Decrements while positive.
    pub fn tick(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}
