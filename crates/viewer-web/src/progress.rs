/// Item-based loading progress, one item per fetched asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: u32,
    pub total: u32,
}

impl LoadProgress {
    pub fn new(total: u32) -> Self {
        Self { loaded: 0, total }
    }

    pub fn item_done(&mut self) {
        self.loaded = (self.loaded + 1).min(self.total);
    }

    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.loaded as f32 / self.total as f32) * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }

    pub fn label(&self) -> String {
        format!("Loading: {}%", self.percent())
    }
}
