use soroban_sdk::contracttype;

/// Absolute sale window. Immutable once stored in a sale's config.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleWindow {
    pub start_time: u64,
    pub end_time: u64,
}

impl SaleWindow {
    /// `None` unless `start_time < end_time`.
    pub fn new(start_time: u64, end_time: u64) -> Option<Self> {
        if start_time < end_time {
            Some(SaleWindow {
                start_time,
                end_time,
            })
        } else {
            None
        }
    }

    pub fn started(&self, now: u64) -> bool {
        now >= self.start_time
    }

    pub fn ended(&self, now: u64) -> bool {
        now >= self.end_time
    }

    /// Purchases are accepted in `[start_time, end_time)`.
    pub fn is_open(&self, now: u64) -> bool {
        self.started(now) && !self.ended(now)
    }
}
