use soroban_sdk::contracttype;

/// Monotonic supply-cap bookkeeping for a sale. `tokens_sold` only ever
/// grows, and only through [`CapAccounting::try_record`], which refuses any
/// amount that would push it past `total_tokens`: a purchase either fits
/// entirely or is rejected, never partially filled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CapAccounting {
    pub total_tokens: i128,
    pub tokens_sold: i128,
}

impl CapAccounting {
    pub fn new(total_tokens: i128) -> Self {
        CapAccounting {
            total_tokens,
            tokens_sold: 0,
        }
    }

    pub fn remaining(&self) -> i128 {
        self.total_tokens - self.tokens_sold
    }

    pub fn cap_reached(&self) -> bool {
        self.remaining() == 0
    }

    /// Records a sale of `tokens` if it fits in the remaining supply.
    /// Returns `false` (and leaves the counter untouched) otherwise.
    pub fn try_record(&mut self, tokens: i128) -> bool {
        if tokens <= 0 || tokens > self.remaining() {
            return false;
        }
        self.tokens_sold += tokens;
        true
    }
}
