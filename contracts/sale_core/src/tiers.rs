/// One bonus bracket of a tiered price schedule. `duration` is cumulative,
/// measured from the sale's start; tiers are ordered and contiguous.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BonusTier {
    pub duration: u64,
    pub multiplier_percent: u32,
}

/// Price after `elapsed` seconds of sale time: the first tier whose window
/// still contains `elapsed` wins, the base price applies once every tier has
/// elapsed. Tier prices floor-divide, so rounding favors the sale.
pub fn price_for_elapsed(base_price: i128, tiers: &[BonusTier], elapsed: u64) -> i128 {
    for tier in tiers {
        if elapsed < tier.duration {
            return base_price * tier.multiplier_percent as i128 / 100;
        }
    }
    base_price
}
