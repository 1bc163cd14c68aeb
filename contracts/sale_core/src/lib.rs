#![no_std]

//! Shared primitives for the UAC sale contracts: sale windows, monotonic
//! cap accounting, the time-tiered bonus price schedule and the KYC
//! authorization digest both sale contracts and off-chain signers agree on.

mod cap;
mod kyc;
mod tiers;
mod window;

pub use cap::CapAccounting;
pub use kyc::authorization_hash;
pub use tiers::{price_for_elapsed, BonusTier};
pub use window::SaleWindow;

/// One whole token in ledger base units (18 decimals).
pub const TOKEN_UNIT: i128 = 1_000_000_000_000_000_000;

/// Tokens bought by a contribution of `value` payment base units at `price`
/// token base units per payment base unit. `None` on overflow.
pub fn tokens_for(value: i128, price: i128) -> Option<i128> {
    value.checked_mul(price)
}
