#![no_std]

mod contract;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use contract::{ReservationSale, ReservationSaleClient};
pub use types::{Error, ReservationConfig, BASE_PRICE, BONUS_PERCENT, PRICE, RESERVATION_CAP};
