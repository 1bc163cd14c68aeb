#![no_std]

mod contract;
mod storage;
mod types;


pub use contract::{Crowdsale, CrowdsaleClient};
pub use types::{
    Error, SaleConfig, ADVISORS_CAP, BASE_PRICE, BONUS_TIERS, CROWDSALE_CAP, FOUNDERS_CAP,
    UBIATARPLAY_CAP,
};
