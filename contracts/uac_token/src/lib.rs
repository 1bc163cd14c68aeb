#![no_std]

mod contract;
mod storage;
mod types;


pub use contract::{UacToken, UacTokenClient};
pub use types::{Error, TokenMetadata};
