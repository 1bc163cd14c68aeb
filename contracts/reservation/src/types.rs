use sale_core::{SaleWindow, TOKEN_UNIT};
use soroban_sdk::{contracterror, contracttype, Address, Vec};

/// Tokens sellable during the reservation phase, in base units.
pub const RESERVATION_CAP: i128 = 7_500_000 * TOKEN_UNIT;

/// Base price in token base units per payment base unit.
pub const BASE_PRICE: i128 = 250;

/// Flat reservation bonus: 10% on top of the base price for the whole phase.
pub const BONUS_PERCENT: u32 = 110;

pub const PRICE: i128 = BASE_PRICE * BONUS_PERCENT as i128 / 100;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    SalePaused = 4,
    SaleNotStarted = 5,
    SaleEnded = 6,
    InvalidAmount = 7,
    InvalidKycSignature = 8,
    KycCapExceeded = 9,
    CapExceeded = 10,
    InvalidTimeRange = 11,
    NoKycSigners = 12,
}

#[derive(Clone)]
#[contracttype]
pub struct ReservationConfig {
    pub owner: Address,
    pub crowdsale: Address,
    pub payment_token: Address,
    pub kyc_verifier: Address,
    pub kyc_signers: Vec<Address>,
    pub wallet: Address,
    pub window: SaleWindow,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Cap,
    Paused,
    Spent(Address),
}
