use sale_core::{BonusTier, SaleWindow, TOKEN_UNIT};
use soroban_sdk::{contracterror, contracttype, Address, Vec};

/// Combined cap across the reservation and crowdsale phases, in base units.
pub const CROWDSALE_CAP: i128 = 15_000_000 * TOKEN_UNIT;

pub const FOUNDERS_CAP: i128 = 12_000_000 * TOKEN_UNIT;
pub const UBIATARPLAY_CAP: i128 = 50_500_000 * TOKEN_UNIT;
pub const ADVISORS_CAP: i128 = 4_915_221_448_641_099_899_301_307;

/// Base price in token base units per payment base unit.
pub const BASE_PRICE: i128 = 250;

/// Bonus brackets over the crowdsale's own start: 8% for the first 3 hours,
/// 6% until hour 12, 4% until hour 42, base price afterwards.
pub const BONUS_TIERS: [BonusTier; 3] = [
    BonusTier {
        duration: 3 * 3600,
        multiplier_percent: 108,
    },
    BonusTier {
        duration: 12 * 3600,
        multiplier_percent: 106,
    },
    BonusTier {
        duration: 42 * 3600,
        multiplier_percent: 104,
    },
];

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
    SaleNotEnded = 7,
    InvalidAmount = 8,
    InvalidKycSignature = 9,
    KycCapExceeded = 10,
    CapExceeded = 11,
    InvalidTimeRange = 12,
    NoKycSigners = 13,
    LengthMismatch = 14,
    PresaleAlreadyInit = 15,
    ReservationStarted = 16,
    AlreadyClosed = 17,
    NotClosed = 18,
    AlreadyFinalized = 19,
}

#[derive(Clone)]
#[contracttype]
pub struct SaleConfig {
    pub owner: Address,
    pub token: Address,
    pub reservation: Address,
    pub payment_token: Address,
    pub kyc_verifier: Address,
    pub kyc_signers: Vec<Address>,
    pub wallet: Address,
    pub founders_vault: Address,
    pub advisors_wallet: Address,
    pub ubiatar_play_vault: Address,
    pub presale_vault: Address,
    pub window: SaleWindow,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Cap,
    Paused,
    OwnerClosed,
    Finalized,
    PresaleVaultInit,
    Spent(Address),
}
