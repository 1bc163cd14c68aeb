use soroban_sdk::{contracterror, contracttype, Address, String};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    TokenPaused = 4,
    MintingFinished = 5,
    InvalidAmount = 6,
    InsufficientBalance = 7,
    InsufficientAllowance = 8,
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,
    Metadata,
    Paused,
    MintingFinished,
    TotalSupply,
    Balance(Address),
    Allowance(Address, Address),
}
