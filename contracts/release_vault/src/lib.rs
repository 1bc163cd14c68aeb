#![no_std]

//! Single-date lockup vault: the whole token balance becomes withdrawable to
//! one fixed beneficiary at `release_time`, nothing before. Pull-style,
//! callable by anyone.

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, token,
    Address, Env,
};

contractmeta!(
    key = "Description",
    val = "Single-beneficiary token lockup with one release date"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotReleasable = 3,
    NothingToRelease = 4,
}

#[derive(Clone)]
#[contracttype]
pub struct LockupConfig {
    pub token: Address,
    pub beneficiary: Address,
    pub release_time: u64,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
}

#[contract]
pub struct ReleaseVault;

#[contractimpl]
impl ReleaseVault {
    pub fn initialize(
        env: Env,
        token: Address,
        beneficiary: Address,
        release_time: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }

        let config = LockupConfig {
            token: token.clone(),
            beneficiary: beneficiary.clone(),
            release_time,
        };
        env.storage().instance().set(&DataKey::Config, &config);

        env.events()
            .publish(("vault_initialized",), (token, beneficiary, release_time));

        Ok(())
    }

    /// Transfers the entire current balance to the beneficiary once the
    /// release date has passed. Returns the amount released.
    pub fn release(env: Env) -> Result<i128, Error> {
        let config: LockupConfig = env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)?;

        if env.ledger().timestamp() < config.release_time {
            return Err(Error::NotReleasable);
        }

        let token_client = token::Client::new(&env, &config.token);
        let balance = token_client.balance(&env.current_contract_address());
        if balance <= 0 {
            return Err(Error::NothingToRelease);
        }

        token_client.transfer(
            &env.current_contract_address(),
            &config.beneficiary,
            &balance,
        );

        env.events()
            .publish((symbol_short!("released"),), (config.beneficiary, balance));

        Ok(balance)
    }

    pub fn get_config(env: Env) -> Option<LockupConfig> {
        env.storage().instance().get(&DataKey::Config)
    }
}
