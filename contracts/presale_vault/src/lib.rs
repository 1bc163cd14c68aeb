#![no_std]

//! Vault for presale investor grants, unlocked in discrete windows.
//!
//! Each investor's fixed grant unlocks one third at the release start, one
//! third 90 days later and the remainder (absorbing rounding dust) 90 days
//! after that. `release` is pull-style and callable by anyone; when nothing
//! is currently unlocked it is a silent no-op returning 0, unlike the
//! linear vesting vault, which errors in that case.

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, token,
    Address, Env, Vec,
};

contractmeta!(
    key = "Description",
    val = "Presale investor grants released over discrete unlock windows"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    LengthMismatch = 3,
    InvalidAmount = 4,
    NoGrant = 5,
}

/// Offsets of the unlock windows from the release start.
pub const UNLOCK_OFFSETS: [u64; 3] = [0, 90 * 86_400, 180 * 86_400];

#[derive(Clone)]
#[contracttype]
pub struct Grant {
    pub amount: i128,
    pub released: i128,
}

#[derive(Clone)]
#[contracttype]
pub struct VaultConfig {
    pub coordinator: Address,
    pub token: Address,
    pub release_start: u64,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Grant(Address),
}

fn unlocked_amount(amount: i128, release_start: u64, now: u64) -> i128 {
    let mut windows = 0usize;
    for offset in UNLOCK_OFFSETS {
        if now >= release_start + offset {
            windows += 1;
        }
    }
    if windows == UNLOCK_OFFSETS.len() {
        // Final window releases the remainder, so rounding dust never
        // strands in the vault.
        amount
    } else {
        amount * windows as i128 / UNLOCK_OFFSETS.len() as i128
    }
}

#[contract]
pub struct PresaleVault;

#[contractimpl]
impl PresaleVault {
    /// One-shot setup, invoked by the sale coordinator after it has minted
    /// the grant total into this vault.
    pub fn init(
        env: Env,
        caller: Address,
        token: Address,
        release_start: u64,
        investors: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        caller.require_auth();

        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        if investors.len() != amounts.len() {
            return Err(Error::LengthMismatch);
        }
        if investors.is_empty() {
            return Err(Error::InvalidAmount);
        }

        for i in 0..investors.len() {
            let investor = investors.get(i).ok_or(Error::LengthMismatch)?;
            let amount = amounts.get(i).ok_or(Error::LengthMismatch)?;
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }
            env.storage().persistent().set(
                &DataKey::Grant(investor),
                &Grant {
                    amount,
                    released: 0,
                },
            );
        }

        let config = VaultConfig {
            coordinator: caller,
            token,
            release_start,
        };
        env.storage().instance().set(&DataKey::Config, &config);

        env.events()
            .publish(("vault_initialized",), (release_start, investors.len()));

        Ok(())
    }

    /// Pays out whatever is unlocked and unpaid for `investor`; a no-op
    /// returning 0 between windows. Callable by anyone.
    pub fn release(env: Env, investor: Address) -> Result<i128, Error> {
        let config: VaultConfig = env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)?;
        let mut grant: Grant = env
            .storage()
            .persistent()
            .get(&DataKey::Grant(investor.clone()))
            .ok_or(Error::NoGrant)?;

        let now = env.ledger().timestamp();
        let releasable = unlocked_amount(grant.amount, config.release_start, now) - grant.released;
        if releasable <= 0 {
            return Ok(0);
        }

        grant.released += releasable;
        env.storage()
            .persistent()
            .set(&DataKey::Grant(investor.clone()), &grant);

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&env.current_contract_address(), &investor, &releasable);

        env.events()
            .publish((symbol_short!("released"),), (investor, releasable));

        Ok(releasable)
    }

    // View functions
    pub fn releasable(env: Env, investor: Address) -> Result<i128, Error> {
        let config: VaultConfig = env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)?;
        let grant: Grant = env
            .storage()
            .persistent()
            .get(&DataKey::Grant(investor))
            .ok_or(Error::NoGrant)?;
        Ok(unlocked_amount(grant.amount, config.release_start, env.ledger().timestamp())
            - grant.released)
    }

    pub fn get_grant(env: Env, investor: Address) -> Option<Grant> {
        env.storage().persistent().get(&DataKey::Grant(investor))
    }

    pub fn get_config(env: Env) -> Option<VaultConfig> {
        env.storage().instance().get(&DataKey::Config)
    }
}
