#![no_std]

//! Cliff-and-linear vesting vault for a single beneficiary.
//!
//! The grant accrues linearly over `total_duration` seconds from
//! `start_time`, but nothing is withdrawable before the cliff. `release` is
//! pull-style and callable by anyone; tokens only ever move to the fixed
//! beneficiary. Calling it while nothing is releasable is an error; the
//! discrete-window presale vault makes the opposite choice.

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, token,
    Address, Env,
};

contractmeta!(
    key = "Description",
    val = "Cliff plus linear vesting vault for a single beneficiary"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidTimeRange = 3,
    InvalidAmount = 4,
    NothingToRelease = 5,
}

#[derive(Clone)]
#[contracttype]
pub struct VestingSchedule {
    pub token: Address,
    pub beneficiary: Address,
    pub start_time: u64,
    pub cliff_duration: u64,
    pub total_duration: u64,
    pub total_amount: i128,
    pub released: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Schedule,
}

fn vested_amount(schedule: &VestingSchedule, now: u64) -> i128 {
    if now < schedule.start_time + schedule.cliff_duration {
        return 0;
    }
    let elapsed = now - schedule.start_time;
    if elapsed >= schedule.total_duration {
        schedule.total_amount
    } else {
        schedule.total_amount * elapsed as i128 / schedule.total_duration as i128
    }
}

#[contract]
pub struct VestingVault;

#[contractimpl]
impl VestingVault {
    pub fn initialize(
        env: Env,
        token: Address,
        beneficiary: Address,
        start_time: u64,
        cliff_duration: u64,
        total_duration: u64,
        total_amount: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Schedule) {
            return Err(Error::AlreadyInitialized);
        }
        if total_duration == 0 || cliff_duration > total_duration {
            return Err(Error::InvalidTimeRange);
        }
        if total_amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let schedule = VestingSchedule {
            token: token.clone(),
            beneficiary: beneficiary.clone(),
            start_time,
            cliff_duration,
            total_duration,
            total_amount,
            released: 0,
        };
        env.storage().instance().set(&DataKey::Schedule, &schedule);

        env.events().publish(
            ("vault_initialized",),
            (token, beneficiary, start_time, total_amount),
        );

        Ok(())
    }

    /// Releases everything vested so far and not yet paid out. Callable by
    /// anyone. Returns the amount released.
    pub fn release(env: Env) -> Result<i128, Error> {
        let mut schedule: VestingSchedule = env
            .storage()
            .instance()
            .get(&DataKey::Schedule)
            .ok_or(Error::NotInitialized)?;

        let now = env.ledger().timestamp();
        let releasable = vested_amount(&schedule, now) - schedule.released;
        if releasable <= 0 {
            return Err(Error::NothingToRelease);
        }

        schedule.released += releasable;
        env.storage().instance().set(&DataKey::Schedule, &schedule);

        let token_client = token::Client::new(&env, &schedule.token);
        token_client.transfer(
            &env.current_contract_address(),
            &schedule.beneficiary,
            &releasable,
        );

        env.events().publish(
            (symbol_short!("released"),),
            (schedule.beneficiary, releasable),
        );

        Ok(releasable)
    }

    // View functions
    pub fn releasable(env: Env) -> Result<i128, Error> {
        let schedule: VestingSchedule = env
            .storage()
            .instance()
            .get(&DataKey::Schedule)
            .ok_or(Error::NotInitialized)?;
        Ok(vested_amount(&schedule, env.ledger().timestamp()) - schedule.released)
    }

    pub fn released(env: Env) -> Result<i128, Error> {
        let schedule: VestingSchedule = env
            .storage()
            .instance()
            .get(&DataKey::Schedule)
            .ok_or(Error::NotInitialized)?;
        Ok(schedule.released)
    }

    pub fn get_schedule(env: Env) -> Option<VestingSchedule> {
        env.storage().instance().get(&DataKey::Schedule)
    }
}
