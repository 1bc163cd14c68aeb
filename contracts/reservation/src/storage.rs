use crate::types::*;
use sale_core::CapAccounting;
use soroban_sdk::{Address, Env};

pub fn get_config(env: &Env) -> Option<ReservationConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &ReservationConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_cap(env: &Env) -> Option<CapAccounting> {
    env.storage().instance().get(&DataKey::Cap)
}

pub fn set_cap(env: &Env, cap: &CapAccounting) {
    env.storage().instance().set(&DataKey::Cap, cap);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_spent(env: &Env, beneficiary: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Spent(beneficiary.clone()))
        .unwrap_or(0)
}

pub fn set_spent(env: &Env, beneficiary: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Spent(beneficiary.clone()), &amount);
}
