use crate::storage::*;
use crate::types::*;
use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, Address, Env, String,
};

contractmeta!(
    key = "Description",
    val = "Mintable, pausable sale token with one-shot ownership handover"
);

#[contract]
pub struct UacToken;

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = get_owner(env).ok_or(Error::NotInitialized)?;
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

fn spend_balance(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
    let balance = get_balance(env, from);
    if balance < amount {
        return Err(Error::InsufficientBalance);
    }
    set_balance(env, from, balance - amount);
    Ok(())
}

fn credit_balance(env: &Env, to: &Address, amount: i128) {
    let balance = get_balance(env, to);
    set_balance(env, to, balance + amount);
}

#[contractimpl]
impl UacToken {
    /// The token starts paused: nothing is transferable until the sale
    /// coordinator finalizes and lifts the gate.
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        decimal: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        set_owner(&env, &owner);
        set_metadata(
            &env,
            &TokenMetadata {
                decimal,
                name: name.clone(),
                symbol: symbol.clone(),
            },
        );
        set_paused(&env, true);
        set_minting_finished(&env, false);
        set_total_supply(&env, 0);

        env.events()
            .publish(("token_initialized",), (owner, name, symbol, decimal));

        Ok(())
    }

    /// Owner-only while minting is open. The only supply source.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if is_minting_finished(&env) {
            return Err(Error::MintingFinished);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        credit_balance(&env, &to, amount);
        set_total_supply(&env, get_total_supply(&env) + amount);

        env.events()
            .publish((symbol_short!("mint"),), (to.clone(), amount));
        env.events()
            .publish((symbol_short!("transfer"),), (to, amount));

        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if is_paused(&env) {
            return Err(Error::TokenPaused);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        spend_balance(&env, &from, amount)?;
        credit_balance(&env, &to, amount);

        env.events()
            .publish((symbol_short!("transfer"),), (from, to, amount));

        Ok(())
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        set_allowance(&env, &from, &spender, amount);

        env.events()
            .publish((symbol_short!("approve"),), (from, spender, amount));

        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        spender.require_auth();
        if is_paused(&env) {
            return Err(Error::TokenPaused);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let allowance = get_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(Error::InsufficientAllowance);
        }
        set_allowance(&env, &from, &spender, allowance - amount);

        spend_balance(&env, &from, amount)?;
        credit_balance(&env, &to, amount);

        env.events()
            .publish((symbol_short!("transfer"),), (from, to, amount));

        Ok(())
    }

    /// Transfer gate. Minting is unaffected.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_paused(&env, true);
        env.events().publish((symbol_short!("paused"),), ());
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_paused(&env, false);
        env.events().publish((symbol_short!("unpaused"),), ());
        Ok(())
    }

    /// Irreversible. A second call fails on the same guard that blocks
    /// further minting.
    pub fn finish_minting(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if is_minting_finished(&env) {
            return Err(Error::MintingFinished);
        }
        set_minting_finished(&env, true);
        env.events().publish((symbol_short!("mint_end"),), ());
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_owner(&env, &new_owner);
        env.events()
            .publish((symbol_short!("ownership"),), (caller, new_owner));
        Ok(())
    }

    // View functions
    pub fn balance(env: Env, id: Address) -> i128 {
        get_balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        get_allowance(&env, &from, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn owner(env: Env) -> Option<Address> {
        get_owner(&env)
    }

    pub fn paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn minting_finished(env: Env) -> bool {
        is_minting_finished(&env)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(get_metadata(&env).ok_or(Error::NotInitialized)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(get_metadata(&env).ok_or(Error::NotInitialized)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(get_metadata(&env).ok_or(Error::NotInitialized)?.decimal)
    }
}
