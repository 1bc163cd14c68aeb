use crate::storage::*;
use crate::types::*;
use sale_core::{authorization_hash, price_for_elapsed, tokens_for, CapAccounting, SaleWindow};
use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, token, Address, Bytes, BytesN, Env,
    IntoVal, Symbol, Val, Vec,
};

contractmeta!(
    key = "Description",
    val = "Tiered-bonus crowdsale coordinating the two-phase UAC token sale"
);

#[contract]
pub struct Crowdsale;

fn require_owner(env: &Env, caller: &Address) -> Result<SaleConfig, Error> {
    caller.require_auth();
    let config = get_config(env).ok_or(Error::NotInitialized)?;
    if *caller != config.owner {
        return Err(Error::Unauthorized);
    }
    Ok(config)
}

/// Invokes an owner-gated entry point on the token, authorizing as this
/// contract. The coordinator holds the token's mint rights from
/// `initialize` until `finalise`.
fn invoke_token(env: &Env, token: &Address, func: &str, mut args: Vec<Val>) {
    args.push_front(env.current_contract_address().into_val(env));
    let _: Val = env.invoke_contract(token, &Symbol::new(env, func), args);
}

fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    invoke_token(
        env,
        token,
        "mint",
        Vec::from_array(env, [to.clone().into_val(env), amount.into_val(env)]),
    );
}

fn current_price(env: &Env, window: &SaleWindow) -> i128 {
    let elapsed = env.ledger().timestamp().saturating_sub(window.start_time);
    price_for_elapsed(BASE_PRICE, &BONUS_TIERS, elapsed)
}

fn do_buy(
    env: &Env,
    buyer: Address,
    beneficiary: Address,
    buyer_id: u64,
    max_amount: i128,
    authorization: Bytes,
    value: i128,
) -> Result<(), Error> {
    buyer.require_auth();

    let config = get_config(env).ok_or(Error::NotInitialized)?;
    if is_paused(env) {
        return Err(Error::SalePaused);
    }

    let now = env.ledger().timestamp();
    if !config.window.started(now) {
        return Err(Error::SaleNotStarted);
    }
    if config.window.ended(now) {
        return Err(Error::SaleEnded);
    }

    if value <= 0 {
        return Err(Error::InvalidAmount);
    }

    let digest = authorization_hash(
        env,
        &env.current_contract_address(),
        &beneficiary,
        buyer_id,
        max_amount,
    );
    let signer: Option<Address> = env.invoke_contract(
        &config.kyc_verifier,
        &Symbol::new(env, "verify"),
        Vec::from_array(env, [digest.into_val(env), authorization.into_val(env)]),
    );
    let signer = signer.ok_or(Error::InvalidKycSignature)?;
    if !config.kyc_signers.contains(&signer) {
        return Err(Error::InvalidKycSignature);
    }

    // The signed cap bounds cumulative contributed value, not tokens: the
    // tier price moves during the sale, a value-denominated cap does not.
    let spent = get_spent(env, &beneficiary);
    let new_spent = spent.checked_add(value).ok_or(Error::InvalidAmount)?;
    if new_spent > max_amount {
        return Err(Error::KycCapExceeded);
    }

    let price = current_price(env, &config.window);
    let tokens = tokens_for(value, price).ok_or(Error::InvalidAmount)?;

    // One counter backs both phases; whatever the reservation already sold
    // has been charged here too.
    let mut cap = get_cap(env).ok_or(Error::NotInitialized)?;
    if !cap.try_record(tokens) {
        return Err(Error::CapExceeded);
    }
    set_cap(env, &cap);
    set_spent(env, &beneficiary, new_spent);

    let payment = token::Client::new(env, &config.payment_token);
    payment.transfer(&buyer, &config.wallet, &value);

    mint_tokens(env, &config.token, &beneficiary, tokens);

    env.events().publish(
        (symbol_short!("buy"),),
        (buyer, beneficiary, value, tokens, price),
    );

    Ok(())
}

#[contractimpl]
impl Crowdsale {
    /// One-shot setup. The coordinator must already own the token's mint
    /// rights: the three fixed category allocations are minted here, and
    /// ownership is only handed back at `finalise`.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        reservation: Address,
        payment_token: Address,
        kyc_verifier: Address,
        kyc_signers: Vec<Address>,
        wallet: Address,
        founders_vault: Address,
        advisors_wallet: Address,
        ubiatar_play_vault: Address,
        presale_vault: Address,
        start_time: u64,
        end_time: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        let window = SaleWindow::new(start_time, end_time).ok_or(Error::InvalidTimeRange)?;
        if kyc_signers.is_empty() {
            return Err(Error::NoKycSigners);
        }

        let config = SaleConfig {
            owner,
            token: token.clone(),
            reservation,
            payment_token,
            kyc_verifier,
            kyc_signers,
            wallet,
            founders_vault: founders_vault.clone(),
            advisors_wallet: advisors_wallet.clone(),
            ubiatar_play_vault: ubiatar_play_vault.clone(),
            presale_vault,
            window,
        };
        set_config(&env, &config);
        set_cap(&env, &CapAccounting::new(CROWDSALE_CAP));
        set_paused(&env, false);

        mint_tokens(&env, &token, &founders_vault, FOUNDERS_CAP);
        mint_tokens(&env, &token, &advisors_wallet, ADVISORS_CAP);
        mint_tokens(&env, &token, &ubiatar_play_vault, UBIATARPLAY_CAP);

        env.events().publish(
            ("sale_initialized",),
            (start_time, end_time, CROWDSALE_CAP),
        );

        Ok(())
    }

    /// Funds and initializes the presale vault with the grant table. Owner
    /// only, exactly once, and only while the reservation phase has not yet
    /// started.
    pub fn init_presale_vault(
        env: Env,
        caller: Address,
        investors: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        let config = require_owner(&env, &caller)?;

        if is_presale_vault_initialized(&env) {
            return Err(Error::PresaleAlreadyInit);
        }
        if investors.len() != amounts.len() {
            return Err(Error::LengthMismatch);
        }
        if investors.is_empty() {
            return Err(Error::InvalidAmount);
        }

        let reservation_start: u64 = env.invoke_contract(
            &config.reservation,
            &Symbol::new(&env, "start_time"),
            Vec::new(&env),
        );
        if env.ledger().timestamp() >= reservation_start {
            return Err(Error::ReservationStarted);
        }

        let mut total: i128 = 0;
        for i in 0..amounts.len() {
            let amount = amounts.get(i).ok_or(Error::LengthMismatch)?;
            if amount <= 0 {
                return Err(Error::InvalidAmount);
            }
            total = total.checked_add(amount).ok_or(Error::InvalidAmount)?;
        }

        set_presale_vault_initialized(&env);
        mint_tokens(&env, &config.token, &config.presale_vault, total);

        // Grants unlock from the end of the crowdsale window.
        let _: Val = env.invoke_contract(
            &config.presale_vault,
            &Symbol::new(&env, "init"),
            Vec::from_array(
                &env,
                [
                    env.current_contract_address().into_val(&env),
                    config.token.clone().into_val(&env),
                    config.window.end_time.into_val(&env),
                    investors.into_val(&env),
                    amounts.into_val(&env),
                ],
            ),
        );

        env.events()
            .publish((symbol_short!("psinit"),), total);

        Ok(())
    }

    /// Restricted mint gateway for the reservation phase: bounded,
    /// increment-only access to the shared two-phase counter.
    pub fn mint_reservation_tokens(
        env: Env,
        caller: Address,
        beneficiary: Address,
        tokens: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        if caller != config.reservation {
            return Err(Error::Unauthorized);
        }
        if tokens <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut cap = get_cap(&env).ok_or(Error::NotInitialized)?;
        if !cap.try_record(tokens) {
            return Err(Error::CapExceeded);
        }
        set_cap(&env, &cap);

        mint_tokens(&env, &config.token, &beneficiary, tokens);

        env.events()
            .publish((symbol_short!("resmint"),), (beneficiary, tokens));

        Ok(())
    }

    pub fn buy_tokens(
        env: Env,
        buyer: Address,
        buyer_id: u64,
        max_amount: i128,
        authorization: Bytes,
        value: i128,
    ) -> Result<(), Error> {
        do_buy(
            &env,
            buyer.clone(),
            buyer,
            buyer_id,
            max_amount,
            authorization,
            value,
        )
    }

    pub fn buy_tokens_for(
        env: Env,
        buyer: Address,
        beneficiary: Address,
        buyer_id: u64,
        max_amount: i128,
        authorization: Bytes,
        value: i128,
    ) -> Result<(), Error> {
        do_buy(
            &env,
            buyer,
            beneficiary,
            buyer_id,
            max_amount,
            authorization,
            value,
        )
    }

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

    /// Owner's explicit end-of-sale signal, valid once the sale has started.
    /// Deliberately separate from the time-based `ended` so that finalizing
    /// takes both the clock and an owner decision.
    pub fn close_crowdsale(env: Env, caller: Address) -> Result<(), Error> {
        let config = require_owner(&env, &caller)?;

        if !config.window.started(env.ledger().timestamp()) {
            return Err(Error::SaleNotStarted);
        }
        if is_owner_closed(&env) {
            return Err(Error::AlreadyClosed);
        }

        set_owner_closed(&env);
        env.events().publish((symbol_short!("closed"),), ());

        Ok(())
    }

    /// Irreversibly ends the sale: minting stops for good, token transfers
    /// open up, and the token's ownership moves back to the sale owner.
    pub fn finalise(env: Env, caller: Address) -> Result<(), Error> {
        let config = require_owner(&env, &caller)?;

        if is_finalized(&env) {
            return Err(Error::AlreadyFinalized);
        }
        if !is_owner_closed(&env) {
            return Err(Error::NotClosed);
        }
        if !config.window.ended(env.ledger().timestamp()) {
            return Err(Error::SaleNotEnded);
        }

        set_finalized(&env);

        invoke_token(&env, &config.token, "finish_minting", Vec::new(&env));
        invoke_token(&env, &config.token, "unpause", Vec::new(&env));
        invoke_token(
            &env,
            &config.token,
            "transfer_ownership",
            Vec::from_array(&env, [config.owner.clone().into_val(&env)]),
        );

        env.events().publish((symbol_short!("finalised"),), ());

        Ok(())
    }

    // View functions
    pub fn started(env: Env) -> Result<bool, Error> {
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        Ok(config.window.started(env.ledger().timestamp()))
    }

    pub fn ended(env: Env) -> Result<bool, Error> {
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        Ok(config.window.ended(env.ledger().timestamp()))
    }

    pub fn start_time(env: Env) -> Result<u64, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.window.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, Error> {
        Ok(get_config(&env).ok_or(Error::NotInitialized)?.window.end_time)
    }

    /// Current tier price in token base units per payment base unit.
    pub fn price(env: Env) -> Result<i128, Error> {
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        Ok(current_price(&env, &config.window))
    }

    pub fn total_tokens(env: Env) -> Result<i128, Error> {
        Ok(get_cap(&env).ok_or(Error::NotInitialized)?.total_tokens)
    }

    /// Tokens sold across both phases.
    pub fn tokens_sold(env: Env) -> Result<i128, Error> {
        Ok(get_cap(&env).ok_or(Error::NotInitialized)?.tokens_sold)
    }

    pub fn remaining_tokens(env: Env) -> Result<i128, Error> {
        Ok(get_cap(&env).ok_or(Error::NotInitialized)?.remaining())
    }

    pub fn cap_reached(env: Env) -> Result<bool, Error> {
        Ok(get_cap(&env).ok_or(Error::NotInitialized)?.cap_reached())
    }

    pub fn paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn owner_closed(env: Env) -> bool {
        is_owner_closed(&env)
    }

    pub fn finalized(env: Env) -> bool {
        is_finalized(&env)
    }

    pub fn spent(env: Env, beneficiary: Address) -> i128 {
        get_spent(&env, &beneficiary)
    }

    pub fn get_config(env: Env) -> Option<SaleConfig> {
        get_config(&env)
    }

    /// The digest an off-chain KYC signer must sign to authorize
    /// `beneficiary` up to `max_amount` on this sale.
    pub fn authorization_digest(
        env: Env,
        beneficiary: Address,
        buyer_id: u64,
        max_amount: i128,
    ) -> BytesN<32> {
        authorization_hash(
            &env,
            &env.current_contract_address(),
            &beneficiary,
            buyer_id,
            max_amount,
        )
    }
}
