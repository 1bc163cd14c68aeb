use crate::storage::*;
use crate::types::*;
use sale_core::{authorization_hash, tokens_for, CapAccounting, SaleWindow};
use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, token, Address, Bytes, BytesN, Env,
    IntoVal, Symbol, Val, Vec,
};

contractmeta!(
    key = "Description",
    val = "Fixed-price KYC-gated reservation phase of the UAC sale"
);

#[contract]
pub struct ReservationSale;

fn require_owner(env: &Env, caller: &Address) -> Result<ReservationConfig, Error> {
    caller.require_auth();
    let config = get_config(env).ok_or(Error::NotInitialized)?;
    if *caller != config.owner {
        return Err(Error::Unauthorized);
    }
    Ok(config)
}

/// Shared purchase path for `buy_tokens` and `buy_tokens_for`. Preconditions
/// are checked in a fixed order, each with its own error, before any state
/// is touched.
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

    // The signed cap bounds cumulative contributed value, not tokens.
    let spent = get_spent(env, &beneficiary);
    let new_spent = spent.checked_add(value).ok_or(Error::InvalidAmount)?;
    if new_spent > max_amount {
        return Err(Error::KycCapExceeded);
    }

    let tokens = tokens_for(value, PRICE).ok_or(Error::InvalidAmount)?;
    let mut cap = get_cap(env).ok_or(Error::NotInitialized)?;
    if !cap.try_record(tokens) {
        return Err(Error::CapExceeded);
    }
    set_cap(env, &cap);
    set_spent(env, &beneficiary, new_spent);

    // Proceeds go straight to the configured wallet.
    let payment = token::Client::new(env, &config.payment_token);
    payment.transfer(&buyer, &config.wallet, &value);

    // Minting goes through the coordinator, which also charges the combined
    // two-phase cap.
    let _: Val = env.invoke_contract(
        &config.crowdsale,
        &Symbol::new(env, "mint_reservation_tokens"),
        Vec::from_array(
            env,
            [
                env.current_contract_address().into_val(env),
                beneficiary.clone().into_val(env),
                tokens.into_val(env),
            ],
        ),
    );

    env.events().publish(
        (symbol_short!("buy"),),
        (buyer, beneficiary, value, tokens, PRICE),
    );

    Ok(())
}

#[contractimpl]
impl ReservationSale {
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        crowdsale: Address,
        payment_token: Address,
        kyc_verifier: Address,
        kyc_signers: Vec<Address>,
        wallet: Address,
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

        let config = ReservationConfig {
            owner,
            crowdsale,
            payment_token,
            kyc_verifier,
            kyc_signers,
            wallet,
            window,
        };
        set_config(&env, &config);
        set_cap(&env, &CapAccounting::new(RESERVATION_CAP));
        set_paused(&env, false);

        env.events()
            .publish(("sale_initialized",), (start_time, end_time, PRICE));

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

    pub fn price(_env: Env) -> i128 {
        PRICE
    }

    pub fn bonus(_env: Env) -> u32 {
        BONUS_PERCENT
    }

    pub fn total_tokens(env: Env) -> Result<i128, Error> {
        Ok(get_cap(&env).ok_or(Error::NotInitialized)?.total_tokens)
    }

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

    pub fn spent(env: Env, beneficiary: Address) -> i128 {
        get_spent(&env, &beneficiary)
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
