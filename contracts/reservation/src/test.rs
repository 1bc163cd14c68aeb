#![allow(clippy::unwrap_used)]

use crate::types::{Error, PRICE, RESERVATION_CAP};
use crate::{ReservationSale, ReservationSaleClient};
use sale_core::TOKEN_UNIT;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{
    contract, contractimpl, symbol_short, token, vec, Address, Bytes, BytesN, Env,
};

const START: u64 = 10_000;
const END: u64 = 20_000;

/// Stands in for the crowdsale coordinator: accepts the restricted mint call
/// and mints the sale token to the beneficiary.
///
/// Wrapped in its own module so the `#[contractimpl]`-generated spec symbols
/// (e.g. `__SPEC_XDR_FN_INIT`) don't collide with `MockKycVerifier`'s.
mod mock_coordinator {
    use super::*;

    #[contract]
    pub struct MockCoordinator;

    #[contractimpl]
    impl MockCoordinator {
        pub fn init(env: Env, token: Address) {
            env.storage().instance().set(&symbol_short!("token"), &token);
        }

        pub fn mint_reservation_tokens(
            env: Env,
            caller: Address,
            beneficiary: Address,
            tokens: i128,
        ) {
            caller.require_auth();
            let token: Address = env
                .storage()
                .instance()
                .get(&symbol_short!("token"))
                .unwrap();
            token::StellarAssetClient::new(&env, &token).mint(&beneficiary, &tokens);
        }
    }
}
use mock_coordinator::{MockCoordinator, MockCoordinatorClient};

/// Accepts any non-empty authorization payload and reports the configured
/// signer address.
#[contract]
struct MockKycVerifier;

#[contractimpl]
impl MockKycVerifier {
    pub fn init(env: Env, signer: Address) {
        env.storage()
            .instance()
            .set(&symbol_short!("signer"), &signer);
    }

    pub fn verify(env: Env, _message: BytesN<32>, authorization: Bytes) -> Option<Address> {
        if authorization.is_empty() {
            return None;
        }
        env.storage().instance().get(&symbol_short!("signer"))
    }
}

struct Setup<'a> {
    env: Env,
    client: ReservationSaleClient<'a>,
    owner: Address,
    wallet: Address,
    sale_token: token::Client<'a>,
    payment_token: token::Client<'a>,
    investor: Address,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths_allowing_non_root_auth();

    let owner = Address::generate(&env);
    let wallet = Address::generate(&env);
    let signer = Address::generate(&env);
    let investor = Address::generate(&env);

    let sale_asset = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let payment_asset = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let coordinator_id = env.register_contract(None, MockCoordinator);
    MockCoordinatorClient::new(&env, &coordinator_id).init(&sale_asset.address());

    let verifier_id = env.register_contract(None, MockKycVerifier);
    MockKycVerifierClient::new(&env, &verifier_id).init(&signer);

    let contract_id = env.register_contract(None, ReservationSale);
    let client = ReservationSaleClient::new(&env, &contract_id);
    client.initialize(
        &owner,
        &coordinator_id,
        &payment_asset.address(),
        &verifier_id,
        &vec![&env, signer],
        &wallet,
        &START,
        &END,
    );

    token::StellarAssetClient::new(&env, &payment_asset.address())
        .mint(&investor, &(100_000 * TOKEN_UNIT));

    Setup {
        sale_token: token::Client::new(&env, &sale_asset.address()),
        payment_token: token::Client::new(&env, &payment_asset.address()),
        env,
        client,
        owner,
        wallet,
        investor,
    }
}

fn kyc_auth(env: &Env) -> Bytes {
    Bytes::from_slice(env, &[1u8; 96])
}

fn warp_to(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|l| l.timestamp = timestamp);
}

#[test]
fn test_initial_state() {
    let s = setup();

    assert!(!s.client.started());
    assert!(!s.client.ended());
    assert_eq!(s.client.start_time(), START);
    assert_eq!(s.client.end_time(), END);
    assert_eq!(s.client.price(), 275);
    assert_eq!(s.client.bonus(), 110);
    assert_eq!(s.client.total_tokens(), RESERVATION_CAP);
    assert_eq!(s.client.remaining_tokens(), RESERVATION_CAP);
    assert_eq!(s.client.tokens_sold(), 0);
    assert!(!s.client.cap_reached());
    assert!(!s.client.paused());
}

#[test]
fn test_buy_outside_window_fails() {
    let s = setup();
    let auth = kyc_auth(&s.env);
    let value = TOKEN_UNIT;

    let res = s
        .client
        .try_buy_tokens(&s.investor, &0, &(10 * TOKEN_UNIT), &auth, &value);
    assert_eq!(res, Err(Ok(Error::SaleNotStarted)));

    warp_to(&s.env, END);
    let res = s
        .client
        .try_buy_tokens(&s.investor, &0, &(10 * TOKEN_UNIT), &auth, &value);
    assert_eq!(res, Err(Ok(Error::SaleEnded)));

    assert_eq!(s.client.tokens_sold(), 0);
    assert_eq!(s.sale_token.balance(&s.investor), 0);
}

#[test]
fn test_buy_mints_at_reservation_price() {
    let s = setup();
    warp_to(&s.env, START);

    let value = 20_000 * TOKEN_UNIT;
    s.client.buy_tokens(
        &s.investor,
        &0,
        &(60_001 * TOKEN_UNIT),
        &kyc_auth(&s.env),
        &value,
    );

    let expected_tokens = value * PRICE;
    assert_eq!(s.sale_token.balance(&s.investor), expected_tokens);
    assert_eq!(s.client.tokens_sold(), expected_tokens);
    assert_eq!(s.client.remaining_tokens(), RESERVATION_CAP - expected_tokens);
    assert_eq!(s.client.spent(&s.investor), value);
    assert_eq!(s.payment_token.balance(&s.wallet), value);
}

#[test]
fn test_buy_tokens_for_credits_beneficiary() {
    let s = setup();
    warp_to(&s.env, START);

    let beneficiary = Address::generate(&s.env);
    let value = 100 * TOKEN_UNIT;
    s.client.buy_tokens_for(
        &s.investor,
        &beneficiary,
        &1,
        &(200 * TOKEN_UNIT),
        &kyc_auth(&s.env),
        &value,
    );

    assert_eq!(s.sale_token.balance(&beneficiary), value * PRICE);
    assert_eq!(s.sale_token.balance(&s.investor), 0);
    // The signed cap is tracked against the beneficiary, not the payer.
    assert_eq!(s.client.spent(&beneficiary), value);
    assert_eq!(s.client.spent(&s.investor), 0);
    assert_eq!(s.payment_token.balance(&s.wallet), value);
}

#[test]
fn test_pause_blocks_purchases() {
    let s = setup();
    warp_to(&s.env, START);

    s.client.pause(&s.owner);
    assert!(s.client.paused());

    let res = s.client.try_buy_tokens(
        &s.investor,
        &0,
        &(10 * TOKEN_UNIT),
        &kyc_auth(&s.env),
        &TOKEN_UNIT,
    );
    assert_eq!(res, Err(Ok(Error::SalePaused)));
    assert_eq!(s.client.tokens_sold(), 0);

    s.client.unpause(&s.owner);
    s.client.buy_tokens(
        &s.investor,
        &0,
        &(10 * TOKEN_UNIT),
        &kyc_auth(&s.env),
        &TOKEN_UNIT,
    );
    assert_eq!(s.client.tokens_sold(), PRICE * TOKEN_UNIT);
}

#[test]
fn test_pause_is_owner_only() {
    let s = setup();

    let res = s.client.try_pause(&s.investor);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_zero_value_rejected() {
    let s = setup();
    warp_to(&s.env, START);

    let res = s.client.try_buy_tokens(
        &s.investor,
        &0,
        &(10 * TOKEN_UNIT),
        &kyc_auth(&s.env),
        &0,
    );
    assert_eq!(res, Err(Ok(Error::InvalidAmount)));
}

#[test]
fn test_missing_authorization_rejected() {
    let s = setup();
    warp_to(&s.env, START);

    let res = s.client.try_buy_tokens(
        &s.investor,
        &0,
        &(10 * TOKEN_UNIT),
        &Bytes::new(&s.env),
        &TOKEN_UNIT,
    );
    assert_eq!(res, Err(Ok(Error::InvalidKycSignature)));
    assert_eq!(s.client.tokens_sold(), 0);
}

#[test]
fn test_signer_outside_set_rejected() {
    let env = Env::default();
    env.mock_all_auths_allowing_non_root_auth();

    let owner = Address::generate(&env);
    let investor = Address::generate(&env);
    let recovered_signer = Address::generate(&env);
    let trusted_signer = Address::generate(&env);

    let sale_asset = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let payment_asset = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let coordinator_id = env.register_contract(None, MockCoordinator);
    MockCoordinatorClient::new(&env, &coordinator_id).init(&sale_asset.address());

    // The verifier recovers an address that is not in the sale's signer set.
    let verifier_id = env.register_contract(None, MockKycVerifier);
    MockKycVerifierClient::new(&env, &verifier_id).init(&recovered_signer);

    let contract_id = env.register_contract(None, ReservationSale);
    let client = ReservationSaleClient::new(&env, &contract_id);
    client.initialize(
        &owner,
        &coordinator_id,
        &payment_asset.address(),
        &verifier_id,
        &vec![&env, trusted_signer],
        &Address::generate(&env),
        &START,
        &END,
    );

    env.ledger().with_mut(|l| l.timestamp = START);
    let res = client.try_buy_tokens(
        &investor,
        &0,
        &(10 * TOKEN_UNIT),
        &kyc_auth(&env),
        &TOKEN_UNIT,
    );
    assert_eq!(res, Err(Ok(Error::InvalidKycSignature)));
}

#[test]
fn test_kyc_spending_cap_is_cumulative() {
    let s = setup();
    warp_to(&s.env, START);

    let max_amount = TOKEN_UNIT;
    let auth = kyc_auth(&s.env);

    let first = 6 * TOKEN_UNIT / 10;
    s.client.buy_tokens(&s.investor, &0, &max_amount, &auth, &first);
    assert_eq!(s.client.spent(&s.investor), first);

    // 0.6 + 0.5 would exceed the signed 1.0 cap.
    let second = 5 * TOKEN_UNIT / 10;
    let res = s
        .client
        .try_buy_tokens(&s.investor, &0, &max_amount, &auth, &second);
    assert_eq!(res, Err(Ok(Error::KycCapExceeded)));
    assert_eq!(s.client.spent(&s.investor), first);

    // Topping up to exactly the cap is still allowed.
    let third = 4 * TOKEN_UNIT / 10;
    s.client.buy_tokens(&s.investor, &0, &max_amount, &auth, &third);
    assert_eq!(s.client.spent(&s.investor), max_amount);
}

#[test]
fn test_oversized_purchase_rejected_outright() {
    let s = setup();
    warp_to(&s.env, START);

    let auth = kyc_auth(&s.env);
    let max_amount = 100_000 * TOKEN_UNIT;

    let first = 20_000 * TOKEN_UNIT;
    s.client.buy_tokens(&s.investor, &0, &max_amount, &auth, &first);
    let sold = s.client.tokens_sold();
    let remaining = s.client.remaining_tokens();
    assert_eq!(remaining, RESERVATION_CAP - first * PRICE);

    // 10_000 units would buy more tokens than remain: no partial fill.
    let second = 10_000 * TOKEN_UNIT;
    assert!(second * PRICE > remaining);
    let res = s
        .client
        .try_buy_tokens(&s.investor, &0, &max_amount, &auth, &second);
    assert_eq!(res, Err(Ok(Error::CapExceeded)));

    assert_eq!(s.client.tokens_sold(), sold);
    assert_eq!(s.client.remaining_tokens(), remaining);
    assert_eq!(s.sale_token.balance(&s.investor), first * PRICE);
}

#[test]
fn test_double_initialize_fails() {
    let s = setup();

    let res = s.client.try_initialize(
        &s.owner,
        &Address::generate(&s.env),
        &Address::generate(&s.env),
        &Address::generate(&s.env),
        &vec![&s.env, Address::generate(&s.env)],
        &Address::generate(&s.env),
        &START,
        &END,
    );
    assert_eq!(res, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_initialize_validates_window() {
    let env = Env::default();
    env.mock_all_auths_allowing_non_root_auth();

    let contract_id = env.register_contract(None, ReservationSale);
    let client = ReservationSaleClient::new(&env, &contract_id);

    let res = client.try_initialize(
        &Address::generate(&env),
        &Address::generate(&env),
        &Address::generate(&env),
        &Address::generate(&env),
        &vec![&env, Address::generate(&env)],
        &Address::generate(&env),
        &END,
        &START,
    );
    assert_eq!(res, Err(Ok(Error::InvalidTimeRange)));
}
