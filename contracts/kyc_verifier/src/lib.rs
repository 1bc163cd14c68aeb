#![no_std]

//! Signature-verification capability for the KYC-gated sales.
//!
//! Sale contracts hand this contract a 32-byte authorization digest and an
//! opaque authorization payload and get back the on-ledger address of the
//! off-chain signer, if any. The payload format is `public_key(32) ||
//! signature(64)` over the digest; the public-key -> address mapping is fixed
//! at initialization, so rotating signers means deploying a new verifier.

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Bytes, BytesN, Env, Map,
};

contractmeta!(
    key = "Description",
    val = "Ed25519 KYC authorization verifier with a fixed signer set"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NoSigners = 2,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Signers,
}

const AUTHORIZATION_LEN: u32 = 96;

#[contract]
pub struct KycVerifier;

#[contractimpl]
impl KycVerifier {
    pub fn initialize(env: Env, signers: Map<BytesN<32>, Address>) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Signers) {
            return Err(Error::AlreadyInitialized);
        }
        if signers.is_empty() {
            return Err(Error::NoSigners);
        }

        env.storage().instance().set(&DataKey::Signers, &signers);

        env.events()
            .publish((symbol_short!("init"),), signers.len());

        Ok(())
    }

    /// Returns the registered signer address for a valid authorization,
    /// `None` for a malformed payload or an unregistered key. An invalid
    /// signature over a registered key aborts the whole invocation, which
    /// reverts the calling purchase.
    pub fn verify(env: Env, message: BytesN<32>, authorization: Bytes) -> Option<Address> {
        let signers: Map<BytesN<32>, Address> = env.storage().instance().get(&DataKey::Signers)?;

        if authorization.len() != AUTHORIZATION_LEN {
            return None;
        }
        let public_key: BytesN<32> = authorization.slice(0..32).try_into().ok()?;
        let signature: BytesN<64> = authorization.slice(32..96).try_into().ok()?;

        let signer = signers.get(public_key.clone())?;
        env.crypto()
            .ed25519_verify(&public_key, &message.into(), &signature);

        Some(signer)
    }

    pub fn signer_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get::<_, Map<BytesN<32>, Address>>(&DataKey::Signers)
            .map(|signers| signers.len())
            .unwrap_or(0)
    }
}
