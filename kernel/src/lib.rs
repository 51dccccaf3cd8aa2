//! Bitcoin HD wallet math kernel.
//!
//! A pure, deterministic computation core for Bitcoin's hierarchical-
//! deterministic wallet cryptography: arbitrary-precision integers,
//! RIPEMD-160/SHA-256/SHA-512/HMAC-SHA-512, secp256k1 point arithmetic,
//! BIP-39 mnemonics, BIP-32 key derivation, and the Base58Check/Bech32
//! address encodings.
//!
//! INVARIANTS:
//! 1. Nothing in this crate performs I/O, blocks, or touches a clock or
//!    an RNG — entropy and randomness are always supplied by the caller.
//! 2. Every fallible operation returns `Result<_, error::CoreError>`;
//!    malformed input is never a panic.
//! 3. Dependency order is strictly bottom-up: `bigint` has no dependents
//!    among these modules, `hash`/`mac` build on it, `secp256k1`/`bip39`
//!    build on those, and `bip32`/`addr`/`wif`/`wallet` sit on top.

pub mod addr;
pub mod base;
pub mod bigint;
pub mod bip32;
pub mod bip39;
pub mod error;
pub mod hash;
pub mod mac;
pub mod secp256k1;
pub mod wallet;
pub mod wif;

pub use error::CoreError;
