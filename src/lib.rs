#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # valet
//!
//! Staking authorization, transaction signing and broadcast for Cosmos-SDK
//! chains.
//!
//! # Quickstart
//!
//! A prelude is provided which imports all the important things for you.
//! Connect a provider to a chain's REST endpoint, pick a signer and tie
//! them together with a [`SigningClient`](middleware::SigningClient):
//!
//! ```no_run
//! use valet::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::new("https://rest.cosmos.directory/cosmoshub".parse::<Http>()?);
//! let wallet: LocalWallet = std::env::var("VALET_KEY")?.parse()?;
//! let profile = ChainProfile::new("cosmoshub-4", "cosmos", "uatom", "0.0025uatom".parse()?);
//!
//! let address = wallet.address()?;
//! let client = SigningClient::new(provider, wallet, profile);
//! let msgs = vec![Msg::WithdrawDelegatorReward(MsgWithdrawDelegatorReward {
//!     delegator_address: address.clone(),
//!     validator_address: "cosmosvaloper1...".to_owned(),
//! })];
//! let result = client.sign_and_broadcast(&address, &msgs, "", None).await?;
//! println!("confirmed in block {}", result.height);
//! # Ok(())
//! # }
//! ```

/// Messages, coins, chain profiles and the wire encodings: protobuf
/// `SignDoc`s, legacy Amino JSON and EIP-712 typed data.
pub mod core {
    pub use valet_core::*;
}

/// Typed REST queries against full nodes: accounts, simulation, broadcast,
/// confirmation polling and authz grant listings.
pub mod providers {
    pub use valet_providers::*;
}

/// Signer backends behind one trait: in-memory keys, hardware capability
/// wrappers and extension/mobile wallet bridges.
pub mod signers {
    pub use valet_signers::*;
}

/// Chain-aware sign-mode selection, the signing client pipeline and the
/// session permission model.
pub mod middleware {
    pub use valet_middleware::*;
}

/// Easy imports of frequently used types.
pub mod prelude {
    pub use super::core::*;

    pub use super::providers::*;

    pub use super::signers::*;

    pub use super::middleware::*;
}
