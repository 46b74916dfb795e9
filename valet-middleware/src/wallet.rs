//! A connected session: the key, its capabilities and the grants that
//! extend what it may do on behalf of others.

use chrono::Utc;

use valet_core::authz::Grant;
use valet_core::chain::ChainProfile;
use valet_signers::{Key, SignerProvider, SigningCapabilities};

/// Message types an action name can resolve to.
pub const MESSAGE_TYPES: [&str; 11] = [
    "/cosmos.gov.v1beta1.MsgVote",
    "/cosmos.gov.v1beta1.MsgDeposit",
    "/cosmos.gov.v1beta1.MsgSubmitProposal",
    "/cosmos.bank.v1beta1.MsgSend",
    "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward",
    "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission",
    "/cosmos.staking.v1beta1.MsgDelegate",
    "/cosmos.staking.v1beta1.MsgUndelegate",
    "/cosmos.staking.v1beta1.MsgBeginRedelegate",
    "/cosmos.authz.v1beta1.MsgGrant",
    "/cosmos.authz.v1beta1.MsgRevoke",
];

/// Resolves a short action name (`"Delegate"`) to its type URL. Anything
/// that does not match the known set is taken as a type URL verbatim.
pub fn resolve_message_type(action: &str) -> &str {
    MESSAGE_TYPES
        .iter()
        .copied()
        .find(|url| {
            url.rsplit('.')
                .next()
                .map(|name| name.strip_prefix("Msg").unwrap_or(name))
                == Some(action)
        })
        .unwrap_or(action)
}

/// A wallet connected to one chain.
///
/// Holds what was true at connect time; reconnecting builds a fresh
/// session, since a bridge may come back with different capabilities.
#[derive(Clone, Debug)]
pub struct Wallet {
    profile: ChainProfile,
    key: Key,
    capabilities: SigningCapabilities,
    lifted_value_support: bool,
    grants: Vec<Grant>,
}

impl Wallet {
    /// Connects the signer to the chain and captures the session state.
    pub async fn connect<S: SignerProvider>(
        signer: &S,
        profile: ChainProfile,
    ) -> Result<Self, S::Error> {
        let key = signer.connect(&profile).await?;
        Ok(Self {
            capabilities: signer.capabilities(),
            lifted_value_support: false,
            grants: Vec::new(),
            profile,
            key,
        })
    }

    /// Marks the signer as able to sign lifted (envelope-free)
    /// authorization payloads. Off by default; most wallets reject them.
    pub fn with_lifted_value_support(mut self, support: bool) -> Self {
        self.lifted_value_support = support;
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn address(&self) -> &str {
        &self.key.address
    }

    pub fn name(&self) -> Option<&str> {
        self.key.name.as_deref()
    }

    pub fn capabilities(&self) -> SigningCapabilities {
        self.capabilities
    }

    /// Replaces the cached grants, normally with the result of a
    /// grantee-grants query for this session's address.
    pub fn set_grants(&mut self, grants: Vec<Grant>) {
        self.grants = grants;
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    pub fn sign_direct_support(&self) -> bool {
        self.capabilities.sign_direct
    }

    pub fn sign_amino_support(&self) -> bool {
        self.capabilities.sign_amino
    }

    pub fn sign_amino_support_only(&self) -> bool {
        !self.capabilities.sign_direct && self.capabilities.sign_amino
    }

    /// Whether this session can execute under granted authority at all.
    ///
    /// Direct signing always works. Amino-only sessions work when the
    /// chain converts authorization messages, except on chains requiring
    /// lifted payloads the signer cannot produce.
    pub fn authz_support(&self) -> bool {
        if self.capabilities.sign_direct {
            return true;
        }
        if self.profile.authz_amino_lifted_values && !self.lifted_value_support {
            return false;
        }
        self.profile.authz_amino_support && self.capabilities.sign_amino
    }

    /// Whether this session may perform `action` for `address`.
    ///
    /// The session's own address is always permitted. Any other address
    /// requires an unexpired generic authorization from it covering the
    /// action's message type, and a session able to execute it.
    pub fn has_permission(&self, address: &str, action: &str) -> bool {
        if address == self.key.address {
            return true;
        }
        if !self.authz_support() {
            return false;
        }
        let message = resolve_message_type(action);
        let now = Utc::now();
        self.grants.iter().any(|grant| {
            grant.granter == address
                && grant.is_active(now)
                && grant.generic_msg_type_url() == Some(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use valet_core::authz::GENERIC_AUTHORIZATION_TYPE_URL;
    use valet_signers::{HardwareRestricted, LocalWallet};

    fn profile() -> ChainProfile {
        ChainProfile::new("testchain-1", "cosmos", "uatom", "0.025uatom".parse().unwrap())
    }

    async fn session() -> Wallet {
        let signer = LocalWallet::random(&mut rand::thread_rng());
        Wallet::connect(&signer, profile()).await.unwrap()
    }

    async fn amino_only_session(profile: ChainProfile) -> Wallet {
        let signer = HardwareRestricted::new(LocalWallet::random(&mut rand::thread_rng()));
        Wallet::connect(&signer, profile).await.unwrap()
    }

    fn generic_grant(granter: &str, msg: &str, expires_in: Option<Duration>) -> Grant {
        Grant {
            granter: granter.into(),
            grantee: "cosmos1operator".into(),
            authorization: json!({
                "@type": GENERIC_AUTHORIZATION_TYPE_URL,
                "msg": msg,
            }),
            expiration: expires_in.map(|d| Utc::now() + d),
        }
    }

    #[test]
    fn action_names_resolve_to_type_urls() {
        assert_eq!(
            resolve_message_type("Delegate"),
            "/cosmos.staking.v1beta1.MsgDelegate"
        );
        assert_eq!(
            resolve_message_type("WithdrawDelegatorReward"),
            "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward"
        );
        // unknown actions pass through as-is
        assert_eq!(
            resolve_message_type("/custom.module.MsgThing"),
            "/custom.module.MsgThing"
        );
    }

    #[tokio::test]
    async fn own_address_is_always_permitted() {
        let wallet = session().await;
        let address = wallet.address().to_owned();
        assert!(wallet.has_permission(&address, "Delegate"));
        assert!(wallet.has_permission(&address, "AnythingAtAll"));
    }

    #[tokio::test]
    async fn other_addresses_need_a_matching_grant() {
        let mut wallet = session().await;
        assert!(!wallet.has_permission("cosmos1granter", "Delegate"));

        wallet.set_grants(vec![generic_grant(
            "cosmos1granter",
            "/cosmos.staking.v1beta1.MsgDelegate",
            Some(Duration::hours(1)),
        )]);
        assert!(wallet.has_permission("cosmos1granter", "Delegate"));
        // but not other actions or other granters
        assert!(!wallet.has_permission("cosmos1granter", "Undelegate"));
        assert!(!wallet.has_permission("cosmos1other", "Delegate"));
    }

    #[tokio::test]
    async fn expired_grants_do_not_count() {
        let mut wallet = session().await;
        wallet.set_grants(vec![generic_grant(
            "cosmos1granter",
            "/cosmos.staking.v1beta1.MsgDelegate",
            Some(Duration::hours(-1)),
        )]);
        assert!(!wallet.has_permission("cosmos1granter", "Delegate"));
    }

    #[tokio::test]
    async fn non_generic_authorizations_do_not_count() {
        let mut wallet = session().await;
        wallet.set_grants(vec![Grant {
            granter: "cosmos1granter".into(),
            grantee: "cosmos1operator".into(),
            authorization: json!({
                "@type": "/cosmos.staking.v1beta1.StakeAuthorization",
                "authorization_type": "AUTHORIZATION_TYPE_DELEGATE",
            }),
            expiration: None,
        }]);
        assert!(!wallet.has_permission("cosmos1granter", "Delegate"));
    }

    #[tokio::test]
    async fn amino_only_sessions_lose_authz_on_lifted_value_chains() {
        let mut profile = profile();
        profile.authz_amino_lifted_values = true;
        let mut wallet = amino_only_session(profile).await;
        wallet.set_grants(vec![generic_grant(
            "cosmos1granter",
            "/cosmos.staking.v1beta1.MsgDelegate",
            None,
        )]);
        assert!(!wallet.authz_support());
        assert!(!wallet.has_permission("cosmos1granter", "Delegate"));

        // a signer that handles lifted payloads gets it back
        let wallet = wallet.with_lifted_value_support(true);
        assert!(wallet.authz_support());
        assert!(wallet.has_permission("cosmos1granter", "Delegate"));
    }

    #[tokio::test]
    async fn amino_only_sessions_need_chain_amino_support() {
        let mut profile = profile();
        profile.authz_amino_support = false;
        let wallet = amino_only_session(profile).await;
        assert!(!wallet.authz_support());

        // direct-capable software keys are unaffected
        let wallet = session().await;
        assert!(wallet.authz_support());
    }
}
