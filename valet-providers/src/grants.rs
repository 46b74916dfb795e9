//! Grant collection across many (grantee, granter) pairs.

use futures_util::future::join_all;

use valet_core::authz::Grant;

use crate::provider::Provider;
use crate::{ProviderError, RestClient};

/// How many grant queries are in flight at once.
pub const GRANT_FAN_OUT_WIDTH: usize = 5;

/// Queries every pair individually, batching [`GRANT_FAN_OUT_WIDTH`]
/// requests at a time so large validator sets do not stampede the REST
/// endpoint. A failed lookup drops that pair's grants; the rest of the
/// batch is unaffected.
pub async fn grants_for_pairs<C: RestClient>(
    provider: &Provider<C>,
    pairs: &[(String, String)],
) -> Vec<Grant> {
    let mut grants = Vec::new();
    for batch in pairs.chunks(GRANT_FAN_OUT_WIDTH) {
        let results = join_all(
            batch.iter().map(|(grantee, granter)| provider.grants(grantee, granter)),
        )
        .await;
        for ((grantee, granter), result) in batch.iter().zip(results) {
            match result {
                Ok(found) => grants.extend(found),
                Err(err) => {
                    tracing::debug!(%grantee, %granter, error = %err, "grant lookup dropped");
                }
            }
        }
    }
    grants
}

/// All grants where `grantee` is the grantee, preferring the bulk listing.
///
/// Nodes that do not implement the grantee listing answer 501; those are
/// queried per granter instead.
pub async fn collect_grants<C: RestClient>(
    provider: &Provider<C>,
    grantee: &str,
    granters: &[String],
) -> Result<Vec<Grant>, ProviderError> {
    match provider.grantee_grants(grantee).await {
        Ok(grants) => Ok(grants),
        Err(ProviderError::UnsupportedQuery) => {
            let pairs: Vec<_> = granters
                .iter()
                .map(|granter| (grantee.to_owned(), granter.clone()))
                .collect();
            Ok(grants_for_pairs(provider, &pairs).await)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockClient, MockError};
    use serde_json::json;

    const PAIR_PATH: &str = "/cosmos/authz/v1beta1/grants";

    fn page(msg: &str) -> serde_json::Value {
        json!({ "grants": [{
            "authorization": {
                "@type": "/cosmos.authz.v1beta1.GenericAuthorization",
                "msg": msg,
            },
        }]})
    }

    #[tokio::test]
    async fn failed_pairs_are_dropped_not_fatal() {
        // one response per pair, second pair fails
        let client = MockClient::new()
            .respond(PAIR_PATH, page("/cosmos.staking.v1beta1.MsgDelegate"))
            .fail(PAIR_PATH, MockError::status(500, "boom"))
            .respond(PAIR_PATH, page("/cosmos.gov.v1beta1.MsgVote"));
        let provider = Provider::new(client);
        let pairs: Vec<_> = (0..3)
            .map(|i| ("cosmos1operator".to_owned(), format!("cosmos1granter{i}")))
            .collect();
        let grants = grants_for_pairs(&provider, &pairs).await;
        assert_eq!(grants.len(), 2);
    }

    #[tokio::test]
    async fn fan_out_batches_by_width() {
        let client = MockClient::new().respond(PAIR_PATH, page("/cosmos.gov.v1beta1.MsgVote"));
        let provider = Provider::new(client);
        let pairs: Vec<_> = (0..12)
            .map(|i| ("cosmos1operator".to_owned(), format!("cosmos1granter{i}")))
            .collect();
        let grants = grants_for_pairs(&provider, &pairs).await;
        assert_eq!(grants.len(), 12);
        assert_eq!(provider.client().calls.lock().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn collect_grants_prefers_the_bulk_listing() {
        let client = MockClient::new().respond(
            "/cosmos/authz/v1beta1/grants/grantee/cosmos1operator",
            json!({ "grants": [{
                "granter": "cosmos1user",
                "grantee": "cosmos1operator",
                "authorization": {
                    "@type": "/cosmos.authz.v1beta1.GenericAuthorization",
                    "msg": "/cosmos.staking.v1beta1.MsgDelegate",
                },
            }]}),
        );
        let provider = Provider::new(client);
        let grants = collect_grants(&provider, "cosmos1operator", &[]).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].granter, "cosmos1user");
    }

    #[tokio::test]
    async fn collect_grants_falls_back_to_pairs_on_501() {
        let client = MockClient::new()
            .fail(
                "/cosmos/authz/v1beta1/grants/grantee/cosmos1operator",
                MockError::status(501, "not implemented"),
            )
            .respond(PAIR_PATH, page("/cosmos.staking.v1beta1.MsgDelegate"));
        let provider = Provider::new(client);
        let grants = collect_grants(&provider, "cosmos1operator", &["cosmos1user".to_owned()])
            .await
            .unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].grantee, "cosmos1operator");
    }
}
