//!
//! Send a signed raw transaction over an open gRPC channel.
//!

use std::time::Duration;

use tonic::transport::Channel;

use crate::{
    config::Config,
    errors::StreamError,
    grpc::authorize,
    logging::info,
    proto::{base_api_client::BaseApiClient, SendTransactionRequest},
};

///
/// Stateless, single-shot transaction submission.
///
/// Nothing is retried; a caller that retries must de-duplicate on its own.
///
#[derive(Debug, Clone)]
pub struct TransactionSubmitter {
    client: BaseApiClient<Channel>,
    auth_token: String,
    timeout: Duration,
}

impl TransactionSubmitter {
    pub fn new(channel: Channel, config: &Config) -> Self {
        Self {
            client: BaseApiClient::new(channel),
            auth_token: config.auth_token.clone(),
            timeout: config.submit_timeout(),
        }
    }

    ///
    /// Submit a hex encoded signed transaction and return the hash the service reports.
    ///
    pub async fn submit(&self, raw_tx_hex: &str) -> Result<String, StreamError> {
        if raw_tx_hex.trim().is_empty() {
            return Err(StreamError::Submit("raw transaction is empty".into()));
        }

        let mut request = tonic::Request::new(SendTransactionRequest {
            raw_transaction: raw_tx_hex.to_string(),
        });
        authorize(&mut request, &self.auth_token)
            .map_err(|err| StreamError::Submit(format!("auth token rejected: {}", err)))?;

        info!("[SendTx] Sending transaction...");

        // The client is a cheap handle onto the shared channel
        let mut client = self.client.clone();
        let response = tokio::time::timeout(self.timeout, client.send_transaction(request))
            .await
            .map_err(|_| {
                StreamError::Submit(format!("timed out after {}s", self.timeout.as_secs_f64()))
            })?
            .map_err(|status| StreamError::Submit(status.to_string()))?;

        let tx_hash = response.into_inner().tx_hash;
        info!("[SendTx] Transaction sent successfully. Hash: {}", tx_hash);

        Ok(tx_hash)
    }
}
