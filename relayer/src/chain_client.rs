use simple_price_db::{decode_record, PriceRecord};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::Transaction,
};
use std_reference_basic::state::StdReference;
use tracing::{debug, info, warn};

use crate::retry::RetryPolicy;
use crate::types::BoxError;

/// Signs with the payer, submits, and confirms by polling under a retry policy.
pub struct ChainClient {
    rpc_client: RpcClient,
    payer: Keypair,
    retry: RetryPolicy,
}

impl ChainClient {
    pub fn new(cluster_url: &str, payer: Keypair, retry: RetryPolicy) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(
                cluster_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            payer,
            retry,
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub async fn send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature, BoxError> {
        let blockhash = self.rpc_client.get_latest_blockhash().await?;
        let mut signers = vec![&self.payer];
        signers.extend_from_slice(extra_signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            signers.as_slice(),
            blockhash,
        );
        Ok(self.rpc_client.send_transaction(&tx).await?)
    }

    /// Polls the signature status until it is confirmed, fails, or the policy runs out.
    pub async fn confirm(&self, signature: &Signature) -> Result<(), BoxError> {
        for (attempt, delay) in self.retry.attempts() {
            tokio::time::sleep(delay).await;
            debug!(%signature, attempt, max_attempts = self.retry.max_attempts, "polling");

            let statuses = match self.rpc_client.get_signature_statuses(&[*signature]).await {
                Ok(response) => response.value,
                Err(e) => {
                    warn!(error = %e, attempt, "Failed to fetch transaction status");
                    continue;
                }
            };
            if let Some(Some(status)) = statuses.first() {
                if let Some(err) = &status.err {
                    return Err(format!("Fail to send tx {signature}: {err}").into());
                }
                if status.satisfies_commitment(CommitmentConfig::confirmed()) {
                    return Ok(());
                }
            }
        }
        Err(format!(
            "Fail to get result from chain for {signature} after {} attempt(s)",
            self.retry.max_attempts
        )
        .into())
    }

    pub async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature, BoxError> {
        let signature = self.send(instructions, extra_signers).await?;
        info!(%signature, "Broadcast tx");
        self.confirm(&signature).await?;
        info!(%signature, "Tx successfully sent");
        Ok(signature)
    }

    /// Creates a rent-exempt account of `space` bytes owned by `program_id`,
    /// then runs `init` in the same transaction.
    pub async fn create_and_init(
        &self,
        account: &Keypair,
        space: usize,
        program_id: &Pubkey,
        init: Instruction,
    ) -> Result<Signature, BoxError> {
        let lamports = self
            .rpc_client
            .get_minimum_balance_for_rent_exemption(space)
            .await?;
        let create = system_instruction::create_account(
            &self.payer.pubkey(),
            &account.pubkey(),
            lamports,
            space as u64,
            program_id,
        );
        info!(account = %account.pubkey(), space, lamports, "Creating program account");
        self.send_and_confirm(&[create, init], &[account]).await
    }

    pub async fn read_reference(&self, account: &Pubkey) -> Result<StdReference, BoxError> {
        let data = self.rpc_client.get_account_data(account).await?;
        Ok(StdReference::unpack(&data)?)
    }

    pub async fn read_record(&self, account: &Pubkey) -> Result<PriceRecord, BoxError> {
        let data = self.rpc_client.get_account_data(account).await?;
        Ok(decode_record(&data)?)
    }
}
