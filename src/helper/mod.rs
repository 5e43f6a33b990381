//! Send-block helper.
//!
//! # Responsibilities
//! - Own the endpoint configuration, private key, hooks and work generator
//! - Fetch account state, build signed send blocks, submit blocks
//!
//! # Data Flow
//! ```text
//! generate_send_block(pay_to, amount)
//!     → config + input validation (no I/O on failure)
//!     → own address from private key
//!     → rpc `account_info` (frontier, balance, representative)
//!     → block::balance_after_send
//!     → block::BlockBuilder (hooks, work, signing)
//!     → SendBlock
//!
//! process_block(block) → rpc `process` → block hash
//! ```
//!
//! # Design Decisions
//! - Calls on one helper are not serialized internally. Callers that need
//!   one block per frontier must serialize sends for the same account.
//! - `config()` never exposes the private key

pub mod credentials;

use std::sync::Arc;

use crate::block::{balance_after_send, BlockBuilder, SendBlock, WorkHook, WorkHooks};
use crate::config::schema::is_unset;
use crate::config::validation::{
    validate_address, validate_config, validate_hash, validate_raw_amount, validate_url,
};
use crate::config::HelperConfig;
use crate::crypto::account_address;
use crate::error::{NanoError, NanoResult};
use crate::rpc::{AccountInfo, RpcClient};
use crate::work::WorkGenerator;

pub use credentials::Credentials;

/// Stateful façade over the RPC client, work generator and block builder.
pub struct NanoHelper {
    config: HelperConfig,
    credentials: Credentials,
    rpc: RpcClient,
    hooks: WorkHooks,
    work_generator: Option<Arc<dyn WorkGenerator>>,
}

impl NanoHelper {
    /// Create a helper. URLs are optional here but must be well-formed,
    /// and every other field is checked as for a config file.
    ///
    /// The work generation URL defaults to the RPC URL.
    pub fn new(config: HelperConfig) -> NanoResult<Self> {
        validate_config(&config).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            NanoError::Configuration(messages.join("; "))
        })?;
        let config = config.with_default_work_url();
        let rpc = RpcClient::new(config.rpc_timeout(), config.work_timeout());

        Ok(Self {
            config,
            credentials: Credentials::Unset,
            rpc,
            hooks: WorkHooks::new(),
            work_generator: None,
        })
    }

    /// Current configuration. The private key is not part of it.
    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    /// Set the private key. Fails if one is already set.
    pub fn set_private_key(&mut self, private_key: &str) -> NanoResult<()> {
        self.credentials.set(private_key)?;
        tracing::info!("Private key set");
        Ok(())
    }

    /// Forget the private key.
    pub fn clear_private_key(&mut self) {
        self.credentials.clear();
        tracing::info!("Private key cleared");
    }

    pub fn has_private_key(&self) -> bool {
        self.credentials.is_set()
    }

    /// Set the node RPC URL. Also becomes the work URL if none is set yet.
    pub fn set_rpc_url(&mut self, url: &str) -> NanoResult<()> {
        validate_url("rpc_url", Some(url), false)?;
        self.config.rpc_url = Some(url.to_string());
        if is_unset(&self.config.work_generation_url) {
            self.config.work_generation_url = Some(url.to_string());
        }
        Ok(())
    }

    pub fn set_work_generation_url(&mut self, url: &str) -> NanoResult<()> {
        validate_url("work_generation_url", Some(url), false)?;
        self.config.work_generation_url = Some(url.to_string());
        Ok(())
    }

    /// Register a hook run before work is requested.
    pub fn add_before_work_hook(&mut self, hook: Arc<dyn WorkHook>) {
        self.hooks.add_before(hook);
    }

    /// Register a hook run after work is produced, before signing.
    pub fn add_after_work_hook(&mut self, hook: Arc<dyn WorkHook>) {
        self.hooks.add_after(hook);
    }

    /// Replace the work generation endpoint with a local generator, or
    /// return to the endpoint with `None`.
    pub fn set_work_generator(&mut self, generator: Option<Arc<dyn WorkGenerator>>) {
        self.work_generator = generator;
    }

    /// Address of the configured private key.
    pub fn account(&self) -> NanoResult<String> {
        Ok(account_address(self.credentials.secret()?))
    }

    /// Fetch `account_info` for any account.
    pub async fn account_info(&self, account: &str) -> NanoResult<AccountInfo> {
        let rpc_url = self.rpc_url()?;
        validate_address(Some(account), false)?;
        self.rpc.account_info(rpc_url, account).await
    }

    /// Build a signed block sending `amount` raw to `pay_to`.
    ///
    /// The block is not submitted; pass it to [`process_block`](Self::process_block).
    pub async fn generate_send_block(&self, pay_to: &str, amount: &str) -> NanoResult<SendBlock> {
        let secret = self.credentials.secret()?;
        let rpc_url = self.rpc_url()?;
        let work_url = self.work_url()?;
        validate_address(Some(pay_to), false)?;
        validate_raw_amount(Some(amount), false)?;
        if amount == "0" {
            return Err(NanoError::Configuration(
                "amount must be greater than zero".into(),
            ));
        }

        let account = account_address(secret);
        let info = self.rpc.account_info(rpc_url, &account).await?;

        let Some(frontier) = info.frontier.filter(|f| !f.is_empty()) else {
            return Err(NanoError::BlockGeneration(format!(
                "account {account} has no frontier; it must be opened before it can send"
            )));
        };
        validate_hash(Some(&frontier), false).map_err(|e| {
            NanoError::BlockGeneration(format!("account_info for {account} returned frontier {e}"))
        })?;
        let representative = info.representative.ok_or_else(|| {
            NanoError::BlockGeneration(format!("account_info for {account} has no representative"))
        })?;
        let balance = info.balance.ok_or_else(|| {
            NanoError::BlockGeneration(format!("account_info for {account} has no balance"))
        })?;

        validate_raw_amount(Some(&balance), false).map_err(|e| {
            NanoError::BlockGeneration(format!("account_info for {account} returned balance {e}"))
        })?;

        let new_balance = balance_after_send(&balance, amount)?;

        tracing::debug!(
            account = %account,
            frontier = %frontier,
            amount = %amount,
            "Building send block"
        );

        BlockBuilder::new(
            &self.rpc,
            work_url,
            self.work_generator.as_deref(),
            &self.hooks,
            self.config.work_threshold.0,
        )
        .build(secret, &representative, &new_balance, pay_to, &frontier)
        .await
    }

    /// Submit a signed send block. Returns the block hash reported by the node.
    pub async fn process_block(&self, block: &SendBlock) -> NanoResult<String> {
        let rpc_url = self.rpc_url()?;
        let hash = self.rpc.process_send(rpc_url, block).await?;
        tracing::info!(hash = %hash, account = %block.account, "Block processed");
        Ok(hash)
    }

    fn rpc_url(&self) -> NanoResult<&str> {
        let url = self.config.rpc_url.as_deref();
        validate_url("rpc_url", url, false)?;
        Ok(url.unwrap_or_default())
    }

    fn work_url(&self) -> NanoResult<&str> {
        let url = self.config.work_generation_url.as_deref();
        validate_url("work_generation_url", url, false)?;
        Ok(url.unwrap_or_default())
    }
}

impl std::fmt::Debug for NanoHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NanoHelper")
            .field("rpc_url", &self.config.rpc_url)
            .field("work_generation_url", &self.config.work_generation_url)
            .field("has_private_key", &self.credentials.is_set())
            .field("hooks", &self.hooks)
            .field("custom_work_generator", &self.work_generator.is_some())
            .finish()
    }
}
