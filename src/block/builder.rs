//! Send block assembly.
//!
//! # Sequence
//! ```text
//! WorkContext { representative, balance, link, previous, work: None }
//!     → before-hooks (registration order)
//!     → work for context.previous (validated against the threshold)
//!     → context.work = Some(work)
//!     → after-hooks (registration order)
//!     → sign_and_assemble_block with the context as it stands
//!     → legacy account prefix rewritten to nano_
//! ```
//!
//! Any failure aborts the build at that step. Nothing is retried.

use crate::block::hooks::WorkHooks;
use crate::block::types::{BlockFields, SendBlock, WorkContext};
use crate::crypto::{normalize_account_prefix, sign_and_assemble_block, SecretKey};
use crate::error::{NanoError, NanoResult};
use crate::observability::metrics;
use crate::rpc::RpcClient;
use crate::work::{generate_work, WorkGenerator, WorkSource};

/// Builds signed send blocks for one configured key and work source.
pub struct BlockBuilder<'a> {
    rpc: &'a RpcClient,
    work_url: &'a str,
    generator: Option<&'a dyn WorkGenerator>,
    hooks: &'a WorkHooks,
    threshold: u64,
}

impl<'a> BlockBuilder<'a> {
    /// # Arguments
    /// * `rpc` - Client used for remote work
    /// * `work_url` - Work generation endpoint; unused when `generator` is set
    /// * `generator` - Local work generator, replacing the endpoint
    /// * `hooks` - Before/after work hooks
    /// * `threshold` - Minimum accepted work difficulty
    pub fn new(
        rpc: &'a RpcClient,
        work_url: &'a str,
        generator: Option<&'a dyn WorkGenerator>,
        hooks: &'a WorkHooks,
        threshold: u64,
    ) -> Self {
        Self {
            rpc,
            work_url,
            generator,
            hooks,
            threshold,
        }
    }

    /// Run hooks, obtain work over `previous` and sign the block.
    pub async fn build(
        &self,
        secret: &SecretKey,
        representative: &str,
        balance: &str,
        link: &str,
        previous: &str,
    ) -> NanoResult<SendBlock> {
        let mut context = WorkContext {
            representative: representative.to_string(),
            balance: balance.to_string(),
            link: link.to_string(),
            previous: previous.to_string(),
            work: None,
        };

        self.hooks.run_before(&mut context).await?;

        let source = match self.generator {
            Some(generator) => WorkSource::Local(generator),
            None => WorkSource::Remote {
                rpc: self.rpc,
                url: self.work_url,
            },
        };
        let work = generate_work(source, &context.previous, self.threshold).await?;
        context.work = Some(work);

        self.hooks.run_after(&mut context).await?;

        let Some(work) = context.work.filter(|w| !w.is_empty()) else {
            return Err(NanoError::BlockGeneration(format!(
                "no work available for block after {}",
                context.previous
            )));
        };

        let fields = BlockFields {
            previous: context.previous,
            representative: context.representative,
            balance: context.balance,
            link: context.link,
            work,
        };
        let mut block = sign_and_assemble_block(secret, &fields)?;
        block.account = normalize_account_prefix(&block.account);

        metrics::record_block_generated();
        tracing::info!(
            account = %block.account,
            previous = %block.previous,
            balance = %block.balance,
            "Send block signed"
        );
        Ok(block)
    }
}
