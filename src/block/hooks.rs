//! Work hooks.
//!
//! Before-hooks run ahead of the proof-of-work request and may inspect or
//! adjust the [`WorkContext`]; after-hooks see the produced `work` before the
//! block is signed. Both receive the same mutable context the builder reads
//! from afterwards.

use async_trait::async_trait;
use std::sync::Arc;

use crate::block::types::WorkContext;
use crate::error::NanoResult;

/// A callback around work generation.
///
/// An error aborts the build and reaches the caller unchanged.
#[async_trait]
pub trait WorkHook: Send + Sync {
    async fn call(&self, context: &mut WorkContext) -> NanoResult<()>;
}

/// Append-only, ordered before/after hook registries.
#[derive(Clone, Default)]
pub struct WorkHooks {
    before: Vec<Arc<dyn WorkHook>>,
    after: Vec<Arc<dyn WorkHook>>,
}

impl WorkHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_before(&mut self, hook: Arc<dyn WorkHook>) {
        self.before.push(hook);
    }

    pub fn add_after(&mut self, hook: Arc<dyn WorkHook>) {
        self.after.push(hook);
    }

    pub fn before_count(&self) -> usize {
        self.before.len()
    }

    pub fn after_count(&self) -> usize {
        self.after.len()
    }

    /// Run before-hooks sequentially in registration order.
    pub async fn run_before(&self, context: &mut WorkContext) -> NanoResult<()> {
        run_all(&self.before, context).await
    }

    /// Run after-hooks sequentially in registration order.
    pub async fn run_after(&self, context: &mut WorkContext) -> NanoResult<()> {
        run_all(&self.after, context).await
    }
}

async fn run_all(hooks: &[Arc<dyn WorkHook>], context: &mut WorkContext) -> NanoResult<()> {
    for hook in hooks {
        hook.call(context).await?;
    }
    Ok(())
}

impl std::fmt::Debug for WorkHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkHooks")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}
