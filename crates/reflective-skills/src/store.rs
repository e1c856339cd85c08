//! Per-tenant session store: mode session, mood log, conversation memory, and task list per
//! `{tenant}/{agent}` key.
//!
//! Access to a tenant's state goes through the map's entry lock, so concurrent skill calls
//! for the same tenant are serialized while different tenants proceed independently.

use dashmap::DashMap;
use reflective_core::{
    ConversationMemory, ModeSession, MoodTracker, TaskTracker, TenantContext, TurnCoordinator,
};
use std::sync::Arc;

/// Everything remembered about one tenant between calls.
#[derive(Debug)]
pub struct TenantState {
    pub session: ModeSession,
    pub mood: MoodTracker,
    pub memory: ConversationMemory,
    pub tasks: TaskTracker,
}

pub struct SessionStore {
    coordinator: Arc<TurnCoordinator>,
    tenants: DashMap<String, TenantState>,
}

impl SessionStore {
    pub fn new(coordinator: Arc<TurnCoordinator>) -> Self {
        Self {
            coordinator,
            tenants: DashMap::new(),
        }
    }

    pub fn coordinator(&self) -> &Arc<TurnCoordinator> {
        &self.coordinator
    }

    /// Run `f` on the tenant's state, creating it in the default mode on first use.
    pub fn with_state<R>(&self, ctx: &TenantContext, f: impl FnOnce(&mut TenantState) -> R) -> R {
        let key = ctx.session_key();
        let mut entry = self.tenants.entry(key).or_insert_with(|| {
            tracing::debug!(target: "reflective::skills", tenant = %ctx.tenant_id, "New tenant session");
            TenantState {
                session: self.coordinator.new_session(),
                mood: MoodTracker::new(),
                memory: self.coordinator.new_memory(),
                tasks: TaskTracker::new(),
            }
        });
        f(entry.value_mut())
    }

    pub fn with_session<R>(&self, ctx: &TenantContext, f: impl FnOnce(&mut ModeSession) -> R) -> R {
        self.with_state(ctx, |state| f(&mut state.session))
    }

    pub fn with_mood<R>(&self, ctx: &TenantContext, f: impl FnOnce(&mut MoodTracker) -> R) -> R {
        self.with_state(ctx, |state| f(&mut state.mood))
    }

    pub fn with_memory<R>(
        &self,
        ctx: &TenantContext,
        f: impl FnOnce(&mut ConversationMemory) -> R,
    ) -> R {
        self.with_state(ctx, |state| f(&mut state.memory))
    }

    pub fn with_tasks<R>(&self, ctx: &TenantContext, f: impl FnOnce(&mut TaskTracker) -> R) -> R {
        self.with_state(ctx, |state| f(&mut state.tasks))
    }

    /// Forget everything stored for a tenant. Returns whether anything was stored.
    pub fn reset(&self, ctx: &TenantContext) -> bool {
        self.tenants.remove(&ctx.session_key()).is_some()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}
