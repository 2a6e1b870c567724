//! Re-render admission policy
//!
//! The host pushes a fresh state snapshot on every change anywhere in the
//! house. Only the watched weather entity and the sun entity affect the panel,
//! so everything else is suppressed here.

use std::sync::Arc;
use tracing::debug;

use crate::config::PanelConfig;
use crate::models::{EntityState, HostState, SUN_ENTITY_ID};

fn same_slot(previous: Option<&Arc<EntityState>>, next: Option<&Arc<EntityState>>) -> bool {
    match (previous, next) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Decide whether new host state or configuration warrants a re-render.
///
/// Entity slots are compared by identity, not by value: the host swaps in a
/// new record whenever an entity changes.
/// `previous_config` of `None` means a config was applied since the last
/// evaluation.
#[must_use]
pub fn should_update(
    previous_state: Option<&HostState>,
    next_state: &HostState,
    previous_config: Option<&PanelConfig>,
    next_config: &PanelConfig,
) -> bool {
    if previous_config != Some(next_config) {
        debug!(entity = next_config.entity(), "Configuration changed");
        return true;
    }

    let Some(previous_state) = previous_state else {
        debug!(entity = next_config.entity(), "First render");
        return true;
    };

    let entity = next_config.entity();
    let entity_changed = !same_slot(previous_state.entity(entity), next_state.entity(entity));
    let sun_changed = !same_slot(
        previous_state.entity(SUN_ENTITY_ID),
        next_state.entity(SUN_ENTITY_ID),
    );

    debug!(entity, entity_changed, sun_changed, "Evaluated host update");
    entity_changed || sun_changed
}
