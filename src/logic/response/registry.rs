//! Adapter Registry
//!
//! Action type → adapter routing. Unrouted types resolve to GenericNoOp.

use std::collections::HashMap;

use super::adapters::Adapter;
use super::{audit_config, identity, network};

#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    routes: HashMap<String, Adapter>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for action in identity::ROUTED {
            registry.register(action, Adapter::IdentityAccess);
        }
        for action in network::ROUTED {
            registry.register(action, Adapter::NetworkControl);
        }
        for action in audit_config::ROUTED {
            registry.register(action, Adapter::AuditConfig);
        }
        registry
    }
}

impl AdapterRegistry {
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Route `action_type` to `adapter`, replacing any previous route
    pub fn register(&mut self, action_type: &str, adapter: Adapter) -> Option<Adapter> {
        self.routes.insert(action_type.to_string(), adapter)
    }

    pub fn resolve(&self, action_type: &str) -> Adapter {
        self.routes
            .get(action_type)
            .copied()
            .unwrap_or(Adapter::GenericNoOp)
    }

    /// Whether `action_type` resolves to an adapter that can undo it
    pub fn supports_rollback(&self, action_type: &str) -> bool {
        self.resolve(action_type).supports_rollback(action_type)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
