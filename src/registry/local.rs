//! In-memory registry implementation.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::models::{GeoSample, NodeRecord, ReliefRegistration};

use super::error::{ErrorContext, RegistryError, RegistryResult};
use super::NodeRegistry;

/// Process-local registry backed by hash maps. Suitable for the single-node
/// deployment and for tests; nothing survives a restart.
#[derive(Default)]
pub struct LocalRegistry {
    nodes: RwLock<HashMap<String, NodeRecord>>,
    registrations: RwLock<HashMap<String, ReliefRegistration>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NodeRegistry for LocalRegistry {
    async fn record_location(
        &self,
        node_id: &str,
        sample: GeoSample,
        user_agent: &str,
    ) -> RegistryResult<NodeRecord> {
        let mut nodes = self.nodes.write();
        let record = nodes
            .entry(node_id.to_string())
            .or_insert_with(|| NodeRecord {
                id: node_id.to_string(),
                last_location: None,
                last_seen: Utc::now(),
                user_agent: user_agent.to_string(),
            });
        record.last_location = Some(sample);
        record.last_seen = Utc::now();
        record.user_agent = user_agent.to_string();
        Ok(record.clone())
    }

    async fn get_node(&self, node_id: &str) -> RegistryResult<NodeRecord> {
        self.nodes.read().get(node_id).cloned().ok_or_else(|| {
            RegistryError::not_found(
                format!("node {} not registered", node_id),
                ErrorContext::new("get_node")
                    .with_entity("node")
                    .with_entity_id(node_id),
            )
        })
    }

    async fn list_nodes(&self) -> RegistryResult<Vec<NodeRecord>> {
        let mut nodes: Vec<NodeRecord> = self.nodes.read().values().cloned().collect();
        nodes.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        Ok(nodes)
    }

    async fn store_registration(&self, registration: ReliefRegistration) -> RegistryResult<()> {
        self.registrations
            .write()
            .insert(registration.reference_code.clone(), registration);
        Ok(())
    }

    async fn find_registration(&self, code: &str) -> RegistryResult<ReliefRegistration> {
        self.registrations.read().get(code).cloned().ok_or_else(|| {
            RegistryError::not_found(
                format!("registration {} not on file", code),
                ErrorContext::new("find_registration")
                    .with_entity("registration")
                    .with_entity_id(code),
            )
        })
    }

    async fn health_check(&self) -> RegistryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationKind;

    fn sample() -> GeoSample {
        GeoSample {
            lat: 19.07,
            lng: 72.87,
            accuracy: 12.5,
        }
    }

    #[tokio::test]
    async fn test_record_location_creates_then_updates() {
        let registry = LocalRegistry::new();
        let first = registry
            .record_location("node-1", sample(), "agent/1")
            .await
            .unwrap();
        assert_eq!(first.last_location.unwrap().lat, 19.07);

        let updated = registry
            .record_location(
                "node-1",
                GeoSample {
                    lat: 20.0,
                    lng: 73.0,
                    accuracy: 5.0,
                },
                "agent/2",
            )
            .await
            .unwrap();
        assert_eq!(updated.last_location.unwrap().lat, 20.0);
        assert_eq!(updated.user_agent, "agent/2");
        assert_eq!(registry.list_nodes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_node_is_not_found() {
        let registry = LocalRegistry::new();
        let err = registry.get_node("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_registration_roundtrip_and_miss() {
        let registry = LocalRegistry::new();
        let registration = ReliefRegistration {
            reference_code: "RN-1234".to_string(),
            kind: RegistrationKind::Volunteer,
            name: "A. Volunteer".to_string(),
            contact: "a@example.in".to_string(),
            details: "medical".to_string(),
            submitted_at: Utc::now(),
        };
        registry.store_registration(registration).await.unwrap();

        let found = registry.find_registration("RN-1234").await.unwrap();
        assert_eq!(found.kind, RegistrationKind::Volunteer);

        let err = registry.find_registration("RN-9999").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
