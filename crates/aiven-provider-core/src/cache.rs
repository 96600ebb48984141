//! Shared topic cache
//!
//! Listing Kafka topics is expensive on large services, so handlers share a
//! cache of topic names per `project/service`. The cache is created once at
//! provider configuration time and lives in the [`ProviderContext`].
//!
//! [`ProviderContext`]: crate::provider::ProviderContext

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Topic names keyed by project and service
#[derive(Debug, Default)]
pub struct TopicCache {
    topics: RwLock<HashMap<(String, String), Vec<String>>>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, project: &str, service: &str) -> Option<Vec<String>> {
        self.topics
            .read()
            .await
            .get(&(project.to_string(), service.to_string()))
            .cloned()
    }

    pub async fn store(&self, project: &str, service: &str, topics: Vec<String>) {
        self.topics
            .write()
            .await
            .insert((project.to_string(), service.to_string()), topics);
    }

    pub async fn invalidate(&self, project: &str, service: &str) {
        self.topics
            .write()
            .await
            .remove(&(project.to_string(), service.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_get_invalidate() {
        let cache = TopicCache::new();
        assert!(cache.get("proj", "kafka").await.is_none());

        cache
            .store("proj", "kafka", vec!["events".to_string()])
            .await;
        assert_eq!(cache.get("proj", "kafka").await.unwrap(), vec!["events"]);
        assert!(cache.get("proj", "other").await.is_none());

        cache.invalidate("proj", "kafka").await;
        assert!(cache.get("proj", "kafka").await.is_none());
    }
}
