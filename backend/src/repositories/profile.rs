//! In-memory profile store

use super::ProfileStore;
use anyhow::Result;
use async_trait::async_trait;
use meal_planner_shared::NutritionProfile;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, NutritionProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = (Uuid, NutritionProfile)>) -> Self {
        Self {
            profiles: RwLock::new(profiles.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<NutritionProfile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn save_profile(&self, user_id: Uuid, profile: NutritionProfile) -> Result<()> {
        self.profiles.write().await.insert(user_id, profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_fetch() {
        let store = InMemoryProfileStore::new();
        let user_id = Uuid::new_v4();
        assert!(store.fetch_profile(user_id).await.unwrap().is_none());

        let profile = NutritionProfile {
            age: Some(41),
            ..Default::default()
        };
        store.save_profile(user_id, profile.clone()).await.unwrap();
        assert_eq!(store.fetch_profile(user_id).await.unwrap(), Some(profile));
    }
}
