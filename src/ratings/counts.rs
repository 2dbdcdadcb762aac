use super::traits::RatingStore;
use super::types::RatingCounts;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Advisory per-dish like/dislike cache.
///
/// Values are only ever replaced wholesale by a fresh fetch from the store;
/// nothing increments them in place, so a missed or duplicated feed
/// notification cannot make the cache drift.
#[derive(Debug, Default)]
pub struct CountCache {
    entries: RwLock<HashMap<String, RatingCounts>>,
}

impl CountCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dish_id: &str) -> Option<RatingCounts> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(dish_id)
            .copied()
    }

    pub fn put(&self, dish_id: &str, counts: RatingCounts) {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(dish_id.to_string(), counts);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Re-fetch the aggregate for `dish_id` and overwrite the cached value.
    ///
    /// On failure the previous value is kept and the error returned; callers
    /// treat that as "no fresh data".
    pub async fn refresh(
        &self,
        store: &dyn RatingStore,
        dish_id: &str,
    ) -> Result<RatingCounts, StoreError> {
        let counts = store.ratings_count(dish_id).await?;
        self.put(dish_id, counts);
        Ok(counts)
    }
}
