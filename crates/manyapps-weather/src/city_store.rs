//! Persistence of the last searched city.

use manyapps_core::{SharedStore, StorageError};

/// Storage key of the last searched city (plain string).
pub const CITY_KEY: &str = "weather-city";

#[derive(Clone)]
pub struct CityStore {
    store: SharedStore,
}

impl CityStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    pub fn save_city(&self, city: &str) -> Result<(), StorageError> {
        self.store.set_item(CITY_KEY, city)
    }

    /// The saved city, or an empty string when none is stored or the read fails.
    pub fn get_city(&self) -> String {
        match self.store.get_item(CITY_KEY) {
            Ok(city) => city.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read saved city: {}", e);
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for CityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityStore").field("key", &CITY_KEY).finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use manyapps_core::MemoryStore;

    #[test]
    fn test_absent_city_is_empty() {
        let cities = CityStore::new(MemoryStore::shared());
        assert_eq!(cities.get_city(), "");
    }

    #[test]
    fn test_save_then_get() {
        let cities = CityStore::new(MemoryStore::shared());
        cities.save_city("X").unwrap();
        assert_eq!(cities.get_city(), "X");

        cities.save_city("Kragujevac").unwrap();
        assert_eq!(cities.get_city(), "Kragujevac");
    }

    #[test]
    fn test_uses_shared_key() {
        let store = MemoryStore::shared();
        CityStore::new(store.clone()).save_city("Tokyo").unwrap();
        assert_eq!(store.get_item(CITY_KEY).unwrap().as_deref(), Some("Tokyo"));
    }
}
