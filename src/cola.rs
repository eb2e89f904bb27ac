//! In-memory cola brand registry.
//!
//! A toy dataset: brand records keyed by name, seeded with one default
//! entry. The registry is shared across handlers; lookups clone the record
//! out so the lock is never held across an await point.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Brand looked up when a query does not name one.
pub const DEFAULT_BRAND: &str = "Coca-Cola";

/// A registered cola brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColaBrand {
    pub owner: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Registry of brands keyed by name.
#[derive(Debug)]
pub struct ColaRegistry {
    brands: RwLock<HashMap<String, ColaBrand>>,
}

impl Default for ColaRegistry {
    fn default() -> Self {
        let mut brands = HashMap::new();
        brands.insert(
            DEFAULT_BRAND.to_string(),
            ColaBrand {
                owner: "The Coca-Cola Company".to_string(),
                name: DEFAULT_BRAND.to_string(),
                tags: Some(vec![
                    "classic".to_string(),
                    "original".to_string(),
                    "soda".to_string(),
                ]),
                description: Some("The original cola, sold worldwide since 1886.".to_string()),
            },
        );
        Self {
            brands: RwLock::new(brands),
        }
    }
}

impl ColaRegistry {
    /// Insert or replace a brand, keyed by its name.
    pub fn register(&self, brand: ColaBrand) {
        let mut brands = self.brands.write().expect("registry lock poisoned");
        brands.insert(brand.name.clone(), brand);
    }

    /// Look up a brand by name.
    pub fn get(&self, name: &str) -> Option<ColaBrand> {
        let brands = self.brands.read().expect("registry lock poisoned");
        brands.get(name).cloned()
    }
}
