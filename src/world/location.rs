use serde::{Deserialize, Serialize};

/// A generated place the player is standing in. Transient: never saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub description: String,
    /// Items lying around, taken one at a time
    pub items: Vec<String>,
    /// Enemies present, removed when defeated
    pub enemies: Vec<String>,
    /// Enterable places; non-empty only for safe zones
    pub sub_locations: Vec<String>,
}

impl Location {
    pub fn is_safe_zone(&self) -> bool {
        !self.sub_locations.is_empty()
    }

    pub fn has_sub_location(&self, name: &str) -> bool {
        self.sub_locations.iter().any(|s| s == name)
    }

    /// Removes one item by name. Returns false when it is not here.
    pub fn take_item(&mut self, name: &str) -> bool {
        match self.items.iter().position(|i| i == name) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn has_enemy(&self, name: &str) -> bool {
        self.enemies.iter().any(|e| e == name)
    }

    pub fn remove_enemy(&mut self, name: &str) -> bool {
        match self.enemies.iter().position(|e| e == name) {
            Some(idx) => {
                self.enemies.remove(idx);
                true
            }
            None => false,
        }
    }
}
