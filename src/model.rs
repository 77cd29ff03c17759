use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::iter::FromIterator;

/// Numeric reading prepared for display. `None` marks an absent reading.
pub type DisplayValue = Option<f64>;

/// Connection settings of a Home Assistant instance.
#[derive(Debug, Clone)]
pub struct Api {
    pub base_url: String,
    pub token: String,
}

/// State of a single entity as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub state: String,
}

impl EntityState {
    pub fn new<S: Into<String>>(state: S) -> Self {
        EntityState {
            state: state.into(),
        }
    }
}

/// Point-in-time mapping from entity identifier to its state.
///
/// Owned by the host and refreshed before every render; the card only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot {
    states: HashMap<String, EntityState>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        StateSnapshot::default()
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    pub fn insert<S: Into<String>>(&mut self, entity_id: S, state: EntityState) {
        self.states.insert(entity_id.into(), state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, EntityState)> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, EntityState)>>(iter: I) -> Self {
        StateSnapshot {
            states: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
