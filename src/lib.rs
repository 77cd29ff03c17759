//! Power flow card for Home Assistant style dashboards.
//!
//! Shows PV generation, home consumption, grid exchange and up to two batteries. Readings come
//! from a host supplied [`StateSnapshot`](model::StateSnapshot), get normalized to one sign
//! convention and are formatted into a [`CardView`](view::CardView).

pub mod card;
pub mod config;
pub mod error;
pub mod format;
pub mod hass;
pub mod model;
pub mod refresh;
pub mod sign;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_resources;

pub use card::EmsPowerFlowCard;
pub use config::{BatteryConfig, CardConfig, EntitiesConfig};
pub use error::Error;
pub use sign::SignConvention;
