use crate::error::Error;
use crate::sign::SignConvention;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_UNIT: &str = "W";
pub const DEFAULT_DECIMALS: usize = 1;

/// A battery shown in its own block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// Entity reporting battery power.
    pub power: Option<String>,
    pub sign: SignConvention,
    /// Entity reporting state of charge in percent.
    pub soc: Option<String>,
    pub name: Option<String>,
}

impl BatteryConfig {
    /// Configured name, unless unset or empty.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Entities displayed by the card. Every entry is optional; an unconfigured entity is
/// displayed as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntitiesConfig {
    pub pv_power: Option<String>,
    pub pv_sign: SignConvention,
    pub home_power: Option<String>,
    pub grid_power: Option<String>,
    pub grid_sign: SignConvention,
    pub battery_1: Option<BatteryConfig>,
    pub battery_2: Option<BatteryConfig>,
}

/// Validated card configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    pub entities: EntitiesConfig,
    pub unit: String,
    pub decimals: usize,
}

/* Configuration document exactly as supplied by the dashboard */
#[derive(Deserialize)]
struct RawCardConfig {
    entities: Option<EntitiesConfig>,
    unit: Option<String>,
    decimals: Option<usize>,
}

impl CardConfig {
    /// Configuration with the given entities and default unit and precision.
    pub fn new(entities: EntitiesConfig) -> Self {
        CardConfig {
            entities,
            unit: String::from(DEFAULT_UNIT),
            decimals: DEFAULT_DECIMALS,
        }
    }

    /// Parse and validate a configuration document.
    ///
    /// Only the presence of `entities` is required. Sign tags are never rejected; unknown tags
    /// fall back to [`SignConvention::Default`].
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let raw: RawCardConfig =
            serde_json::from_value(value).map_err(|e| Error::Configuration(e.to_string()))?;

        let entities = raw.entities.ok_or_else(Error::entities_required)?;

        Ok(CardConfig {
            entities,
            unit: raw.unit.unwrap_or_else(|| String::from(DEFAULT_UNIT)),
            decimals: raw.decimals.unwrap_or(DEFAULT_DECIMALS),
        })
    }
}
