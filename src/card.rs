use crate::config::{BatteryConfig, CardConfig};
use crate::error::Error;
use crate::format::{format_power, format_soc};
use crate::model::{DisplayValue, StateSnapshot};
use crate::state::state_value;
use crate::view::{BatteryBlock, CardView, Row};
use serde_json::Value;

/// Name under which the card registers with the dashboard.
pub const ELEMENT_NAME: &str = "ems-power-flow-card";

/// Layout height hint reported to the dashboard grid.
pub const CARD_SIZE: u32 = 3;

const BATTERY_LABELS: [&str; 2] = ["Battery 1", "Battery 2"];

/// Power flow card. Holds the accepted configuration and renders state snapshots with it.
#[derive(Debug, Default)]
pub struct EmsPowerFlowCard {
    config: Option<CardConfig>,
}

impl EmsPowerFlowCard {
    pub fn new() -> Self {
        EmsPowerFlowCard::default()
    }

    /// Accept a new configuration document, replacing the previous one. A rejected document
    /// leaves the previous configuration in place.
    pub fn set_config(&mut self, config: Value) -> Result<(), Error> {
        let config = CardConfig::from_value(config).map_err(|e| {
            log::warn!("{}", e);
            e
        })?;

        log::debug!("accepted configuration: {:?}", config);
        self.config = Some(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Read and sign-normalize every configured entity from `snapshot`.
    ///
    /// Returns `None` until the host supplies a snapshot and a configuration has been accepted.
    pub fn readings(&self, snapshot: Option<&StateSnapshot>) -> Option<Readings> {
        let entities = &self.config.as_ref()?.entities;
        let states = snapshot?;
        let read = |entity_id: &Option<String>| state_value(Some(states), entity_id.as_deref());

        let readings = Readings {
            pv: entities.pv_sign.apply(read(&entities.pv_power)),
            home: read(&entities.home_power),
            grid: entities.grid_sign.apply(read(&entities.grid_power)),
            batteries: [
                battery_reading(entities.battery_1.as_ref(), states),
                battery_reading(entities.battery_2.as_ref(), states),
            ],
        };

        log::debug!("{:?}", readings);
        Some(readings)
    }

    /// Render `snapshot` with the current configuration.
    ///
    /// Returns `None` (nothing to draw) until the host supplies a snapshot and a configuration
    /// has been accepted.
    pub fn render(&self, snapshot: Option<&StateSnapshot>) -> Option<CardView> {
        let config = self.config.as_ref()?;
        let readings = self.readings(snapshot)?;
        let entities = &config.entities;

        Some(CardView {
            pv: row("PV", format_power(readings.pv, config)),
            home: row("Home", format_power(readings.home, config)),
            grid: row("Grid", format_power(readings.grid, config)),
            batteries: [
                battery_block(
                    &readings.batteries[0],
                    entities.battery_1.as_ref(),
                    BATTERY_LABELS[0],
                    config,
                ),
                battery_block(
                    &readings.batteries[1],
                    entities.battery_2.as_ref(),
                    BATTERY_LABELS[1],
                    config,
                ),
            ],
        })
    }
}

/// Battery readings, power already in canonical polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatteryReading {
    pub power: DisplayValue,
    pub soc: DisplayValue,
}

/// Sign-normalized readings of one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    pub pv: DisplayValue,
    /// Displayed as reported.
    pub home: DisplayValue,
    pub grid: DisplayValue,
    pub batteries: [BatteryReading; 2],
}

fn battery_reading(battery: Option<&BatteryConfig>, states: &StateSnapshot) -> BatteryReading {
    match battery {
        Some(battery) => BatteryReading {
            power: battery
                .sign
                .apply(state_value(Some(states), battery.power.as_deref())),
            soc: state_value(Some(states), battery.soc.as_deref()),
        },
        None => BatteryReading::default(),
    }
}

fn row(label: &str, value: String) -> Row {
    Row {
        label: String::from(label),
        value,
    }
}

fn battery_block(
    reading: &BatteryReading,
    battery: Option<&BatteryConfig>,
    default_label: &str,
    config: &CardConfig,
) -> BatteryBlock {
    let label = battery.and_then(BatteryConfig::label).unwrap_or(default_label);

    BatteryBlock {
        label: String::from(label),
        power: format_power(reading.power, config),
        soc: format_soc(reading.soc),
    }
}
