#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use config::Config;
use ems_power_flow_card::card::ELEMENT_NAME;
use ems_power_flow_card::model::{Api, StateSnapshot};
use ems_power_flow_card::refresh::SnapshotCache;
use ems_power_flow_card::view::CardView;
use ems_power_flow_card::{hass, view, EmsPowerFlowCard};
use rocket::http::ContentType;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket, State};
use std::sync::Mutex;
use std::time::{Duration, Instant};

mod metrics;

const HASS_URL: &str = "http://localhost:8123";
const CONFIG_FILE: &str = "ems-power-flow";

#[derive(Clone, serde::Deserialize)]
pub struct PreviewConfig {
    hass_url: String,
    token: String,
    interval: u64,
    /// Card configuration, as it would appear in a dashboard.
    card: Option<serde_json::Value>,
}

/// Structure containing state for API handlers.
pub struct StateData {
    api: Api,
    card: EmsPowerFlowCard,
    cache: Mutex<SnapshotCache>,
}

impl StateData {
    /// Latest snapshot, refreshed from Home Assistant when the refresh interval has elapsed.
    async fn snapshot(&self) -> Option<StateSnapshot> {
        let due = self
            .cache
            .lock()
            .map(|cache| cache.refresh_due(Instant::now()))
            .unwrap_or(true);

        if due {
            let result = hass::states(&self.api).await;
            if let Ok(mut cache) = self.cache.lock() {
                cache.update(result, Instant::now());
            }
        } else {
            log::info!("interval time not yet elapsed since last refresh; using cached states")
        }

        self.cache
            .lock()
            .ok()
            .and_then(|cache| cache.snapshot().cloned())
    }

    /// Render the card with the latest snapshot.
    async fn render(&self) -> Option<CardView> {
        let snapshot = self.snapshot().await;
        render_card(&self.card, snapshot.as_ref())
    }
}

/// Render `card`, feeding the displayed readings to the metrics registry.
fn render_card(card: &EmsPowerFlowCard, snapshot: Option<&StateSnapshot>) -> Option<CardView> {
    if let Some(readings) = card.readings(snapshot) {
        metrics::record(&readings);
    }
    card.render(snapshot)
}

pub fn read_settings() -> Result<PreviewConfig, config::ConfigError> {
    let mut settings = Config::default();
    settings
        .merge(config::File::with_name(CONFIG_FILE).required(false))?
        .merge(config::Environment::with_prefix("EMS"))?
        .set_default("hass_url", HASS_URL)?
        .set_default("interval", 10_i64)?;

    settings.try_into()
}

#[get("/")]
async fn card_route(state: &State<StateData>) -> RawHtml<String> {
    let card = state
        .render()
        .await
        .map(|view| view.to_html())
        .unwrap_or_default();

    RawHtml(format!(
        "<!DOCTYPE html><html><head><title>{}</title><style>{}</style></head><body>{}</body></html>",
        ELEMENT_NAME,
        view::STYLES,
        card
    ))
}

#[get("/card.json")]
async fn card_json_route(state: &State<StateData>) -> Result<(ContentType, String), hass::Error> {
    let view = state.render().await;

    serde_json::to_string(&view)
        .map(|json| (ContentType::JSON, json))
        .or(Err(hass::Error::FormatError))
}

#[get("/metrics")]
async fn metrics_route() -> Result<String, hass::Error> {
    metrics::read().await
}

#[launch]
fn rocket() -> Rocket<Build> {
    env_logger::init();

    let settings = read_settings().unwrap_or_else(|e| {
        log::error!("Configuration error: {}", e);
        std::process::exit(1)
    });

    let mut card = EmsPowerFlowCard::new();
    let card_config = settings.card.unwrap_or_else(|| serde_json::json!({}));
    if let Err(e) = card.set_config(card_config) {
        log::error!("{}", e);
        std::process::exit(1)
    }
    log::info!("{} ready (size {})", ELEMENT_NAME, card.card_size());

    let state = StateData {
        api: hass::api(settings.hass_url, settings.token),
        card,
        cache: Mutex::new(SnapshotCache::new(Duration::from_secs(settings.interval))),
    };

    rocket::build()
        .manage(state)
        .mount("/", routes![card_route, card_json_route, metrics_route])
}

#[cfg(test)]
mod test {
    use super::render_card;
    use crate::metrics;
    use ems_power_flow_card::model::{EntityState, StateSnapshot};
    use ems_power_flow_card::EmsPowerFlowCard;
    use serde_json::json;

    #[test]
    fn renders_are_counted() {
        let mut card = EmsPowerFlowCard::new();
        card.set_config(json!({ "entities": { "pv_power": "sensor.pv" } }))
            .unwrap();
        let states: StateSnapshot = vec![("sensor.pv", EntityState::new("1500"))]
            .into_iter()
            .collect();

        let before = metrics::renders();
        let view = render_card(&card, Some(&states)).unwrap();
        assert_eq!("1500.0 W", view.pv.value);
        assert!(metrics::renders() > before);
    }

    #[test]
    fn no_snapshot_renders_nothing() {
        let mut card = EmsPowerFlowCard::new();
        card.set_config(json!({ "entities": {} })).unwrap();

        assert_eq!(None, render_card(&card, None));
    }
}
