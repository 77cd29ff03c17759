use ems_power_flow_card::card::Readings;
use ems_power_flow_card::model::DisplayValue;
use prometheus::{Encoder, GaugeVec, IntCounter, TextEncoder};

lazy_static! {
    static ref POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "power_flow_power",
            "sign-normalized power reading displayed by the card",
        ),
        &["reading"],
    )
    .unwrap();
    static ref SOC_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("power_flow_battery_soc", "battery state of charge (in %)",),
        &["battery"],
    )
    .unwrap();
    static ref RENDER_COUNTER: IntCounter = register_int_counter!(
        "power_flow_renders_total",
        "number of card renders with a state snapshot available"
    )
    .unwrap();
}

/// Set `label` of `gauge` to `value`, dropping the series while the reading is absent.
fn observe(gauge: &GaugeVec, label: &str, value: DisplayValue) {
    match value {
        Some(value) => gauge.with_label_values(&[label]).set(value),
        None => {
            /* Series may not exist yet */
            let _ = gauge.remove_label_values(&[label]);
        }
    }
}

/// Feed readings of one render pass to the Prometheus registry.
pub fn record(readings: &Readings) {
    RENDER_COUNTER.inc();

    observe(&POWER_GAUGE, "pv", readings.pv);
    observe(&POWER_GAUGE, "home", readings.home);
    observe(&POWER_GAUGE, "grid", readings.grid);

    for (battery, label) in readings.batteries.iter().zip(["battery_1", "battery_2"].iter()) {
        observe(&POWER_GAUGE, label, battery.power);
        observe(&SOC_GAUGE, label, battery.soc);
    }
}

#[cfg(test)]
pub fn renders() -> u64 {
    RENDER_COUNTER.get()
}

/// Read metrics from Prometheus exporter registry.
pub async fn read() -> Result<String, ems_power_flow_card::hass::Error> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder
        .encode(&metric_families, &mut buffer)
        .or(Err(ems_power_flow_card::hass::Error::FormatError))?;
    String::from_utf8(buffer).or(Err(ems_power_flow_card::hass::Error::FormatError))
}
