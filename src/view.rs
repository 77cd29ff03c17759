use html_escape::encode_text;
use serde::Serialize;

/// Stylesheet accompanying the markup produced by [`CardView::to_html`].
pub const STYLES: &str = r#"
:host {
  display: block;
}
ha-card {
  padding: 16px;
  display: flex;
  flex-direction: column;
  gap: 8px;
}
.row {
  display: flex;
  justify-content: space-between;
  align-items: center;
}
.label {
  font-weight: bold;
}
.value {
  font-family: monospace;
}
.battery {
  border: 1px solid var(--divider-color, #ddd);
  border-radius: 4px;
  padding: 8px;
  display: flex;
  flex-direction: column;
  gap: 4px;
}
"#;

/// Single labelled reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// Bordered block showing one battery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryBlock {
    pub label: String,
    pub power: String,
    pub soc: String,
}

/// Rendered card: PV, Home and Grid rows followed by two battery blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub pv: Row,
    pub home: Row,
    pub grid: Row,
    pub batteries: [BatteryBlock; 2],
}

impl CardView {
    /// Rows in display order.
    pub fn rows(&self) -> [&Row; 3] {
        [&self.pv, &self.home, &self.grid]
    }

    /// Render as `ha-card` markup, styled by [`STYLES`].
    pub fn to_html(&self) -> String {
        let rows: String = self.rows().iter().map(|row| row.to_html()).collect();
        let batteries: String = self.batteries.iter().map(BatteryBlock::to_html).collect();

        format!("<ha-card>{}{}</ha-card>", rows, batteries)
    }
}

impl Row {
    fn to_html(&self) -> String {
        format!(
            "<div class=\"row\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
            encode_text(&self.label),
            encode_text(&self.value)
        )
    }
}

impl BatteryBlock {
    fn to_html(&self) -> String {
        format!(
            "<div class=\"battery\"><span class=\"label\">{}</span><span class=\"value\">P: {}</span><span class=\"value\">SoC: {}</span></div>",
            encode_text(&self.label),
            encode_text(&self.power),
            encode_text(&self.soc)
        )
    }
}
