use serde_json::json;
use weather_core::{WeatherState, day_cells};

pub const TITLE: &str = "Classy Weather";

/// Text view of `state`: status line, loading indicator, then the day list
/// when a forecast is present and there is no error.
pub fn render(state: &WeatherState) -> String {
    let mut lines = Vec::new();

    if let Some(status) = state.status_line() {
        lines.push(status);
    }
    if state.loading {
        lines.push("Loading...".to_string());
    }
    if let Some(forecast) = state.visible_forecast() {
        lines.push(String::new());
        lines.push(format!("Weather For {}", forecast.name));
        for cell in day_cells(forecast) {
            lines.push(format!("  {}  {:<5}  {}° — {}°", cell.icon, cell.label, cell.min, cell.max));
        }
    }

    lines.join("\n")
}

/// Machine-readable view of a settled state.
pub fn render_json(state: &WeatherState) -> serde_json::Value {
    let forecast = state.visible_forecast();
    json!({
        "location": state.display_location(),
        "error": state.error,
        "forecast": forecast,
        "days": forecast.map(day_cells).unwrap_or_default(),
    })
}
