use actix_web::HttpResponse;

use crate::hvac::chart::AxisRange;
use crate::hvac::{ChartView, Location, RoomForm, TemperatureHistory};
use crate::port::OutdoorTemperatureAccess;

use super::HvacState;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 45.0;
const TICKS: usize = 5;

const ROOM_COLOR: &str = "#1f3fbf";
const SETPOINT_COLOR: &str = "#d62728";

pub async fn render<S>(hvac: HvacState<S>) -> HttpResponse
where
    S: OutdoorTemperatureAccess,
{
    let hvac = hvac.lock().await;
    let body = page(hvac.location(), hvac.form(), hvac.history());

    HttpResponse::Ok().content_type(mime::TEXT_HTML_UTF_8).body(body)
}

fn page(location: &Location, form: &RoomForm, history: &TemperatureHistory) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Smart HVAC Control by Kalpesh Marathe and Team</title>
<style>
body {{ font-family: sans-serif; max-width: 900px; margin: 0 auto; text-align: center; }}
label, input {{ display: block; margin: 5px auto; }}
button {{ margin: 10px; }}
</style>
</head>
<body>
<h1>Smart HVAC Control by Kalpesh Marathe and Team</h1>
<p>{city} ({latitude}, {longitude})</p>
<form method="post" action="/control">
<label for="setpoint">Setpoint Temperature (°C):</label>
<input id="setpoint" name="setpoint" type="number" step="any" value="{setpoint}">
<label for="current_temperature">Current Temperature (°C):</label>
<input id="current_temperature" name="current_temperature" value="{current}" readonly>
<label for="occupants">Number of People:</label>
<input id="occupants" name="occupants" type="number" min="0" step="1" value="{occupants}">
<label for="floor_area">Room Diameter (sqft):</label>
<input id="floor_area" name="floor_area" type="number" step="any" value="{floor_area}">
<label for="ac_efficiency">AC Efficiency Factor:</label>
<input id="ac_efficiency" name="ac_efficiency" type="number" step="any" value="{ac_efficiency}">
<button type="submit">Smart Control</button>
</form>
{chart}
</body>
</html>
"#,
        city = escape(&location.city),
        latitude = location.latitude,
        longitude = location.longitude,
        setpoint = form.setpoint().0,
        current = form.current_temperature().0,
        occupants = form.occupants(),
        floor_area = form.floor_area().0,
        ac_efficiency = form.ac_efficiency(),
        chart = chart_svg(history),
    )
}

//matches the empty-axes default of common plotting tools
const EMPTY_VIEW: ChartView = ChartView {
    x: AxisRange { min: 0.0, max: 1.0 },
    y: AxisRange { min: 0.0, max: 1.0 },
};

struct Plot {
    view: ChartView,
}

impl Plot {
    fn px(&self, x: f64) -> f64 {
        MARGIN_LEFT + scale(x, &self.view.x) * (CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn py(&self, y: f64) -> f64 {
        CHART_HEIGHT - MARGIN_BOTTOM - scale(y, &self.view.y) * (CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM)
    }

    fn polyline(&self, points: impl Iterator<Item = (f64, f64)>, color: &str, dashed: bool) -> String {
        let points = points
            .map(|(x, y)| format!("{:.2},{:.2}", self.px(x), self.py(y)))
            .collect::<Vec<_>>()
            .join(" ");
        let dash = if dashed { r#" stroke-dasharray="6 4""# } else { "" };

        format!(r#"<polyline fill="none" stroke="{color}" stroke-width="1.5"{dash} points="{points}"/>"#)
    }
}

fn scale(value: f64, axis: &AxisRange) -> f64 {
    if axis.span() == 0.0 {
        0.5
    } else {
        (value - axis.min) / axis.span()
    }
}

fn chart_svg(history: &TemperatureHistory) -> String {
    let plot = Plot {
        view: history.view().unwrap_or(EMPTY_VIEW),
    };
    let left = MARGIN_LEFT;
    let right = CHART_WIDTH - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = CHART_HEIGHT - MARGIN_BOTTOM;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CHART_WIDTH}" height="{CHART_HEIGHT}" font-size="11">
<rect x="{left}" y="{top}" width="{w}" height="{h}" fill="none" stroke="black"/>
"#,
        w = right - left,
        h = bottom - top,
    );

    for i in 0..TICKS {
        let fraction = i as f64 / (TICKS - 1) as f64;

        let x = plot.view.x.min + fraction * plot.view.x.span();
        let px = plot.px(x);
        svg.push_str(&format!(
            r#"<line x1="{px:.2}" y1="{bottom}" x2="{px:.2}" y2="{tick}" stroke="black"/><text x="{px:.2}" y="{label}" text-anchor="middle">{x:.1}</text>
"#,
            tick = bottom + 4.0,
            label = bottom + 16.0,
        ));

        let y = plot.view.y.min + fraction * plot.view.y.span();
        let py = plot.py(y);
        svg.push_str(&format!(
            r#"<line x1="{left}" y1="{py:.2}" x2="{tick}" y2="{py:.2}" stroke="black"/><text x="{label}" y="{py:.2}" text-anchor="end" dominant-baseline="middle">{y:.1}</text>
"#,
            tick = left - 4.0,
            label = left - 6.0,
        ));
    }

    if !history.is_empty() {
        svg.push_str(&plot.polyline(history.room_series(), ROOM_COLOR, false));
        svg.push('\n');
        svg.push_str(&plot.polyline(history.setpoint_series(), SETPOINT_COLOR, true));
        svg.push('\n');
    }

    svg.push_str(&format!(
        r##"<text x="{cx}" y="{xlabel}" text-anchor="middle">Time</text>
<text x="14" y="{cy}" text-anchor="middle" transform="rotate(-90 14 {cy})">Temperature (°C)</text>
<g transform="translate({lx} {ly})">
<rect width="140" height="40" fill="white" stroke="#cccccc"/>
<line x1="8" y1="13" x2="32" y2="13" stroke="{ROOM_COLOR}" stroke-width="1.5"/><text x="38" y="17">Room Temperature</text>
<line x1="8" y1="29" x2="32" y2="29" stroke="{SETPOINT_COLOR}" stroke-width="1.5" stroke-dasharray="6 4"/><text x="38" y="33">Setpoint</text>
</g>
</svg>"##,
        cx = (left + right) / 2.0,
        xlabel = CHART_HEIGHT - 8.0,
        cy = (top + bottom) / 2.0,
        lx = right - 148.0,
        ly = top + 8.0,
    ));

    svg
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
