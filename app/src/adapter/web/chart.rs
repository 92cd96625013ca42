use actix_web::{HttpResponse, web};

use crate::port::OutdoorTemperatureAccess;

use super::{HvacState, WebApiError, WebResponse, csv_response};

pub fn routes<S>() -> actix_web::Scope
where
    S: OutdoorTemperatureAccess + 'static,
{
    web::scope("/api/chart")
        .route("", web::get().to(series::<S>))
        .route("/view", web::get().to(view::<S>))
}

#[derive(serde::Serialize)]
struct Row {
    time: f64,
    channel: &'static str,
    value: f64,
}

async fn series<S>(hvac: HvacState<S>) -> WebResponse
where
    S: OutdoorTemperatureAccess,
{
    let hvac = hvac.lock().await;
    let history = hvac.history();

    let rows: Vec<Row> = history
        .room_series()
        .map(|(time, value)| Row {
            time,
            channel: "room_temperature",
            value,
        })
        .chain(history.setpoint_series().map(|(time, value)| Row {
            time,
            channel: "setpoint",
            value,
        }))
        .collect();

    csv_response(&rows)
}

async fn view<S>(hvac: HvacState<S>) -> WebResponse
where
    S: OutdoorTemperatureAccess,
{
    let hvac = hvac.lock().await;

    match hvac.history().view() {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Err(WebApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::new_routes;
    use crate::core::unit::v;
    use crate::hvac::HistoryMode;
    use crate::hvac::control::test_support::hvac_with;
    use actix_web::{App, http::StatusCode, test};
    use tokio::sync::Mutex;

    #[actix_web::test]
    async fn view_is_not_found_before_first_run() {
        let hvac = Arc::new(Mutex::new(hvac_with(vec![], HistoryMode::Accumulate)));
        let app = test::init_service(App::new().service(new_routes(hvac))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/chart/view").to_request()).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn exposes_series_and_view_after_run() {
        let hvac = Arc::new(Mutex::new(hvac_with(vec![Ok(v!(25 C))], HistoryMode::Accumulate)));
        hvac.lock().await.smart_control().await.unwrap();
        let app = test::init_service(App::new().service(new_routes(hvac.clone()))).await;

        let csv = test::call_and_read_body(&app, test::TestRequest::get().uri("/api/chart").to_request()).await;
        let csv = String::from_utf8(csv.to_vec()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "time,channel,value");
        assert_eq!(lines.len(), 1 + 2 * 100);
        assert_eq!(lines.iter().filter(|l| l.contains(",setpoint,")).count(), 100);

        let view: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/chart/view").to_request()).await;
        let expected = hvac.lock().await.history().view().unwrap();

        assert_eq!(view["x"]["min"], 0.0);
        assert_eq!(view["y"]["min"], expected.y.min);
        assert_eq!(view["y"]["max"], expected.y.max);
    }
}
