mod chart;
mod page;

use std::sync::Arc;

use actix_web::{
    HttpResponse, ResponseError,
    http::header,
    web::{self},
};
use derive_more::derive::{Display, Error};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::hvac::{Location, RoomForm, RoomInput, SmartHvac};
use crate::port::OutdoorTemperatureAccess;

type HvacState<S> = web::Data<Mutex<SmartHvac<S>>>;

pub fn new_routes<S>(hvac: Arc<Mutex<SmartHvac<S>>>) -> actix_web::Scope
where
    S: OutdoorTemperatureAccess + 'static,
{
    web::scope("")
        .route("/", web::get().to(page::render::<S>))
        .route("/control", web::post().to(smart_control::<S>))
        .route("/api/state", web::get().to(state::<S>))
        .service(chart::routes::<S>())
        .app_data(web::Data::from(hvac))
}

type WebResponse = Result<HttpResponse, WebApiError>;

#[derive(Debug, Error, Display)]
enum WebApiError {
    #[display("Internal error")]
    InternalError(anyhow::Error),

    #[display("Not found")]
    NotFound,
}

impl ResponseError for WebApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        tracing::warn!("WebApiError: {:?}", self);

        match self {
            WebApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

async fn smart_control<S>(hvac: HvacState<S>, form: web::Form<RoomInput>) -> HttpResponse
where
    S: OutdoorTemperatureAccess,
{
    let mut hvac = hvac.lock().await;
    hvac.update_form(form.into_inner());

    if let Err(e) = hvac.smart_control().await {
        tracing::error!("Smart control aborted: {:?}", e);
    }

    HttpResponse::SeeOther().insert_header((header::LOCATION, "/")).finish()
}

async fn state<S>(hvac: HvacState<S>) -> HttpResponse
where
    S: OutdoorTemperatureAccess,
{
    #[derive(Serialize)]
    struct StateView<'a> {
        location: &'a Location,
        form: &'a RoomForm,
        samples: usize,
    }

    let hvac = hvac.lock().await;

    HttpResponse::Ok().json(StateView {
        location: hvac.location(),
        form: hvac.form(),
        samples: hvac.history().len(),
    })
}

fn csv_response<T: Serialize>(rows: &[T]) -> WebResponse {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| WebApiError::InternalError(e.into()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| WebApiError::InternalError(anyhow::anyhow!("Error flushing CSV: {}", e)))?;

    Ok(HttpResponse::Ok().content_type(mime::TEXT_CSV_UTF_8).body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::unit::v;
    use crate::hvac::HistoryMode;
    use crate::hvac::control::test_support::{ScriptedSource, hvac_with};
    use actix_web::{App, http::StatusCode, test};
    use assert_json_diff::assert_json_eq;

    fn shared(hvac: SmartHvac<ScriptedSource>) -> Arc<Mutex<SmartHvac<ScriptedSource>>> {
        Arc::new(Mutex::new(hvac))
    }

    fn control_form(occupants: &str) -> [(&'static str, String); 4] {
        [
            ("setpoint", "24".to_string()),
            ("occupants", occupants.to_string()),
            ("floor_area", "1000".to_string()),
            ("ac_efficiency", "0.5".to_string()),
        ]
    }

    #[actix_web::test]
    async fn renders_form_page() {
        let hvac = shared(hvac_with(vec![], HistoryMode::Accumulate));
        let app = test::init_service(App::new().service(new_routes(hvac))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Smart Control"));
        assert!(body.contains("Jalgaon"));
        assert!(body.contains(r#"name="current_temperature" value="25" readonly"#));
        assert!(body.contains("Room Temperature"));
    }

    #[actix_web::test]
    async fn control_updates_state_and_redirects() {
        let hvac = shared(hvac_with(vec![Ok(v!(25 C))], HistoryMode::Accumulate));
        let app = test::init_service(App::new().service(new_routes(hvac.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/control")
            .set_form(control_form("1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap().to_str().unwrap(), "/");

        let hvac = hvac.lock().await;
        assert!((hvac.form().setpoint().0 - 20.354_886_659_234_484).abs() < 1e-9);
        assert_eq!(hvac.history().len(), 100);
    }

    #[actix_web::test]
    async fn failed_fetch_still_redirects_without_changes() {
        let hvac = shared(hvac_with(vec![], HistoryMode::Accumulate));
        let app = test::init_service(App::new().service(new_routes(hvac.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/control")
            .set_form(control_form("3"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let hvac = hvac.lock().await;
        assert_eq!(hvac.form().current_temperature(), v!(25 C));
        assert_eq!(hvac.form().setpoint(), v!(24 C));
        assert_eq!(hvac.form().occupants(), 3);
        assert!(hvac.history().is_empty());
    }

    #[actix_web::test]
    async fn rejects_negative_occupants() {
        let hvac = shared(hvac_with(vec![Ok(v!(25 C))], HistoryMode::Accumulate));
        let app = test::init_service(App::new().service(new_routes(hvac.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/control")
            .set_form(control_form("-1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(hvac.lock().await.history().is_empty());
    }

    #[actix_web::test]
    async fn exposes_state_as_json() {
        let hvac = shared(hvac_with(vec![], HistoryMode::Accumulate));
        let app = test::init_service(App::new().service(new_routes(hvac))).await;

        let body: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/state").to_request()).await;

        assert_json_eq!(
            body,
            serde_json::json!({
                "location": { "city": "Jalgaon", "latitude": 21.0029, "longitude": 75.566 },
                "form": {
                    "setpoint": 25.0,
                    "current_temperature": 25.0,
                    "occupants": 1,
                    "floor_area": 1000.0,
                    "ac_efficiency": 0.5
                },
                "samples": 0
            })
        );
    }
}
