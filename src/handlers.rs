use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::watch;
use crate::manager_output::AutoUpdateStatus;
use crate::manager_scheduler::Scheduler;
use crate::pipeline::Pipeline;

/// Shared state of the control api
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub status: AutoUpdateStatus,
    pub interval: Duration,
    pub control: watch::Sender<bool>,
    pub scheduler_running: Arc<AtomicBool>,
}

impl AppState {
    /// Spawns a scheduler unless one is running. A scheduler that is just stopping
    /// picks up the enable itself, returns whether a new one was spawned.
    ///
    pub fn ensure_scheduler(&self) -> bool {
        if self.scheduler_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err() {
            return false;
        }

        Scheduler::new(
            self.pipeline.clone(),
            self.status.clone(),
            self.interval,
            self.control.subscribe(),
            self.scheduler_running.clone(),
        ).spawn();
        info!("scheduler started");

        true
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AutoUpdate {
    pub auto_update: bool,
}

/// Registers all control routes
///
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(weather_update)
        .service(get_auto_update)
        .service(toggle_auto_update);
}

#[get("/wetter_update")]
async fn weather_update(data: web::Data<AppState>) -> impl Responder {
    let report = data.pipeline.run_cycle().await;
    info!("manual update: {:?}", report);

    HttpResponse::Ok().json(json!({
        "message": "Wetterdaten wurden aktualisiert",
        "current_written": report.current_written,
        "forecast_written": report.forecast_written,
    }))
}

#[get("/auto_update")]
async fn get_auto_update(data: web::Data<AppState>) -> impl Responder {
    match data.status.read() {
        Ok(auto_update) => HttpResponse::Ok().json(AutoUpdate { auto_update }),
        Err(e) => {
            error!("failed to read auto update status: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
    }
}

#[post("/toggle_auto_update")]
async fn toggle_auto_update(body: web::Bytes, data: web::Data<AppState>) -> impl Responder {
    let params: AutoUpdate = match serde_json::from_slice(&body) {
        Ok(params) => params,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({"error": "auto_update should be a boolean"}));
        }
    };
    info!("{:?}", params);

    if let Err(e) = data.status.write(params.auto_update) {
        error!("failed to write auto update status: {}", e);
        return HttpResponse::InternalServerError().json(json!({"error": e.to_string()}));
    }

    data.control.send_replace(params.auto_update);
    if params.auto_update {
        data.ensure_scheduler();
    }

    HttpResponse::Ok().json(json!({"message": "Auto-update status toggled successfully"}))
}
