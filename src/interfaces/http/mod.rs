use crate::app::AppContext;
use crate::domain::advisory::{DashboardRequest, RecommendationQuery};
use crate::domain::error::AppError;
use crate::domain::farm::{AdvancedYieldInput, FarmerData, OptimizationInput};
use crate::domain::llm_config::ChatRequest;
use crate::domain::weather::{WeatherRequest, WeatherResponse};
use crate::application::use_cases::advisory::recommend_crops;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub context: Arc<AppContext>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// `{error}` body; validation problems are the caller's fault, the rest is ours.
fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: err.message().to_string(),
    };
    if err.is_validation() {
        HttpResponse::BadRequest().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}

fn log_failure(data: &HttpState, source: &str, context: &str, err: &AppError) {
    tracing::error!(source, error = %err, "{}", context);
    add_log(&data.logs, "ERROR", source, &format!("{}: {}", context, err));
}

#[get("/options")]
async fn get_options(data: web::Data<HttpState>) -> impl Responder {
    add_log(&data.logs, "INFO", "Options", "Loading crop, district and soil options");

    match data.context.option_loader.load_options().await {
        Ok(catalog) => HttpResponse::Ok().json(catalog),
        Err(e) => {
            log_failure(&data, "Options", "Failed to load options", &e);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: e.message().to_string(),
            })
        }
    }
}

#[get("/options/districts")]
async fn get_districts(data: web::Data<HttpState>) -> impl Responder {
    match data.context.option_loader.load_districts().await {
        Ok(districts) => HttpResponse::Ok().json(districts),
        Err(e) => {
            log_failure(&data, "Options", "Failed to load districts", &e);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: e.message().to_string(),
            })
        }
    }
}

#[post("/predict/yield")]
async fn predict_yield(
    data: web::Data<HttpState>,
    req: web::Json<FarmerData>,
) -> impl Responder {
    match data.context.engine.yield_report(&req) {
        Ok(report) => {
            add_log(
                &data.logs,
                "INFO",
                "Prediction",
                &format!(
                    "Yield for {} ({}): {} quintal/ha",
                    req.crop, req.season, report.estimate.formatted
                ),
            );
            HttpResponse::Ok().json(report)
        }
        Err(e) => {
            add_log(&data.logs, "WARN", "Prediction", &e.to_string());
            error_response(&e)
        }
    }
}

#[post("/predict/advanced")]
async fn predict_advanced(
    data: web::Data<HttpState>,
    req: web::Json<AdvancedYieldInput>,
) -> impl Responder {
    match data.context.engine.advanced_yield(&req) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            add_log(&data.logs, "WARN", "Prediction", &e.to_string());
            error_response(&e)
        }
    }
}

#[post("/optimize")]
async fn optimize(
    data: web::Data<HttpState>,
    req: web::Json<OptimizationInput>,
) -> impl Responder {
    match data.context.engine.optimize(&req) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            add_log(&data.logs, "WARN", "Optimizer", &e.to_string());
            error_response(&e)
        }
    }
}

#[post("/dashboard")]
async fn dashboard(
    data: web::Data<HttpState>,
    req: web::Json<DashboardRequest>,
) -> impl Responder {
    match data.context.advisory.dashboard(&req).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            add_log(&data.logs, "WARN", "Dashboard", &e.to_string());
            error_response(&e)
        }
    }
}

#[get("/recommendations")]
async fn recommendations(query: web::Query<RecommendationQuery>) -> impl Responder {
    HttpResponse::Ok().json(recommend_crops(&query))
}

#[post("/weather")]
async fn weather(data: web::Data<HttpState>, req: web::Json<WeatherRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Weather",
        &format!("Fetching weather for {}", req.resolved_location()),
    );

    match data.context.weather.fetch(&req).await {
        Ok(snapshot) => HttpResponse::Ok().json(WeatherResponse { weather: snapshot }),
        Err(e) => {
            log_failure(&data, "Weather", "Weather lookup failed", &e);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: e.message().to_string(),
            })
        }
    }
}

#[post("/chat")]
async fn chat(data: web::Data<HttpState>, req: web::Json<ChatRequest>) -> impl Responder {
    let config = data.context.chat.config();
    add_log(
        &data.logs,
        "INFO",
        "Chat",
        &format!(
            "Relaying message (provider={} model={} turns={})",
            config.provider,
            config.model,
            req.conversation_history.len()
        ),
    );

    match data.context.chat.execute(&req).await {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(e) => {
            log_failure(&data, "Chat", "Chat failed", &e);
            error_response(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data
        .logs
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Malformed JSON bodies get the same `{error}` shape as validation failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: err.to_string(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: err.to_string(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config()).service(
        web::scope("/api")
            .service(get_options)
            .service(get_districts)
            .service(predict_yield)
            .service(predict_advanced)
            .service(optimize)
            .service(dashboard)
            .service(recommendations)
            .service(weather)
            .service(chat)
            .service(get_logs),
    );
}

pub fn start_server(
    context: Arc<AppContext>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    host: &str,
    port: u16,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { context, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser frontend runs on another origin

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
