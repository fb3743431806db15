use rocket::serde::json::{json, Json, Value};
use rocket::{Route, State};

use calculator_engine::{Calculator, ComputeRequest, ComputeResponse};
use telemetry::Measure;

use crate::error::ApiError;

lazy_static! {
    static ref COMPUTE_MEASURE: Measure = Measure::new("controller", "compute");
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, ApiError> {
    Ok(telemetry::encode()?)
}

#[post("/api/v1/compute", format = "json", data = "<request>")]
fn compute(
    request: Json<ComputeRequest>,
    calculator: &State<Calculator>,
) -> Result<Json<ComputeResponse>, ApiError> {
    COMPUTE_MEASURE.stats(|| -> Result<_, ApiError> {
        let result = calculator.execute(&request.query)?;
        Ok(Json(ComputeResponse { result }))
    })
}

pub fn routes() -> Vec<Route> {
    routes![status, metrics, compute]
}
