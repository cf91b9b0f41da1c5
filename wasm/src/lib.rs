//! WebAssembly module for the slag plant dashboard
//!
//! Provides client-side computation for:
//! - Chemistry tolerance checks and pricing
//! - Yield, cost and profit calculations
//! - Profit breakdowns and trends
//! - Processing queue order, maintenance scheduling and quality grading
//!
//! Every function takes and returns JSON strings. Decimal figures are
//! serialized as strings so no precision is lost crossing into JavaScript.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use shared::{Chemistry, Equipment, Load, PlantParameters, ProfitRecord, TrendPeriod};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("slag plant analytics ready"));
}

#[derive(Deserialize)]
struct YieldRequest {
    chemistry: Chemistry,
    weight: Decimal,
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn timestamp(now_ms: f64) -> Result<DateTime<Utc>, String> {
    if !now_ms.is_finite() {
        return Err(format!("Invalid timestamp: {}", now_ms));
    }
    Utc.timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| format!("Invalid timestamp: {}", now_ms))
}

fn chemistry_checks(chemistry_json: &str) -> Result<String, String> {
    let chemistry: Chemistry = parse(chemistry_json, "chemistry")?;
    render(&PlantParameters::default().tolerance.evaluate(&chemistry))
}

fn chemistry_price(chemistry_json: &str) -> Result<String, String> {
    let chemistry: Chemistry = parse(chemistry_json, "chemistry")?;
    Ok(shared::price_from_chemistry(&chemistry).to_string())
}

fn yields(request_json: &str) -> Result<String, String> {
    let request: YieldRequest = parse(request_json, "yield request")?;
    shared::validate_model_input(request.weight, &request.chemistry).map_err(|e| e.to_string())?;
    render(&shared::compute_yields(&request.chemistry, request.weight))
}

fn costs(weight_json: &str) -> Result<String, String> {
    let weight: Decimal = parse(weight_json, "weight")?;
    if weight < Decimal::ZERO {
        return Err("weight must not be negative".to_string());
    }
    render(&shared::compute_costs(weight))
}

fn profit(load_json: &str) -> Result<String, String> {
    let load: Load = parse(load_json, "load")?;
    let record = shared::compute_profit(&load).map_err(|e| e.to_string())?;
    render(&record)
}

fn profit_report(loads_json: &str, period: &str) -> Result<String, String> {
    let loads: Vec<Load> = parse(loads_json, "loads")?;
    let period: TrendPeriod = period.parse().map_err(|e: shared::ValidationError| e.to_string())?;
    let records = PlantParameters::default()
        .compute_profits(&loads)
        .map_err(|e| e.to_string())?;
    render(&shared::aggregate(&records, period))
}

fn trends(records_json: &str, period: &str) -> Result<String, String> {
    let records: Vec<ProfitRecord> = parse(records_json, "profit records")?;
    let period: TrendPeriod = period.parse().map_err(|e: shared::ValidationError| e.to_string())?;
    render(&shared::profit_trends(&records, period))
}

fn schedule(equipment_json: &str, now: DateTime<Utc>) -> Result<String, String> {
    let equipment: Vec<Equipment> = parse(equipment_json, "equipment")?;
    render(&PlantParameters::default().maintenance.schedule_all(&equipment, now))
}

fn queue(loads_json: &str, now: DateTime<Utc>) -> Result<String, String> {
    let loads: Vec<Load> = parse(loads_json, "loads")?;
    render(&shared::processing_queue(&loads, now))
}

fn quality(loads_json: &str) -> Result<String, String> {
    let loads: Vec<Load> = parse(loads_json, "loads")?;
    render(&shared::quality_status(&loads, &PlantParameters::default().tolerance))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Tolerance status of each measured element
#[wasm_bindgen]
pub fn validate_chemistry(chemistry_json: &str) -> Result<String, JsValue> {
    chemistry_checks(chemistry_json).map_err(js_err)
}

/// Price per tonne for a chemistry, as a decimal string
#[wasm_bindgen]
pub fn price_from_chemistry(chemistry_json: &str) -> Result<String, JsValue> {
    chemistry_price(chemistry_json).map_err(js_err)
}

/// Product tonnages for `{"chemistry": .., "weight": ..}`
#[wasm_bindgen]
pub fn compute_yields(request_json: &str) -> Result<String, JsValue> {
    yields(request_json).map_err(js_err)
}

/// Processing and operational costs for a weight in tonnes
#[wasm_bindgen]
pub fn compute_costs(weight_json: &str) -> Result<String, JsValue> {
    costs(weight_json).map_err(js_err)
}

/// Profit record for one load
#[wasm_bindgen]
pub fn compute_profit(load_json: &str) -> Result<String, JsValue> {
    profit(load_json).map_err(js_err)
}

/// Summary, breakdowns and trends for a list of loads
#[wasm_bindgen]
pub fn aggregate_profits(loads_json: &str, period: &str) -> Result<String, JsValue> {
    profit_report(loads_json, period).map_err(js_err)
}

/// Trend buckets for already computed profit records
#[wasm_bindgen]
pub fn profit_trends(records_json: &str, period: &str) -> Result<String, JsValue> {
    trends(records_json, period).map_err(js_err)
}

/// Proposed maintenance as seen at `now_ms` (milliseconds since the epoch)
#[wasm_bindgen]
pub fn maintenance_schedule_at(equipment_json: &str, now_ms: f64) -> Result<String, JsValue> {
    timestamp(now_ms)
        .and_then(|now| schedule(equipment_json, now))
        .map_err(js_err)
}

/// Proposed maintenance as seen now by the browser clock
#[wasm_bindgen]
pub fn maintenance_schedule(equipment_json: &str) -> Result<String, JsValue> {
    maintenance_schedule_at(equipment_json, js_sys::Date::now())
}

/// Pending and in-process loads with priority and wait at `now_ms`
#[wasm_bindgen]
pub fn processing_queue_at(loads_json: &str, now_ms: f64) -> Result<String, JsValue> {
    timestamp(now_ms)
        .and_then(|now| queue(loads_json, now))
        .map_err(js_err)
}

/// Share of element checks within tolerance across loads
#[wasm_bindgen]
pub fn quality_status(loads_json: &str) -> Result<String, JsValue> {
    quality(loads_json).map_err(js_err)
}
