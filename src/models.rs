use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub date: NaiveDate,
    pub carried_over: f64,
    pub pallets_delivered: f64,
    pub remaining_pallets: f64,
    pub pallets_processed: f64,
    pub cartons_processed: f64,
    pub cph: f64,
    pub zph: f64,
    pub hours_worked: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub submission_history: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct PalletsRequest {
    pub carried_over: f64,
    pub delivered: f64,
    pub remaining: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PalletsResponse {
    pub pallets_processed: f64,
    pub cartons_processed: f64,
}

#[derive(Debug, Deserialize)]
pub struct CphRequest {
    pub cartons_processed: f64,
    pub hours_worked: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CphResponse {
    pub cph: f64,
}

#[derive(Debug, Deserialize)]
pub struct ZphRequest {
    pub z_racks: f64,
    pub hours_hanging: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZphResponse {
    pub zph: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub date: Option<String>,
    pub carried_over: f64,
    pub delivered: f64,
    pub remaining: f64,
    pub hours_worked: f64,
    pub z_racks: f64,
    pub hours_hanging: f64,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Created,
    Replaced,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub status: SubmissionStatus,
    pub entry: Entry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConflictResponse {
    pub message: String,
    pub existing: Entry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Date,
    #[default]
    Timestamp,
    CarriedOver,
    PalletsDelivered,
    RemainingPallets,
    PalletsProcessed,
    CartonsProcessed,
    Cph,
    Zph,
    HoursWorked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CarriedOver,
    PalletsDelivered,
    RemainingPallets,
    PalletsProcessed,
    CartonsProcessed,
    #[default]
    Cph,
    Zph,
    HoursWorked,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub order: SortOrder,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub metric: Metric,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub metric: Metric,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub cartons_processed: Option<f64>,
    pub cph: Option<f64>,
    pub zph: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub entries: u8,
    pub pallets_processed: f64,
    pub cartons_processed: f64,
    pub hours_worked: f64,
    pub cph: Option<f64>,
    pub avg_zph: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weekly: Vec<WeeklyPoint>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub fallback: bool,
}
