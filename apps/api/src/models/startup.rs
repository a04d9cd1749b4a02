use thiserror::Error;

use crate::table::Row;

pub const COL_NAME: &str = "Startup_Name";
pub const COL_FOUNDED: &str = "Founded_Year";
pub const COL_COUNTRY: &str = "Country";
pub const COL_INDUSTRY: &str = "Industry";
pub const COL_FUNDING_STAGE: &str = "Funding_Stage";
pub const COL_FUNDING: &str = "Total_Funding_$M";
pub const COL_EMPLOYEES: &str = "Number_of_Employees";
pub const COL_REVENUE: &str = "Annual_Revenue_$M";
pub const COL_VALUATION: &str = "Valuation_$B";
pub const COL_CUSTOMER_BASE: &str = "Customer_Base_Millions";
pub const COL_TECH_STACK: &str = "Tech_Stack";
pub const COL_FOLLOWERS: &str = "Social_Media_Followers";

/// The twelve columns an uploaded CSV must carry, in the order shown to users.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    COL_NAME,
    COL_FOUNDED,
    COL_COUNTRY,
    COL_INDUSTRY,
    COL_FUNDING_STAGE,
    COL_FUNDING,
    COL_EMPLOYEES,
    COL_REVENUE,
    COL_VALUATION,
    COL_CUSTOMER_BASE,
    COL_TECH_STACK,
    COL_FOLLOWERS,
];

/// Why a row could not be turned into a [`StartupRecord`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    #[error("missing field '{column}'")]
    MissingField { column: &'static str },

    #[error("invalid number '{value}' in column '{column}'")]
    InvalidNumber { column: &'static str, value: String },
}

/// One row of startup attributes, typed for the pitch template.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupRecord {
    pub name: String,
    pub founded: i64,
    pub country: String,
    pub industry: String,
    pub funding_stage: String,
    /// Total funding, millions USD.
    pub funding: f64,
    pub employees: i64,
    /// Annual revenue, millions USD.
    pub revenue: f64,
    /// Valuation, billions USD.
    pub valuation: f64,
    /// Customer base, millions.
    pub customer_base: f64,
    pub tech_stack: String,
    pub followers: i64,
}

impl StartupRecord {
    /// Reads the twelve fields out of a table row. Absent columns, short rows
    /// and blank cells all count as missing.
    pub fn from_row(row: &Row<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            name: text(row, COL_NAME)?,
            founded: integer(row, COL_FOUNDED)?,
            country: text(row, COL_COUNTRY)?,
            industry: text(row, COL_INDUSTRY)?,
            funding_stage: text(row, COL_FUNDING_STAGE)?,
            funding: decimal(row, COL_FUNDING)?,
            employees: integer(row, COL_EMPLOYEES)?,
            revenue: decimal(row, COL_REVENUE)?,
            valuation: decimal(row, COL_VALUATION)?,
            customer_base: decimal(row, COL_CUSTOMER_BASE)?,
            tech_stack: text(row, COL_TECH_STACK)?,
            followers: integer(row, COL_FOLLOWERS)?,
        })
    }
}

fn text(row: &Row<'_>, column: &'static str) -> Result<String, RecordError> {
    row.get(column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(RecordError::MissingField { column })
}

fn decimal(row: &Row<'_>, column: &'static str) -> Result<f64, RecordError> {
    let raw = text(row, column)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecordError::InvalidNumber { column, value: raw }),
    }
}

/// Integers also accept integral decimals like `2020.0`, which spreadsheet
/// exports write for integer columns that contain a blank somewhere.
fn integer(row: &Row<'_>, column: &'static str) -> Result<i64, RecordError> {
    let raw = text(row, column)?;
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 => {
            Ok(value as i64)
        }
        _ => Err(RecordError::InvalidNumber { column, value: raw }),
    }
}
