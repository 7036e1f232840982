use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entities::LoanStatus;
use crate::error::{AppError, AppResult};

/// Raw `POST /loans` form. Numbers arrive as text so a typo becomes a
/// validation notice instead of a rejected request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanForm {
    pub customer_id: String,
    pub amount: String,
    pub duration: String,
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub interest_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub customer_id: i64,
    pub amount: f64,
    pub duration: i64,
    pub loan_type: Option<String>,
    pub interest_rate: f64,
}

impl NewLoan {
    pub fn validate(&self) -> AppResult<()> {
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(AppError::ValidationError(
                "Amount must be positive".to_string(),
            ));
        }
        if self.duration <= 0 {
            return Err(AppError::ValidationError(
                "Duration must be positive".to_string(),
            ));
        }
        if !(self.interest_rate.is_finite() && self.interest_rate >= 0.0) {
            return Err(AppError::ValidationError(
                "Interest rate cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<LoanForm> for NewLoan {
    type Error = AppError;

    fn try_from(form: LoanForm) -> AppResult<Self> {
        let customer_id = form
            .customer_id
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::ValidationError("Please select a customer".to_string()))?;
        let amount = form
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::ValidationError("Amount must be a number".to_string()))?;
        let duration = form
            .duration
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::ValidationError("Duration must be a whole number".to_string()))?;
        let interest_rate = match form.interest_rate.as_deref().map(str::trim) {
            None | Some("") => 0.0,
            Some(rate) => rate.parse::<f64>().map_err(|_| {
                AppError::ValidationError("Interest rate must be a number".to_string())
            })?,
        };
        let loan_type = form
            .loan_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            customer_id,
            amount,
            duration,
            loan_type,
            interest_rate,
        })
    }
}

/// Loan joined to its customer, nullable columns already coalesced.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, PartialEq)]
pub struct LoanWithCustomer {
    pub id: i64,
    pub customer_name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub duration: i64,
    pub status: LoanStatus,
    pub loan_type: String,
    pub interest_rate: f64,
    pub collateral: String,
}

impl LoanWithCustomer {
    /// Principal plus flat interest: `amount * (1 + rate / 100)`.
    pub fn outstanding(&self) -> f64 {
        outstanding_balance(self.amount, self.interest_rate)
    }
}

pub fn outstanding_balance(amount: f64, interest_rate: f64) -> f64 {
    amount * (1.0 + interest_rate / 100.0)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub customer_count: u64,
    pub active_loan_count: u64,
    pub total_outstanding: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportBreakdown {
    pub paid: Vec<LoanWithCustomer>,
    pub unpaid: Vec<LoanWithCustomer>,
}
