//! Fee payments

use super::id::EntityId;
use serde::{Deserialize, Serialize};

/// Tuition fee charged for the current academic year
pub const TUITION_FEE: f64 = 85_000.00;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    pub id: EntityId,
    pub amount: f64,
    pub payment_date: String,
    pub purpose: String,
}

/// Body of `POST /api/student/tuition/pay`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuitionPayment {
    pub amount: f64,
}

impl Default for TuitionPayment {
    fn default() -> Self {
        Self { amount: TUITION_FEE }
    }
}

/// Sum of all transactions
pub fn total_paid(transactions: &[PaymentTransaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}
