//! Tuition fee rules

use shared::{ErpError, Result, TuitionPayment, UserProfile, TUITION_FEE};

/// "₹85000.00"
pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// Payment body for a student who still owes the tuition fee
pub fn tuition_payment(profile: &UserProfile) -> Result<TuitionPayment> {
    if profile.has_paid_fees() {
        return Err(ErpError::Validation(
            "Your tuition fee for the current academic year has been paid.".to_string(),
        ));
    }
    Ok(TuitionPayment { amount: TUITION_FEE })
}
