//! `/api/student/*` - a student's own records

use crate::client::ApiClient;
use reqwest::Method;
use shared::{
    AttendanceRecord, EnrolledCourse, EntityId, ExamType, PaymentTransaction, Result, ResultSheet, TimetableSlot,
    TuitionPayment,
};

pub const ATTENDANCE: &str = "/api/student/attendance/me";
pub const RESULT: &str = "/api/student/result";
pub const COURSES: &str = "/api/student/my-courses";
pub const TIMETABLE: &str = "/api/student/timetable/me";
pub const PAYMENTS: &str = "/api/student/payments";
pub const TUITION_PAY: &str = "/api/student/tuition/pay";

impl ApiClient {
    pub async fn my_attendance(&self) -> Result<Vec<AttendanceRecord>> {
        self.get_json(ATTENDANCE).await
    }

    pub async fn my_result(&self, exam: ExamType) -> Result<ResultSheet> {
        let request = self
            .authed(Method::GET, RESULT)?
            .query(&[("examType", exam.as_str())]);
        self.send_json(RESULT, request).await
    }

    pub async fn my_courses(&self) -> Result<Vec<EnrolledCourse>> {
        self.get_json(COURSES).await
    }

    pub async fn student_timetable(&self) -> Result<Vec<TimetableSlot>> {
        self.get_json(TIMETABLE).await
    }

    pub async fn payments(&self) -> Result<Vec<PaymentTransaction>> {
        self.get_json(PAYMENTS).await
    }

    /// Receipt document (PDF) for one transaction
    pub async fn receipt(&self, transaction_id: &EntityId) -> Result<Vec<u8>> {
        let path = format!("/api/student/receipts/{}", transaction_id);
        let request = self.authed(Method::GET, &path)?;
        let response = self.send(&path, request).await?;
        let bytes = response.bytes().await.map_err(crate::client::transport)?;
        Ok(bytes.to_vec())
    }

    pub async fn pay_tuition(&self, payment: &TuitionPayment) -> Result<String> {
        self.post_text(TUITION_PAY, payment).await
    }
}
