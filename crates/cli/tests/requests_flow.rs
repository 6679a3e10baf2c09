//! Request shapes sent by the hostel, admissions, student and public commands

mod support;

use axum::http::Method;
use cli::commands::hostel::HostelSubcommand;
use cli::commands::staff::AdmissionsSubcommand;
use cli::commands::{
    AdmissionsCommand, ApplyCommand, HostelCommand, PayFeeCommand, ReceiptCommand, ResultCommand, TrackCommand,
};
use serde_json::json;
use shared::ExamType;
use support::{account, anonymous, serve, signed_in, Reply};

fn rooms(capacity: u32) -> Reply {
    Reply::Json(json!([
        { "id": 7, "roomNumber": "H-101", "roomType": "DOUBLE_SHARING", "capacity": capacity, "fee": 40000.0 }
    ]))
}

fn hostel_admin() -> Vec<(Method, &'static str, Reply)> {
    account(
        "ROLE_HOSTEL_ADMIN",
        json!({ "userId": 3, "fullName": "Hari", "email": "hari@example.edu", "role": "ROLE_HOSTEL_ADMIN" }),
    )
}

fn student(fee_paid: bool) -> Vec<(Method, &'static str, Reply)> {
    account(
        "ROLE_STUDENT",
        json!({
            "userId": 40, "fullName": "Asha Rao", "email": "asha@example.edu",
            "role": "ROLE_STUDENT", "feePaid": fee_paid
        }),
    )
}

// ============== Hostel Tests ==============

#[tokio::test]
async fn test_hostel_approve_sends_room_id() {
    let mut replies = hostel_admin();
    replies.push((Method::GET, "/api/hostel-staff/rooms", rooms(2)));
    replies.push((Method::POST, "/api/hostel-staff/registrations/5/approve", Reply::Text("Room allotted")));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    let cmd = HostelCommand {
        command: HostelSubcommand::Approve { registration: "5".to_string(), room: "7".to_string() },
    };
    cmd.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::POST, "/api/hostel-staff/registrations/5/approve");
    assert_eq!(request.body, json!({ "roomId": 7 }));
}

#[tokio::test]
async fn test_hostel_change_room_sends_new_room_id() {
    let mut replies = hostel_admin();
    replies.push((Method::GET, "/api/hostel-staff/rooms", rooms(1)));
    replies.push((Method::PUT, "/api/hostel-staff/registrations/5/change-room", Reply::Text("Room changed")));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    let cmd = HostelCommand {
        command: HostelSubcommand::ChangeRoom { registration: "5".to_string(), room: "7".to_string() },
    };
    cmd.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::PUT, "/api/hostel-staff/registrations/5/change-room");
    assert_eq!(request.body, json!({ "newRoomId": 7 }));
}

#[tokio::test]
async fn test_hostel_full_room_is_not_sent() {
    let mut replies = hostel_admin();
    replies.push((Method::GET, "/api/hostel-staff/rooms", rooms(0)));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    let cmd = HostelCommand {
        command: HostelSubcommand::Approve { registration: "5".to_string(), room: "7".to_string() },
    };
    let err = cmd.run(&mut ctx).await.unwrap_err();
    assert_eq!(err.to_string(), "Room 7 has no free beds");
    assert!(backend.sent(Method::POST, "/api/hostel-staff/registrations/5/approve").is_empty());
}

// ============== Admissions Tests ==============

fn admissions_staff() -> Vec<(Method, &'static str, Reply)> {
    account(
        "ROLE_ADMISSIONS_STAFF",
        json!({ "userId": 8, "fullName": "Nisha", "email": "nisha@example.edu", "role": "ROLE_ADMISSIONS_STAFF" }),
    )
}

#[tokio::test]
async fn test_admissions_approve() {
    let mut replies = admissions_staff();
    replies.push((Method::POST, "/api/staff/admissions/11/approve", Reply::Text("Application approved")));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    let cmd = AdmissionsCommand { command: AdmissionsSubcommand::Approve { id: "11".to_string() } };
    cmd.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::POST, "/api/staff/admissions/11/approve");
    assert_eq!(request.body, json!({}));
}

#[tokio::test]
async fn test_admissions_register_sends_mentor() {
    let mut replies = admissions_staff();
    replies.push((
        Method::POST,
        "/api/staff/admissions/11/register-student",
        Reply::Json(json!({ "fullName": "Asha Rao", "rollNumber": "CS24001", "password": "Tmp#4411" })),
    ));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    let cmd = AdmissionsCommand {
        command: AdmissionsSubcommand::Register { id: "11".to_string(), mentor: Some("t-4".to_string()) },
    };
    cmd.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::POST, "/api/staff/admissions/11/register-student");
    assert_eq!(request.body, json!({ "mentorId": "t-4" }));
    assert!(backend.sent(Method::GET, "/api/master/teachers").is_empty());
}

// ============== Student Tests ==============

#[tokio::test]
async fn test_pay_fee_sends_tuition_amount() {
    let mut replies = student(false);
    replies.push((Method::POST, "/api/student/tuition/pay", Reply::Text("Payment successful")));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    PayFeeCommand { yes: true }.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::POST, "/api/student/tuition/pay");
    assert_eq!(request.body, json!({ "amount": 85000.0 }));
}

#[tokio::test]
async fn test_pay_fee_skipped_when_paid() {
    let backend = serve(student(true)).await;
    let mut ctx = signed_in(&backend).await;

    PayFeeCommand { yes: true }.run(&mut ctx).await.unwrap();
    assert!(backend.sent(Method::POST, "/api/student/tuition/pay").is_empty());
}

#[tokio::test]
async fn test_result_asks_for_exam_type() {
    let mut replies = student(true);
    replies.push((
        Method::GET,
        "/api/student/result",
        Reply::Json(json!({
            "studentName": "Asha Rao",
            "subjectResults": [{ "subjectName": "DBMS", "marksObtained": 81, "totalMarks": 100 }]
        })),
    ));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;

    ResultCommand { exam: ExamType::MidTerm }.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::GET, "/api/student/result");
    assert_eq!(request.query.as_deref(), Some("examType=MID_TERM"));
}

#[tokio::test]
async fn test_receipt_saved_to_file() {
    let mut replies = student(true);
    replies.push((Method::GET, "/api/student/receipts/9", Reply::Bytes(b"%PDF-1.4 receipt")));
    let backend = serve(replies).await;
    let mut ctx = signed_in(&backend).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("receipt.pdf");

    ReceiptCommand { id: "9".to_string(), out: Some(out.clone()) }.run(&mut ctx).await.unwrap();

    assert_eq!(std::fs::read(&out).unwrap(), b"%PDF-1.4 receipt");
    backend.only(Method::GET, "/api/student/receipts/9");
}

// ============== Public Admissions Tests ==============

fn application(status: &str) -> Reply {
    Reply::Json(json!({
        "applicationId": 11,
        "applicantName": "Asha Rao",
        "applicantEmail": "asha@example.edu",
        "status": status
    }))
}

#[tokio::test]
async fn test_apply_posts_form() {
    let backend = serve(vec![(Method::POST, "/api/public/admissions/apply", Reply::Text("Application submitted"))]).await;
    let mut ctx = anonymous(&backend);
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("form.yaml");
    std::fs::write(
        &file,
        "applicantName: Asha Rao\napplicantEmail: asha@example.edu\ncontactNumber: '9876543210'\npreviousEducationDetails: HSC 92%\napplyingClassId: 4\n",
    )
    .unwrap();

    ApplyCommand { file }.run(&mut ctx).await.unwrap();

    let request = backend.only(Method::POST, "/api/public/admissions/apply");
    assert_eq!(request.body["applicantName"], "Asha Rao");
    assert_eq!(request.body["applyingClassId"], 4);
    assert_eq!(request.body["wantsHostel"], false);
}

#[tokio::test]
async fn test_track_then_finalize() {
    let backend = serve(vec![
        (Method::GET, "/api/public/admissions/status", application("APPROVED")),
        (Method::POST, "/api/public/admissions/11/finalize", Reply::Text("Admission finalized")),
    ])
    .await;
    let mut ctx = anonymous(&backend);

    TrackCommand { email: " asha@example.edu ".to_string(), accept: true }.run(&mut ctx).await.unwrap();

    let status = backend.only(Method::GET, "/api/public/admissions/status");
    assert_eq!(status.query.as_deref(), Some("email=asha%40example.edu"));
    backend.only(Method::POST, "/api/public/admissions/11/finalize");
}

#[tokio::test]
async fn test_track_pending_does_not_finalize() {
    let backend = serve(vec![(Method::GET, "/api/public/admissions/status", application("PENDING"))]).await;
    let mut ctx = anonymous(&backend);

    TrackCommand { email: "asha@example.edu".to_string(), accept: true }.run(&mut ctx).await.unwrap();
    assert!(backend.sent(Method::POST, "/api/public/admissions/11/finalize").is_empty());
}
