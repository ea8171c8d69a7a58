//! 通过完整路由表驱动的端到端测试（内存 SQLite + Moka 缓存）

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use schoolsync::cache::ObjectCache;
use schoolsync::cache::object_cache::moka::MokaCacheWrapper;
use schoolsync::routes;
use schoolsync::models::users::{entities::UserRole, requests::CreateUserRequest};
use schoolsync::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use schoolsync::utils::password::hash_password;
use schoolsync::utils::{json_error_handler, query_error_handler};

// 限流按 IP 计数，每个请求使用不同的来源地址
static NEXT_IP: AtomicU8 = AtomicU8::new(1);

fn client_ip() -> String {
    format!("198.51.100.{}", NEXT_IP.fetch_add(1, Ordering::Relaxed))
}

async fn test_storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory storage"),
    )
}

macro_rules! init_app {
    ($storage:expr) => {{
        let cache: Arc<dyn ObjectCache> =
            Arc::new(MokaCacheWrapper::new().expect("moka cache"));
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(cache))
                .configure(routes::configure_api_routes)
                .configure(routes::configure_frontend_routes),
        )
        .await
    }};
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> test::TestRequest {
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(body);
    match token {
        Some(token) => req.insert_header(("Authorization", format!("Bearer {token}"))),
        None => req,
    }
}

fn put_json(uri: &str, token: &str, body: Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(uri)
        .insert_header(("X-Forwarded-For", client_ip()))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(body)
}

async fn seed_admin(storage: &Arc<dyn Storage>) {
    storage
        .create_user(CreateUserRequest {
            username: "principal".to_string(),
            email: "principal@school.edu.in".to_string(),
            phone: None,
            password: hash_password("Admin#Pass9").unwrap(),
            role: UserRole::Admin,
        })
        .await
        .unwrap();
}

/// 调用接口并解析 JSON 响应
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

/// 注册并返回 (access token, 响应 data)
macro_rules! register {
    ($app:expr, $body:expr) => {{
        let (status, body) = call_json!($app, post_json("/api/auth/register", None, $body));
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["data"]["accessToken"].as_str().unwrap().to_string(),
            body["data"].clone(),
        )
    }};
}

macro_rules! login {
    ($app:expr, $username:expr, $password:expr) => {{
        let (status, body) = call_json!(
            $app,
            post_json(
                "/api/auth/login",
                None,
                json!({ "username": $username, "password": $password }),
            )
        );
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["accessToken"].as_str().unwrap().to_string()
    }};
}

fn get(uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-Forwarded-For", client_ip()))
        .insert_header(("Authorization", format!("Bearer {token}")))
}

#[actix_web::test]
async fn test_register_login_attendance_and_results() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    // 注册教师
    let resp = test::call_service(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "username": "meera.iyer",
                "email": "meera@school.edu.in",
                "password": "Teach#Pass1",
                "role": "Teacher",
                "subject": "Mathematics"
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert!(body["data"]["teacherId"].is_i64());

    // 注册学生
    let resp = test::call_service(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "username": "arjun.k",
                "email": "arjun@school.edu.in",
                "password": "Stud#Pass1",
                "role": "Student",
                "phone": "9876543210",
                "rollNo": "2501",
                "className": "10-A"
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let student_token = body["data"]["accessToken"].as_str().unwrap().to_string();
    let student_id = body["data"]["studentId"].as_i64().unwrap();
    let student_user_id = body["data"]["user"]["id"].as_i64().unwrap();

    // 同一学号再次注册
    let resp = test::call_service(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "username": "arjun.dup",
                "email": "arjun.dup@school.edu.in",
                "password": "Stud#Pass1",
                "role": "Student",
                "rollNo": "2501",
                "className": "10-A"
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 教师使用邮箱登录
    let resp = test::call_service(
        &app,
        post_json(
            "/api/auth/login",
            None,
            json!({ "username": "meera@school.edu.in", "password": "Teach#Pass1" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let teacher_token = body["data"]["accessToken"].as_str().unwrap().to_string();

    // 学生不能查看全部考勤
    let resp = test::call_service(&app, get("/api/attendance/all", &student_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 考勤只能提交一次
    let mark = json!({ "studentId": student_id, "date": "2025-07-14", "status": "Absent" });
    let resp = test::call_service(
        &app,
        post_json("/api/attendance/mark", Some(&teacher_token), mark.clone()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        post_json("/api/attendance/mark", Some(&teacher_token), mark).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Attendance already marked for this student on this date"
    );

    let resp = test::call_service(
        &app,
        post_json(
            "/api/attendance/mark-bulk",
            Some(&teacher_token),
            json!({
                "date": "2025-07-14",
                "records": [{ "studentId": student_id, "status": "Present" }]
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        get(
            "/api/attendance/status?date=2025-07-14&className=10-A",
            &teacher_token,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["submitted"], true);

    // 缺勤会给学生发送站内通知
    let resp = test::call_service(
        &app,
        get(
            &format!("/api/notifications/unread-count/{student_user_id}"),
            &student_token,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["count"], 1);

    // 上传成绩并计算等级
    let result = json!({
        "studentId": student_id,
        "subject": "Mathematics",
        "marks": 92,
        "examType": "Final",
        "academicYear": "2025-26"
    });
    let resp = test::call_service(
        &app,
        post_json("/api/result/upload", Some(&teacher_token), result.clone()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["grade"], "A+");
    assert_eq!(body["data"]["uploadedBy"], "meera.iyer");

    let resp = test::call_service(
        &app,
        post_json("/api/result/upload", Some(&teacher_token), result).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 学生只能看到自己的成绩
    let resp = test::call_service(
        &app,
        get(&format!("/api/result/student/{student_id}"), &student_token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 1);

    let resp = test::call_service(
        &app,
        get(&format!("/api/result/student/{}", student_id + 100), &student_token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_self_registration_refused() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        post_json(
            "/api/auth/register",
            None,
            json!({
                "username": "sneaky",
                "email": "sneaky@school.edu.in",
                "password": "Admin#Pass1",
                "role": "Admin"
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(storage.count_users().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_missing_token_and_unknown_api_path() {
    let storage = test_storage().await;
    let app = init_app!(storage);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/auth/me").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        get("/api/attendance/all", "not-a-token").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 未知 API 路径返回 JSON 404 而不是 SPA 页面
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/does-not-exist").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1004);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/auth/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_fee_payment_checkout_and_receipt() {
    let storage = test_storage().await;
    seed_admin(&storage).await;
    let app = init_app!(storage);

    let admin_token = login!(app, "principal", "Admin#Pass9");
    let (teacher_token, _) = register!(
        app,
        json!({
            "username": "ravi.t",
            "email": "ravi.t@school.edu.in",
            "password": "Teach#Pass1",
            "role": "Teacher"
        })
    );
    let (student_token, student) = register!(
        app,
        json!({
            "username": "kavya.s",
            "email": "kavya@school.edu.in",
            "password": "Stud#Pass1",
            "role": "Student",
            "rollNo": "2511",
            "className": "9-B"
        })
    );
    let student_id = student["studentId"].as_i64().unwrap();

    let new_fee = json!({
        "studentId": student_id,
        "feeType": "Tuition",
        "amount": 1500.5,
        "dueDate": "2099-04-30"
    });
    let (status, body) = call_json!(
        app,
        post_json("/api/studentmanagement/fee", Some(&admin_token), new_fee.clone())
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "Pending");
    let fee_id = body["data"]["id"].as_i64().unwrap();

    // 教师不能查看学生费用
    let resp = test::call_service(
        &app,
        get(&format!("/api/studentmanagement/fee/student/{student_id}"), &teacher_token)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let (status, body) = call_json!(
        app,
        get(&format!("/api/studentmanagement/fee/student/{student_id}"), &student_token)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    // 未配置支付网关
    let (status, body) = call_json!(
        app,
        get(&format!("/api/studentmanagement/fee/checkout/{fee_id}"), &student_token)
    );
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 4203);

    // 未缴费不能下载收据
    let (status, body) = call_json!(
        app,
        get(&format!("/api/studentmanagement/fee/receipt/{fee_id}"), &student_token)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4202);

    let (status, body) = call_json!(
        app,
        put_json(
            &format!("/api/studentmanagement/fee/pay/{fee_id}"),
            &student_token,
            json!({ "transactionId": "pay_GW1" }),
        )
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "Paid");
    assert_eq!(body["data"]["paymentMethod"], "Online");
    assert_eq!(body["data"]["transactionId"], "pay_GW1");
    assert!(
        body["data"]["receiptNumber"]
            .as_str()
            .unwrap()
            .starts_with(&format!("RCP-{fee_id}-"))
    );

    // 重复缴费
    let (status, body) = call_json!(
        app,
        put_json(
            &format!("/api/studentmanagement/fee/pay/{fee_id}"),
            &student_token,
            json!({ "transactionId": "pay_GW2" }),
        )
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4201);

    let (status, body) = call_json!(
        app,
        get(&format!("/api/studentmanagement/fee/checkout/{fee_id}"), &student_token)
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4201);

    let resp = test::call_service(
        &app,
        get(&format!("/api/studentmanagement/fee/receipt/{fee_id}"), &student_token)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert!(
        headers.get("content-type").unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    let disposition = headers.get("content-disposition").unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&format!("fee-receipt-{fee_id}.txt")));
    let receipt = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(receipt.contains("FEE PAYMENT RECEIPT"));
    assert!(receipt.contains("pay_GW1"));

    // 同时提交两笔缴费，只有一笔生效
    let (_, body) = call_json!(
        app,
        post_json("/api/studentmanagement/fee", Some(&admin_token), new_fee)
    );
    let second_fee = body["data"]["id"].as_i64().unwrap();
    let pay_uri = format!("/api/studentmanagement/fee/pay/{second_fee}");
    let (first, second) = futures_util::join!(
        test::call_service(
            &app,
            put_json(&pay_uri, &student_token, json!({ "transactionId": "GW-A" })).to_request(),
        ),
        test::call_service(
            &app,
            put_json(&pay_uri, &student_token, json!({ "transactionId": "GW-B" })).to_request(),
        ),
    );
    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    // 删除学生后旧 token 立即失效
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/user/students/{student_id}"))
            .insert_header(("Authorization", format!("Bearer {admin_token}")))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, get("/api/auth/me", &student_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admission_approval_assigns_roll_number_once() {
    let storage = test_storage().await;
    seed_admin(&storage).await;
    let app = init_app!(storage);
    let admin_token = login!(app, "principal", "Admin#Pass9");

    let (status, body) = call_json!(
        app,
        post_json(
            "/api/admission/apply",
            None,
            json!({
                "firstName": "Asha",
                "lastName": "Verma",
                "dateOfBirth": "2015-05-10",
                "gender": "Female",
                "email": "asha.parent@example.com",
                "phone": "9876543210",
                "address": "12 MG Road, Near City Park",
                "city": "Pune",
                "state": "Maharashtra",
                "pincode": "411001",
                "appliedClass": "5",
                "academicYear": "2025-2026",
                "fatherName": "Rakesh Verma",
                "motherName": "Sunita Verma",
                "previousMarks": 88
            }),
        )
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert!(body["data"]["applicationNumber"].as_str().unwrap().starts_with("APP"));
    let id = body["data"]["id"].as_i64().unwrap();

    // 管理接口需要登录
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/admission/all").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (status, body) = call_json!(
        app,
        put_json(
            &format!("/api/admission/{id}/status"),
            &admin_token,
            json!({ "status": "Approved" }),
        )
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    let roll = body["data"]["rollNumber"].as_str().unwrap().to_string();
    let year = chrono::Utc::now().date_naive().format("%y").to_string();
    assert_eq!(roll, format!("{year}01"));

    // 再次批准不会重新分配学号
    let (status, body) = call_json!(
        app,
        put_json(
            &format!("/api/admission/{id}/status"),
            &admin_token,
            json!({ "status": "Approved", "remarks": "Documents verified" }),
        )
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rollNumber"], roll.as_str());
    assert_eq!(body["data"]["remarks"], "Documents verified");

    let (status, body) = call_json!(
        app,
        test::TestRequest::get()
            .uri("/api/admission/check-status?email=asha.parent@example.com")
            .insert_header(("X-Forwarded-For", client_ip()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Approved");
    assert_eq!(body["data"]["rollNumber"], roll.as_str());
}

#[actix_web::test]
async fn test_statistics_without_results_are_zeroed() {
    let storage = test_storage().await;
    let app = init_app!(storage);
    let (teacher_token, _) = register!(
        app,
        json!({
            "username": "nisha.t",
            "email": "nisha.t@school.edu.in",
            "password": "Teach#Pass1",
            "role": "Teacher"
        })
    );

    let (status, body) = call_json!(app, get("/api/result/statistics/10-A", &teacher_token));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalResults"], 0);
    assert_eq!(body["data"]["averagePercentage"], 0.0);
    assert_eq!(body["data"]["gradeDistribution"], json!({}));
}
