//! HTTP API integration tests
//!
//! Drives the assembled axum router end to end: authorization gate,
//! order endpoints, CRUD plumbing, upload round trip.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use petmall_server::db::models::Role;
use petmall_server::db::repository::UserRepository;
use petmall_server::{Config, ServerState, build_router};

async fn setup() -> (TempDir, ServerState, Router) {
    let dir = tempfile::tempdir().expect("tempdir");
    let work_dir = dir.path().to_str().expect("utf-8 path").to_string();
    let config = Config::with_overrides(work_dir, 0);
    let state = ServerState::initialize(&config).await.expect("state");
    let app = build_router(state.clone());
    (dir, state, app)
}

/// Register an identity with the given role
async fn register(state: &ServerState, openid: &str, role: Role) {
    let repo = UserRepository::new(state.pool());
    repo.create(openid, None, None, None).await.unwrap();
    if role != Role::User {
        repo.update_role(openid, role).await.unwrap();
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

// ========== Authorization gate ==========

#[tokio::test]
async fn protected_namespace_requires_identity_and_role() {
    let (_dir, state, app) = setup().await;
    register(&state, "wx_plain_user", Role::User).await;
    register(&state, "wx_merchant", Role::Merchant).await;
    register(&state, "wx_admin", Role::Admin).await;

    // 无身份头 → 401
    let (status, body) = send(&app, "GET", "/api/merchant/list", &[], None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    // 未注册身份 → 403
    let (status, body) = send(
        &app,
        "GET",
        "/api/merchant/list",
        &[("x-wx-openid", "wx_stranger")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
    assert!(body["message"].as_str().unwrap().contains("not registered"));

    // 普通用户角色 → 403，code 与未注册相同但原因不同
    let (status, body) = send(
        &app,
        "GET",
        "/api/merchant/list",
        &[("x-wx-openid", "wx_plain_user")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
    assert!(body["message"].as_str().unwrap().contains("Insufficient"));

    // merchant / admin → 放行
    for openid in ["wx_merchant", "wx_admin"] {
        let (status, body) = send(
            &app,
            "GET",
            "/api/merchant/list",
            &[("x-wx-openid", openid)],
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{} should pass the gate", openid);
        assert_eq!(body["code"], "E0000");
    }

    // 保护前缀之外不经过门控
    let (status, _) = send(&app, "GET", "/api/cat/list", &[], None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn debug_header_works_only_when_enabled() {
    // development 默认启用调试头
    let (_dir, state, app) = setup().await;
    register(&state, "dbg_merchant", Role::Merchant).await;

    let (status, _) = send(
        &app,
        "GET",
        "/api/merchant/dashboard",
        &[("x-debug-openid", "dbg_merchant")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 生产配置下调试头被忽略
    let dir = tempfile::tempdir().unwrap();
    let work_dir = dir.path().to_str().unwrap().to_string();
    let config = Config {
        database_path: format!("{}/petmall.db", work_dir),
        work_dir,
        http_port: 0,
        environment: "production".to_string(),
        enable_debug_header: false,
    };
    let state = ServerState::initialize(&config).await.unwrap();
    register(&state, "dbg_merchant", Role::Merchant).await;
    let app = build_router(state.clone());

    let (status, body) = send(
        &app,
        "GET",
        "/api/merchant/dashboard",
        &[("x-debug-openid", "dbg_merchant")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    // 正式身份头不受影响
    let (status, _) = send(
        &app,
        "GET",
        "/api/merchant/dashboard",
        &[("x-wx-openid", "dbg_merchant")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn primary_header_takes_precedence_over_debug_header() {
    let (_dir, state, app) = setup().await;
    register(&state, "wx_real", Role::User).await;
    register(&state, "dbg_admin", Role::Admin).await;

    // 两个头都给时以正式头为准：普通用户 → 403
    let (status, _) = send(
        &app,
        "GET",
        "/api/merchant/list",
        &[("x-wx-openid", "wx_real"), ("x-debug-openid", "dbg_admin")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ========== Orders over HTTP ==========

#[tokio::test]
async fn order_flow_over_http() {
    let (_dir, _state, app) = setup().await;

    // 创建订单，身份来自请求头
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/create",
        &[("x-wx-openid", "openid_buyer")],
        Some(json!({
            "itemsJson": "[{\"id\":1,\"qty\":1}]",
            "addressSnapshot": "{\"name\":\"李四\"}",
            "totalAmount": 99.99
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {:?}", body);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["userId"], "openid_buyer");
    let order_id = body["data"]["id"].as_i64().unwrap();

    // pending → paid
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/status",
        &[],
        Some(json!({"id": order_id, "status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status updated");
    assert_eq!(body["data"]["status"], "paid");

    // 重复 paid → 幂等空操作
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/status",
        &[],
        Some(json!({"id": order_id, "status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status unchanged");

    // paid → pending 非法回退：422，消息点名两端
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/status",
        &[],
        Some(json!({"id": order_id, "status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0008");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("paid") && message.contains("pending"), "{}", message);

    // 未知状态字符串：400
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/status",
        &[],
        Some(json!({"id": order_id, "status": "refunded"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0007");

    // 运单号独立于状态
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/tracking",
        &[],
        Some(json!({"id": order_id, "trackingNumber": "SF123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["trackingNumber"], "SF123");

    // 详情
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/order/detail/{}", order_id),
        &[],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "paid");

    // 用户订单列表（头部身份）+ 状态过滤
    let (status, body) = send(
        &app,
        "GET",
        "/api/order/user/list",
        &[("x-wx-openid", "openid_buyer")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "GET",
        "/api/order/user/list?status=cancelled",
        &[("x-wx-openid", "openid_buyer")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    // 查询参数身份回退
    let (status, body) = send(
        &app,
        "GET",
        "/api/order/user/list?userId=openid_buyer",
        &[],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // 商家订单列表（当前返回全部订单，不在保护前缀下）
    let (status, body) = send(&app, "GET", "/api/order/merchant/list", &[], None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn order_create_rejects_bad_input() {
    let (_dir, _state, app) = setup().await;

    // 金额必须为正
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/create",
        &[("x-wx-openid", "openid_buyer")],
        Some(json!({
            "itemsJson": "[]",
            "addressSnapshot": "{}",
            "totalAmount": 0.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // 头和 body 都没有身份
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/create",
        &[],
        Some(json!({
            "itemsJson": "[]",
            "addressSnapshot": "{}",
            "totalAmount": 10.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("identity"));

    // body 里的 userId 可以兜底
    let (status, body) = send(
        &app,
        "POST",
        "/api/order/create",
        &[],
        Some(json!({
            "itemsJson": "[]",
            "addressSnapshot": "{}",
            "totalAmount": 10.0,
            "userId": "openid_from_body"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "openid_from_body");
}

#[tokio::test]
async fn order_detail_missing_is_404() {
    let (_dir, _state, app) = setup().await;
    let (status, body) = send(&app, "GET", "/api/order/detail/999", &[], None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

// ========== Login ==========

#[tokio::test]
async fn login_registers_once_and_reuses_the_identity() {
    let (_dir, _state, app) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        &[],
        Some(json!({"phone": "13800138000", "code": "123456"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["openid"], "openid_13800138000");
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["token"], "openid_13800138000");
    let first_user_id = body["data"]["userInfo"]["id"].as_i64().unwrap();

    // 再次登录不重复注册
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        &[],
        Some(json!({"phone": "13800138000", "code": "123456"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userInfo"]["id"].as_i64().unwrap(), first_user_id);
}

// ========== CRUD plumbing ==========

#[tokio::test]
async fn pet_crud_round_trip() {
    let (_dir, _state, app) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/cat/add",
        &[],
        Some(json!({
            "name": "奶糖",
            "breed": "英短",
            "price": 1500.0,
            "gender": "female"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pet_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "available");

    let (status, body) = send(&app, "GET", "/api/cat/list?page=1&size=10", &[], None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/cat/status",
        &[],
        Some(json!({"id": pet_id, "status": "sold"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "sold");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/cat/detail/{}", pet_id),
        &[],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "奶糖");

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/cat/delete/{}", pet_id),
        &[],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/cat/detail/{}", pet_id),
        &[],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn merchant_dashboard_counts_resources() {
    let (_dir, state, app) = setup().await;
    register(&state, "wx_boss", Role::Merchant).await;

    send(
        &app,
        "POST",
        "/api/cat/add",
        &[],
        Some(json!({"name": "豆豆", "price": 800.0})),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/order/create",
        &[("x-wx-openid", "openid_x")],
        Some(json!({"itemsJson": "[]", "addressSnapshot": "{}", "totalAmount": 5.0})),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/merchant/dashboard",
        &[("x-wx-openid", "wx_boss")],
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pets"], 1);
    assert_eq!(body["data"]["orders"], 1);
    assert_eq!(body["data"]["products"], 0);
}

// ========== Upload ==========

#[tokio::test]
async fn upload_and_read_back() {
    let (_dir, _state, app) = setup().await;

    let boundary = "test-boundary-7349";
    let file_body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"logo.png\"\r\nContent-Type: image/png\r\n\r\nFAKEPNGDATA\r\n--{b}--\r\n",
        b = boundary
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(file_body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let url = body["data"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    // 回读内容一致
    let request = Request::builder()
        .method("GET")
        .uri(&url)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"FAKEPNGDATA");

    // 路径穿越被拒
    let request = Request::builder()
        .method("GET")
        .uri("/uploads/..%2Fpetmall.db")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Health ==========

#[tokio::test]
async fn health_probe() {
    let (_dir, _state, app) = setup().await;
    let (status, body) = send(&app, "GET", "/api/health", &[], None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
