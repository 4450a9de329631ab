//! End-to-end tests that drive the real HTTP client against an in-process
//! mock backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};

use asetrack::clients::{BackendClient, BackendError};
use asetrack::config::BackendConfig;
use asetrack::domain::{AssetId, NotificationId, RecordId, Role, TabelRef};
use asetrack::services::backend::{AssetApi, UserApi};
use asetrack::services::{
    ApprovalError, ApprovalService, DefaultApprovalService, NotificationFeed, SideEffect,
    StepResult, UserError, UserService,
};
use asetrack::session::Session;

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    headers: HashMap<String, String>,
}

#[derive(Default)]
struct Mock {
    seen: Vec<Seen>,
    assets: Vec<Value>,
    pending: Vec<Value>,
    details: HashMap<String, Value>,
    notifications: Vec<Value>,
    created_notifications: Vec<Value>,
    asset_updates: Vec<(String, Value)>,
    rejections: Vec<Value>,
    fail_asset_update: bool,
}

type Shared = Arc<Mutex<Mock>>;

async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let headers = req
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    state.lock().unwrap().seen.push(Seen {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        headers,
    });
    next.run(req).await
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "rahasia123" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Username atau password salah" })),
        )
            .into_response();
    }

    Json(json!({
        "data": {
            "user": {
                "ID": 1,
                "Username": body["username"],
                "Role": "Admin",
                "Beban": "4110, 4120"
            },
            "token": "tok-admin"
        }
    }))
    .into_response()
}

async fn list_assets(State(state): State<Shared>) -> Json<Value> {
    Json(json!({ "data": state.lock().unwrap().assets }))
}

async fn get_asset(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    match state.assets.iter().find(|a| a["AsetId"] == id.as_str()) {
        Some(asset) => Json(json!({ "aset": asset })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Aset tidak ditemukan" })),
        )
            .into_response(),
    }
}

async fn update_asset(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if state.fail_asset_update {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    state.asset_updates.push((id, body));
    StatusCode::OK
}

async fn pending(State(state): State<Shared>) -> Json<Value> {
    Json(json!({ "approvals": state.lock().unwrap().pending }))
}

async fn approval_detail(
    State(state): State<Shared>,
    Path((tabel, id)): Path<(String, String)>,
) -> Response {
    match state.lock().unwrap().details.get(&format!("{tabel}/{id}")) {
        Some(detail) => Json(detail.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn take_pending(state: &mut Mock, tabel: &str, id: &str) -> bool {
    let before = state.pending.len();
    state
        .pending
        .retain(|p| !(p["TabelRef"] == tabel && p["RecordId"].to_string().trim_matches('"') == id));
    state.pending.len() != before
}

async fn approve(
    State(state): State<Shared>,
    Path((tabel, id)): Path<(String, String)>,
) -> Response {
    if take_pending(&mut state.lock().unwrap(), &tabel, &id) {
        Json(json!({ "message": "Disetujui" })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Approval tidak ditemukan" })),
        )
            .into_response()
    }
}

async fn reject(
    State(state): State<Shared>,
    Path((tabel, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if !take_pending(&mut state, &tabel, &id) {
        return StatusCode::NOT_FOUND;
    }
    state.rejections.push(body);
    StatusCode::OK
}

async fn list_notifications(State(state): State<Shared>) -> Json<Value> {
    Json(json!({ "data": { "notifications": state.lock().unwrap().notifications } }))
}

async fn create_notification(State(state): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    state.lock().unwrap().created_notifications.push(body);
    StatusCode::CREATED
}

async fn unread_count(State(state): State<Shared>) -> Json<Value> {
    let count = state
        .lock()
        .unwrap()
        .notifications
        .iter()
        .filter(|n| n["IsRead"] == 0)
        .count();
    Json(json!({ "data": { "count": count } }))
}

async fn mark_read(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut state = state.lock().unwrap();
    match state
        .notifications
        .iter_mut()
        .find(|n| n["ID"].to_string() == id)
    {
        Some(n) => {
            n["IsRead"] = json!(1);
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn mark_all_read(State(state): State<Shared>) -> StatusCode {
    for n in &mut state.lock().unwrap().notifications {
        n["IsRead"] = json!(1);
    }
    StatusCode::OK
}

async fn delete_notification(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut state = state.lock().unwrap();
    let before = state.notifications.len();
    state.notifications.retain(|n| n["ID"].to_string() != id);
    if state.notifications.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn_backend(mock: Mock) -> (Shared, String) {
    let state: Shared = Arc::new(Mutex::new(mock));

    let app = Router::new()
        .route("/user", post(login))
        .route("/aset", get(list_assets))
        .route("/aset/{id}", get(get_asset).put(update_asset))
        .route("/approval/pending", get(pending))
        .route("/approval/{tabel}/{id}", get(approval_detail))
        .route("/approval/{tabel}/{id}/approve", post(approve))
        .route("/approval/{tabel}/{id}/reject", post(reject))
        .route(
            "/notification",
            get(list_notifications).post(create_notification),
        )
        .route("/notification/unread-count", get(unread_count))
        .route("/notification/mark-all-read", put(mark_all_read))
        .route("/notification/{id}", axum::routing::delete(delete_notification))
        .route("/notification/{id}/read", put(mark_read))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    (state, format!("http://{addr}"))
}

fn admin_session() -> Session {
    Session {
        id: Some(RecordId::from(1)),
        username: "admin".to_string(),
        role: Role::Admin,
        token: Some("tok-admin".to_string()),
        beban: vec!["4110".to_string(), "4120".to_string()],
    }
}

fn client(base_url: &str) -> BackendClient {
    let config = BackendConfig {
        base_url: base_url.to_string(),
        ..BackendConfig::default()
    };
    BackendClient::new(&config).expect("client")
}

fn admin_client(base_url: &str) -> Arc<BackendClient> {
    Arc::new(client(base_url).with_session(admin_session()))
}

fn laptop() -> Value {
    json!({
        "AsetId": "AST/2024/001",
        "NamaAset": "Laptop Dell Latitude",
        "Kategori": "Elektronik",
        "nilai_aset": "12,500,000",
        "Status": "Aktif",
        "Beban": "4110"
    })
}

/// Seeds a pending submission plus the admin notification announcing it.
fn submission(mock: &mut Mock, tabel: &str, id: i64, aset: &str, by: &str) {
    mock.pending.push(json!({
        "TabelRef": tabel,
        "RecordId": id,
        "ApprovalStatus": "Pending",
        "CreatedBy": by,
        "AsetId": aset
    }));
    mock.details.insert(
        format!("{tabel}/{id}"),
        json!({ "data": { "aset_id": aset, "created_by": by } }),
    );
    let notification_id = 50 + mock.notifications.len() as i64;
    mock.notifications.push(json!({
        "ID": notification_id,
        "Username": "admin",
        "Type": "approval",
        "TabelRef": tabel,
        "RecordId": id,
        "Message": format!("Pengajuan {tabel} baru"),
        "IsRead": 0
    }));
}

#[tokio::test]
async fn test_login_normalizes_envelope() {
    let (state, url) = spawn_backend(Mock::default()).await;
    let users = UserService::new(Arc::new(client(&url)));

    let session = users.login("admin", "rahasia123").await.unwrap();

    assert_eq!(session.username, "admin");
    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.token.as_deref(), Some("tok-admin"));
    assert_eq!(session.beban, vec!["4110", "4120"]);

    let seen = state.lock().unwrap().seen.clone();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_wrong_password_surfaces_backend_message() {
    let (_state, url) = spawn_backend(Mock::default()).await;

    let err = client(&url).login("admin", "salah").await.unwrap_err();

    match err {
        BackendError::Http { status, message } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "Username atau password salah");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let users = UserService::new(Arc::new(client(&url)));
    assert!(matches!(
        users.login("admin", "salah").await,
        Err(UserError::Backend(_))
    ));
}

#[tokio::test]
async fn test_auth_headers_come_from_session() {
    let (state, url) = spawn_backend(Mock {
        assets: vec![laptop()],
        ..Mock::default()
    })
    .await;

    let assets = admin_client(&url).list_assets().await.unwrap();
    assert_eq!(assets.len(), 1);

    let seen = state.lock().unwrap().seen.clone();
    let headers = &seen[0].headers;
    assert_eq!(headers["authorization"], "Bearer tok-admin");
    assert_eq!(headers["x-role"], "admin");
    assert_eq!(headers["x-username"], "admin");
    assert_eq!(headers["x-beban"], "4110,4120");
}

#[tokio::test]
async fn test_requests_without_session_never_leave_the_client() {
    let (state, url) = spawn_backend(Mock::default()).await;

    let err = client(&url).list_assets().await.unwrap_err();

    assert!(matches!(err, BackendError::NotAuthenticated));
    assert!(state.lock().unwrap().seen.is_empty());
}

#[tokio::test]
async fn test_asset_fields_are_normalized() {
    let (state, url) = spawn_backend(Mock {
        assets: vec![laptop()],
        ..Mock::default()
    })
    .await;

    let asset = admin_client(&url)
        .get_asset(&AssetId::new("AST/2024/001"))
        .await
        .unwrap();

    assert_eq!(asset.nama_aset.as_deref(), Some("Laptop Dell Latitude"));
    assert_eq!(asset.nilai_aset, Some(12_500_000.0));
    assert_eq!(asset.status.map(|s| s.as_str()), Some("aktif"));

    let seen = state.lock().unwrap().seen.clone();
    assert_eq!(seen[0].path, "/aset/AST%2F2024%2F001");
}

#[tokio::test]
async fn test_missing_asset_is_not_found() {
    let (_state, url) = spawn_backend(Mock::default()).await;

    let err = admin_client(&url)
        .get_asset(&AssetId::new("AST/404"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Aset tidak ditemukan"));
}

#[tokio::test]
async fn test_approving_sale_writes_off_asset() {
    let mut mock = Mock {
        assets: vec![laptop()],
        ..Mock::default()
    };
    submission(&mut mock, "dijual", 7, "AST/2024/001", "budi");
    submission(&mut mock, "rusak", 8, "AST/2024/002", "sari");
    let (state, url) = spawn_backend(mock).await;
    let service = DefaultApprovalService::new(admin_client(&url));

    let grouped = service.list_pending_grouped().await.unwrap();
    assert_eq!(grouped[&TabelRef::Dijual].len(), 1);
    assert_eq!(grouped[&TabelRef::Rusak].len(), 1);

    let outcome = service
        .approve(TabelRef::Dijual, &RecordId::from(7))
        .await
        .unwrap();
    assert!(outcome.warnings().is_empty(), "{:?}", outcome.warnings());

    {
        let state = state.lock().unwrap();
        assert_eq!(
            state.asset_updates,
            vec![(
                "AST/2024/001".to_string(),
                json!({ "status": "dijual", "nilaiAset": 0.0 })
            )]
        );

        let created = &state.created_notifications;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0]["username"], "budi");
        assert_eq!(created[0]["type"], "approved");
        assert_eq!(created[0]["tabelRef"], "dijual");

        // Only the announcement for the sale is gone.
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0]["TabelRef"], "rusak");
    }

    let remaining = service.list_pending().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].tabel_ref, TabelRef::Rusak);
}

#[tokio::test]
async fn test_rejection_sends_trimmed_reason() {
    let mut mock = Mock::default();
    submission(&mut mock, "dipinjam", 3, "AST/2024/003", "sari");
    let (state, url) = spawn_backend(mock).await;
    let service = DefaultApprovalService::new(admin_client(&url));

    let outcome = service
        .reject(TabelRef::Dipinjam, &RecordId::from(3), "  foto buram ")
        .await
        .unwrap();

    assert_eq!(
        outcome.result_of(SideEffect::SubmitterNotification),
        Some(&StepResult::Done)
    );
    let state = state.lock().unwrap();
    assert_eq!(state.rejections, vec![json!({ "reason": "foto buram" })]);
    assert_eq!(state.created_notifications[0]["type"], "rejected");
    assert!(
        state.created_notifications[0]["message"]
            .as_str()
            .unwrap()
            .ends_with("foto buram")
    );
    assert!(state.asset_updates.is_empty());
    assert!(state.pending.is_empty());
}

#[tokio::test]
async fn test_blank_reason_makes_no_requests() {
    let mut mock = Mock::default();
    submission(&mut mock, "mutasi", 4, "AST/2024/004", "sari");
    let (state, url) = spawn_backend(mock).await;
    let service = DefaultApprovalService::new(admin_client(&url));

    let err = service
        .reject(TabelRef::Mutasi, &RecordId::from(4), "   ")
        .await
        .unwrap_err();

    assert!(matches!(err, ApprovalError::EmptyReason));
    let state = state.lock().unwrap();
    assert!(state.seen.is_empty());
    assert_eq!(state.pending.len(), 1);
}

#[tokio::test]
async fn test_failed_asset_update_keeps_approval() {
    let mut mock = Mock {
        fail_asset_update: true,
        ..Mock::default()
    };
    submission(&mut mock, "perbaikan", 9, "AST/2024/001", "budi");
    let (state, url) = spawn_backend(mock).await;
    let service = DefaultApprovalService::new(admin_client(&url));

    let outcome = service
        .approve(TabelRef::Perbaikan, &RecordId::from(9))
        .await
        .unwrap();

    assert!(matches!(
        outcome.result_of(SideEffect::AssetUpdate),
        Some(StepResult::Failed(_))
    ));
    assert_eq!(
        outcome.result_of(SideEffect::SubmitterNotification),
        Some(&StepResult::Done)
    );
    assert!(state.lock().unwrap().pending.is_empty());
}

#[tokio::test]
async fn test_approving_unknown_record_is_an_error() {
    let (state, url) = spawn_backend(Mock::default()).await;
    let service = DefaultApprovalService::new(admin_client(&url));

    let err = service
        .approve(TabelRef::Aset, &RecordId::from(99))
        .await
        .unwrap_err();

    match err {
        ApprovalError::Backend(e) => assert!(e.is_not_found()),
        other => panic!("unexpected error: {other:?}"),
    }
    // No side effects after a failed approve.
    assert_eq!(state.lock().unwrap().seen.len(), 1);
}

#[tokio::test]
async fn test_notification_feed_round_trip() {
    let mut mock = Mock::default();
    submission(&mut mock, "aset", 1, "AST/2024/010", "budi");
    submission(&mut mock, "rusak", 2, "AST/2024/011", "sari");
    let (state, url) = spawn_backend(mock).await;
    let feed = NotificationFeed::new(admin_client(&url));

    let all = feed.list(false).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, NotificationId::from(50));
    assert_eq!(all[0].tabel_ref, Some(TabelRef::Aset));
    assert_eq!(feed.unread_count().await.unwrap(), 2);

    feed.mark_read(&NotificationId::from(50)).await.unwrap();
    assert_eq!(feed.unread_count().await.unwrap(), 1);
    let unread = feed.list(true).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, NotificationId::from(51));

    feed.mark_all_read().await.unwrap();
    assert_eq!(feed.unread_count().await.unwrap(), 0);

    feed.delete(&NotificationId::from(51)).await.unwrap();
    assert_eq!(state.lock().unwrap().notifications.len(), 1);

    let seen = state.lock().unwrap().seen.clone();
    assert!(
        seen.iter()
            .any(|s| s.method == "PUT" && s.path == "/notification/50/read")
    );
    assert!(
        seen.iter()
            .any(|s| s.method == "DELETE" && s.path == "/notification/51")
    );
}

#[tokio::test]
async fn test_rows_missing_status_or_type_are_still_listed() {
    let (_state, url) = spawn_backend(Mock {
        pending: vec![
            json!({ "tabel_ref": "perbaikan", "record_id": 7, "created_by": "budi" }),
            json!({ "TabelRef": "dijual", "RecordId": 8, "ApprovalStatus": "Disetujui" }),
        ],
        notifications: vec![json!({ "ID": 1, "Message": "Pengajuan baru", "IsRead": 0 })],
        ..Mock::default()
    })
    .await;

    let service = DefaultApprovalService::new(admin_client(&url));
    let pending = service.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending[0].is(TabelRef::Perbaikan, &RecordId::from(7)));
    assert_eq!(pending[0].created_by.as_deref(), Some("budi"));

    let feed = NotificationFeed::new(admin_client(&url));
    let notifications = feed.list(true).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message.as_deref(), Some("Pengajuan baru"));
}
