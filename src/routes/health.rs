//! # 헬스체크(Health Check) 핸들러
//!
//! 서버와 문서 저장소의 상태를 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /`          → `{ "message": "Santa Experience Backend Running" }`
//! - `GET /api/hello` → `{ "message": "Hello from the backend API!" }`
//! - `GET /test`      → 저장소 진단 보고서
//!
//! `/test`는 어떤 경우에도 HTTP 에러를 반환하지 않습니다.
//! 저장소 문제는 모두 응답 필드의 문자열로 표현됩니다.

use crate::routes::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

/// 진단 응답에 담는 에러 메시지의 최대 길이 (문자 수)
const MAX_ERROR_CHARS: usize = 50;

/// 진단 응답에 담는 컬렉션 이름의 최대 개수
const MAX_COLLECTIONS: usize = 10;

/// `GET /` — 고정 상태 메시지
pub async fn read_root() -> Json<Value> {
    Json(json!({ "message": "Santa Experience Backend Running" }))
}

/// `GET /api/hello` — 생존 확인(liveness)
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}

/// `GET /test` 응답 본문
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// `GET /test` — 저장소 연결 상태를 진단합니다.
///
/// 1. 저장소 핸들이 없으면 "초기화되지 않음"
/// 2. 있으면 컬렉션 목록을 조회해 성공 시 최대 10개를, 실패 시 50자로 자른 에러를 보고
/// 3. 연결과 무관하게 `DATABASE_URL` / `DATABASE_NAME` 설정 여부를 보고 (값은 노출하지 않음)
///
/// 반환 타입이 `Result`가 아니므로 이 핸들러는 실패하지 않습니다.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let mut report = DiagnosticsReport {
        backend: "Running".to_string(),
        database: "Not Available: store not initialized".to_string(),
        database_url: presence(state.database_url_set),
        database_name: presence(state.database_name_set),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Some(store) = &state.store {
        report.connection_status = "Connected".to_string();

        match store.list_collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                report.collections = names;
                report.database = "Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!("Diagnostics probe of '{}' failed: {}", store.name(), e);
                report.database =
                    format!("Connected but Error: {}", truncate(&e.to_string(), MAX_ERROR_CHARS));
            }
        }
    }

    Json(report)
}

fn presence(set: bool) -> String {
    let label = if set { "Set" } else { "Not Set" };
    label.to_string()
}

/// 문자 단위로 자릅니다 (UTF-8 경계를 넘지 않음).
fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
