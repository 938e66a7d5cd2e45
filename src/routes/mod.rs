//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성입니다.
//!
//! 각 하위 모듈:
//! - `health`: 루트 확인, 생존 확인(hello), 저장소 진단(/test)
//! - `tickets`: 티켓 생성/목록 핸들러

pub mod health;
pub mod tickets;

pub use health::*;
pub use tickets::*;

use crate::db::DocumentStore;
use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 요청 사이에 유지되는 가변 상태는 없고, 저장소 연결 풀만 공유됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 문서 저장소 핸들. 설정이 없거나 연결에 실패하면 None입니다.
    pub store: Option<DocumentStore>,
    /// `DATABASE_URL` 환경변수 존재 여부 (값은 보관하지 않음)
    pub database_url_set: bool,
    /// `DATABASE_NAME` 환경변수 존재 여부
    pub database_name_set: bool,
}

impl AppState {
    /// 저장소 핸들을 꺼냅니다. 없으면 `StoreUnavailable` 에러입니다.
    pub fn store(&self) -> Result<&DocumentStore, crate::error::AppError> {
        self.store
            .as_ref()
            .ok_or(crate::error::AppError::StoreUnavailable)
    }
}

/// 전체 라우터를 구성합니다.
///
/// CORS는 모든 출처/메서드/헤더를 허용합니다 (공개 티켓 폼용).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(read_root))
        .route("/api/hello", get(hello))
        .route("/test", get(test_database))
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
