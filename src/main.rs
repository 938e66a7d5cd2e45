//! # Santa Experience 백엔드 진입점
//!
//! 산타 체험 티켓 구매를 받는 작은 HTTP API 서버입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 문서 저장소 연결 (설정이 없거나 실패하면 저장소 없이 시작)
//! 4. API 라우터 설정
//! 5. HTTP 서버 시작, 종료 시그널을 받으면 저장소 연결 정리

// ── 모듈 선언 ──
// `mod config;`는 같은 디렉토리의 `config.rs`(또는 `config/mod.rs`)를 모듈로 가져옵니다.
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;

use anyhow::Result; // main에서만 쓰는 범용 Result 타입
use config::Config;
use db::DocumentStore;
use routes::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: main을 Tokio 비동기 런타임 안에서 실행하는 어트리뷰트 매크로
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): Result를 Option으로 바꿔 .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry()에 필터와 포맷터를 레이어처럼 쌓아 전역 로거로 등록합니다.
    tracing_subscriber::registry()
        .with(
            // RUST_LOG가 없으면 이 크레이트와 tower_http, axum을 debug 레벨로
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "santa_backend=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer()) // 터미널 출력 포맷터
        .init();

    // ── 3단계: 설정 로딩 ──
    // 필수 값이 없으므로 `?` 없이 항상 성공합니다.
    let config = Config::from_env();
    tracing::info!("Starting Santa Experience server on {}:{}", config.host, config.port);

    // ── 4단계: 문서 저장소 연결 ──
    // 저장소 연결 실패는 치명적이지 않습니다. `/test`가 상태를 보고합니다.
    // .as_deref(): Option<String> → Option<&str>
    let store = DocumentStore::connect_optional(
        config.database_url.as_deref(),
        config.database_name_or_default(),
    )
    .await;

    // ── 5단계: 공유 상태와 라우터 ──
    // DocumentStore는 내부적으로 Arc 풀이라 clone해도 같은 연결 풀을 가리킵니다.
    // 종료 시 close()를 부르기 위해 원본 핸들은 main이 계속 들고 있습니다.
    let state = AppState {
        store: store.clone(),
        database_url_set: config.database_url.is_some(),
        database_name_set: config.database_name.is_some(),
    };

    let app = routes::router(state);

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // with_graceful_shutdown(): 시그널을 받으면 진행 중인 요청을 마치고 종료합니다.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 7단계: 정리 ──
    if let Some(store) = store {
        store.close().await;
    }

    Ok(())
}

/// Ctrl+C 또는 SIGTERM을 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // tokio::select!: 둘 중 먼저 완료되는 쪽을 기다립니다.
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
