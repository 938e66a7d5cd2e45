//! # 문서 저장소 계층 (Document Store Adapter)
//!
//! 컬렉션 단위로 JSON 문서를 저장하고 조회하는 저장소입니다.
//! 라우트 핸들러(routes/)는 이 모듈의 `DocumentStore`를 통해서만 DB에 접근합니다.
//!
//! 내부적으로는 SQLite의 `documents` 테이블 하나에 모든 컬렉션을 보관합니다:
//! - `collection`: 컬렉션 이름 (예: "ticket")
//! - `body`: 문서 본문 (JSON 문자열)
//!
//! 각 하위 모듈:
//! - `documents`: 문서 생성/조회, 컬렉션 목록 쿼리

pub mod documents;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// 문서 저장소 핸들
///
/// 연결 풀과 저장소 이름을 함께 들고 다닙니다.
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 같은 풀을 공유합니다.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
    name: String,
}

impl DocumentStore {
    /// 저장소에 연결하고 마이그레이션을 실행합니다.
    ///
    /// 데이터베이스 파일이 없으면 새로 만듭니다.
    pub async fn connect(database_url: &str, name: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::from_pool(pool, name).await
    }

    /// 이미 만들어진 풀로 저장소를 구성합니다. 마이그레이션도 함께 실행합니다.
    pub async fn from_pool(pool: SqlitePool, name: &str) -> Result<Self, sqlx::Error> {
        tracing::info!("Running document store migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            name: name.to_string(),
        })
    }

    /// 설정된 URL이 있으면 연결을 시도합니다.
    ///
    /// URL이 없거나 연결에 실패하면 `None`을 반환합니다 (잘못된 설정).
    /// 서버는 저장소 없이도 시작되어야 하므로 에러를 전파하지 않고 로그만 남깁니다.
    pub async fn connect_optional(database_url: Option<&str>, name: &str) -> Option<Self> {
        let Some(url) = database_url else {
            tracing::warn!("DATABASE_URL is not set, running without a document store");
            return None;
        };

        match Self::connect(url, name).await {
            Ok(store) => {
                tracing::info!("Connected to document store '{}'", name);
                Some(store)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to document store: {}", e);
                None
            }
        }
    }

    /// 저장소 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 연결 풀을 닫습니다. 서버 종료 시 호출합니다.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Document store '{}' closed", self.name);
    }
}
