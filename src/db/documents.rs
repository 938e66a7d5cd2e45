//! # 문서 쿼리 모듈
//!
//! `documents` 테이블에 대한 삽입/조회 쿼리입니다.
//! 문서는 생성 후 수정되거나 삭제되지 않습니다.

use super::DocumentStore;
use crate::error::AppError; // sqlx::Error, serde_json::Error는 `?`로 자동 변환됩니다
use serde::Serialize;
use serde_json::Value; // 타입 없는 JSON 값 (문서 본문 조작용)

/// 저장소에서 읽어온 문서 한 건
///
/// `body`는 저장 당시의 JSON 본문에 `created_at` / `updated_at`이 더해진 값입니다.
///
/// `sqlx::FromRow`: SELECT 결과의 컬럼을 같은 이름의 필드로 자동 매핑합니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredDocument {
    pub id: String,
    pub body: String,
}

impl StoredDocument {
    /// 본문 JSON을 원하는 타입으로 역직렬화합니다.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, AppError> {
        // 저장된 본문에 있는 추가 필드(created_at 등)는 serde가 무시합니다.
        Ok(serde_json::from_str(&self.body)?)
    }
}

impl DocumentStore {
    /// 컬렉션에 새 문서를 삽입하고 저장소가 부여한 ID를 반환합니다.
    ///
    /// ## 처리 흐름
    /// 1. 레코드를 JSON 객체로 직렬화
    /// 2. `created_at` / `updated_at` 타임스탬프(UTC, RFC 3339)를 본문에 추가
    /// 3. UUIDv7 ID로 INSERT. v7은 시간순 정렬이 가능합니다.
    pub async fn create_document<T: Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<String, AppError> {
        // to_value(): 구조체 → serde_json::Value (레코드는 JSON 객체여야 타임스탬프가 붙습니다)
        let mut body = serde_json::to_value(record)?;
        // 예: "2024-12-01T09:30:00.123456+00:00"
        let now = chrono::Utc::now().to_rfc3339();

        // ref mut: body를 이동하지 않고 내부 Map을 가변 참조로 빌립니다.
        if let Value::Object(ref mut fields) = body {
            fields.insert("created_at".to_string(), Value::String(now.clone()));
            fields.insert("updated_at".to_string(), Value::String(now.clone()));
        }

        // UUIDv7: 시간 기반 UUID로, 생성 순서대로 정렬됩니다
        let id = uuid::Uuid::now_v7().to_string();

        // .bind()는 SQL의 `?` 플레이스홀더에 값을 순서대로 바인딩합니다 (SQL 인젝션 방지)
        sqlx::query(
            "INSERT INTO documents (id, collection, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(collection)
        .bind(body.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// 컬렉션의 문서를 삽입 순서대로 최대 `limit`건 조회합니다.
    pub async fn get_documents(
        &self,
        collection: &str,
        limit: u32,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let docs = sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = ?
            ORDER BY rowid
            LIMIT ?
            "#,
        )
        .bind(collection)
        // SQLite 정수는 i64이므로 u32를 손실 없이 넓혀서 바인딩합니다
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(docs)
    }

    /// 문서가 하나 이상 들어 있는 컬렉션 이름 목록
    ///
    /// 진단 엔드포인트가 연결 상태를 확인하는 데 사용하므로
    /// `AppError`가 아닌 드라이버 에러를 그대로 돌려줍니다.
    pub async fn list_collection_names(&self) -> Result<Vec<String>, sqlx::Error> {
        // query_scalar: 한 컬럼짜리 결과를 구조체 없이 바로 Vec<String>으로 받습니다
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT collection FROM documents ORDER BY collection",
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::memory_store;
    use serde_json::json;

    #[tokio::test]
    async fn created_documents_are_returned_in_insertion_order() {
        let store = memory_store().await;

        let first = store.create_document("ticket", &json!({ "n": 1 })).await.unwrap();
        let second = store.create_document("ticket", &json!({ "n": 2 })).await.unwrap();

        let docs = store.get_documents("ticket", 20).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn limit_caps_the_result() {
        let store = memory_store().await;
        for n in 0..3 {
            store.create_document("ticket", &json!({ "n": n })).await.unwrap();
        }

        assert_eq!(store.get_documents("ticket", 2).await.unwrap().len(), 2);
        assert!(store.get_documents("ticket", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = memory_store().await;
        store.create_document("ticket", &json!({ "n": 1 })).await.unwrap();
        store.create_document("user", &json!({ "n": 2 })).await.unwrap();

        assert_eq!(store.get_documents("ticket", 20).await.unwrap().len(), 1);
        assert_eq!(
            store.list_collection_names().await.unwrap(),
            vec!["ticket".to_string(), "user".to_string()]
        );
    }

    #[tokio::test]
    async fn body_is_stamped_with_timestamps() {
        let store = memory_store().await;
        store.create_document("ticket", &json!({ "n": 1 })).await.unwrap();

        let doc = &store.get_documents("ticket", 1).await.unwrap()[0];
        let body: serde_json::Value = doc.parse().unwrap();
        assert_eq!(body["n"], 1);
        assert!(body["created_at"].is_string());
        assert_eq!(body["created_at"], body["updated_at"]);
    }

    #[tokio::test]
    async fn closed_store_fails_to_list() {
        let store = memory_store().await;
        store.close().await;

        assert!(store.list_collection_names().await.is_err());
    }
}
