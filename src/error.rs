//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 검증 에러와 저장소 에러를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 응답 형식:
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "details": { ... } } }
//! ```
//! `details`는 검증 에러일 때만 포함됩니다.

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (422, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::{json, Map, Value};
use thiserror::Error; // #[derive(Error)]로 Display와 std::error::Error를 자동 구현
use validator::ValidationErrors; // 필드별 제약 위반 모음

// #[derive(Debug, Error)]:
// - Debug: {:?} 디버깅 출력
// - Error (thiserror): #[error("...")] 메시지로 Display를 생성합니다.

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 필드 제약 조건 위반 (HTTP 422)
    /// 저장소에 도달하기 전에 거부됩니다.
    #[error("Validation failed: {0}")]
    /// #[from]: `value.validate()?`가 자동으로 이 variant로 변환됩니다.
    Validation(#[from] ValidationErrors),

    /// 요청 본문을 파싱할 수 없음: 잘못된 JSON, 필수 필드 누락, 타입 불일치 (HTTP 422)
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// 잘못된 쿼리 파라미터 (HTTP 422)
    /// 본문 에러와 같은 상태 코드를 써서 클라이언트 입력 에러를 하나로 맞춥니다.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// 저장소 핸들이 초기화되지 않음 (HTTP 500)
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.")]
    StoreUnavailable,

    /// 저장소 읽기/쓰기 실패 (HTTP 500)
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 문서 본문 직렬화/역직렬화 실패 (HTTP 500)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// HTTP 상태 코드와 응답에 쓰이는 에러 코드 문자열
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        // match는 모든 variant를 빠짐없이 처리해야 합니다 (exhaustive).
        // 새 variant를 추가하면 여기서 컴파일 에러가 나므로 상태 코드를 빠뜨릴 수 없습니다.
        match self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::InvalidBody(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_body"),
            AppError::InvalidQuery(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_query"),
            AppError::StoreUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error"),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 저장소 에러는 로그에 기록한 뒤, 원래 에러 메시지를 그대로 응답에 담습니다.
    /// 재시도나 세부 분류는 하지 않습니다.
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // 5xx만 서버 로그에 남깁니다. 4xx는 클라이언트 입력 문제입니다.
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        // Map: JSON 객체. `details`를 조건부로 넣기 위해 json! 대신 직접 구성합니다.
        let mut error = Map::new();
        error.insert("code".to_string(), json!(code));
        error.insert("message".to_string(), json!(self.to_string()));
        // ref: self를 이동(move)하지 않고 내부 값을 빌려옵니다.
        if let AppError::Validation(ref errors) = self {
            error.insert("details".to_string(), validation_details(errors));
        }

        let body = Json(json!({ "error": Value::Object(error) }));
        // (상태코드, 본문) 튜플은 Axum이 HTTP 응답으로 변환합니다.
        (status, body).into_response()
    }
}

/// 필드별 위반 제약 목록을 만듭니다.
///
/// 예: `{ "purchaser_name": ["length"], "purchaser_email": ["email"] }`
fn validation_details(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    // field_errors(): 필드 이름 → 그 필드의 위반 목록
    for (field, violations) in errors.field_errors() {
        let codes: Vec<Value> = violations
            .iter()
            .map(|violation| json!(violation.code))
            .collect();
        fields.insert(field.to_string(), Value::Array(codes));
    }
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn validation_errors_are_unprocessable() {
        let mut errors = ValidationErrors::new();
        errors.add("quantity", ValidationError::new("range"));
        let err = AppError::from(errors);

        assert_eq!(err.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn details_list_codes_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("purchaser_email", ValidationError::new("email"));

        let details = validation_details(&errors);
        assert_eq!(details["purchaser_email"], json!(["email"]));
    }

    #[test]
    fn store_errors_are_server_errors() {
        let err = AppError::StoreUnavailable;
        assert_eq!(err.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("Database not available"));
    }
}
