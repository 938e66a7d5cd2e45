use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON 본문을 파싱한 뒤 필드 제약까지 검사하는 추출자
///
/// 파싱 실패(필수 필드 누락, 타입 불일치 포함)와 제약 위반 모두
/// 핸들러가 실행되기 전에 거부되므로, 저장소에는 검증된 값만 도달합니다.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::InvalidBody(rejection.body_text()))?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
