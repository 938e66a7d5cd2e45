//! # 티켓 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/tickets | `create_ticket` | 티켓 구매 요청 저장 |
//! | GET | /api/tickets?limit=N | `list_tickets` | 저장된 티켓 목록 (기본 20건) |
//!
//! 검증은 `ValidatedJson` 추출자가 핸들러 실행 전에 끝냅니다.
//! 저장소 에러는 `AppError`로 변환되어 500 응답이 됩니다.

use crate::{
    error::AppError,
    middleware::ValidatedJson,
    models::*,
    routes::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

/// `POST /api/tickets` — 티켓을 저장하고 부여된 ID를 반환합니다.
///
/// 성공: `{ "id": "...", "status": "created" }`
pub async fn create_ticket(
    State(state): State<AppState>,
    ValidatedJson(ticket): ValidatedJson<Ticket>,
) -> Result<Json<CreateTicketResponse>, AppError> {
    let id = state
        .store()?
        .create_document(TICKET_COLLECTION, &ticket)
        .await?;

    tracing::info!(ticket_id = %id, package = %ticket.package, "Ticket created");
    Ok(Json(CreateTicketResponse::created(id)))
}

/// `GET /api/tickets` — 저장소의 자연 순서(삽입 순서)로 최대 `limit`건을 반환합니다.
pub async fn list_tickets(
    State(state): State<AppState>,
    query: Result<Query<ListTicketsQuery>, QueryRejection>,
) -> Result<Json<Vec<TicketOut>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;

    let docs = state
        .store()?
        .get_documents(TICKET_COLLECTION, query.limit())
        .await?;

    let tickets = docs
        .into_iter()
        .map(|doc| {
            let ticket: Ticket = doc.parse()?;
            Ok(TicketOut::new(doc.id, ticket))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Json(tickets))
}
