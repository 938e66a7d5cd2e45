//! # 티켓 모델 정의
//!
//! 산타 체험 입장권(Ticket)의 데이터 구조와 필드 제약 조건입니다.
//!
//! ## 구조체 역할
//! - `Ticket`: 구매 요청 본문이자 저장되는 문서의 모양 (검증 규칙 포함)
//! - `TicketOut`: 목록 조회 시 반환하는 투영(projection)
//! - `CreateTicketResponse`: 생성 성공 응답
//! - `ListTicketsQuery`: 목록 조회 쿼리 파라미터

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 티켓이 저장되는 컬렉션 이름
pub const TICKET_COLLECTION: &str = "ticket";

/// 목록 조회의 기본 개수
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// 티켓 엔티티 — `POST /api/tickets`의 요청 본문이자 `ticket` 컬렉션의 문서입니다.
///
/// # 검증 규칙 (`#[validate(...)]`)
/// - `purchaser_name`: 최소 2자
/// - `purchaser_email`: 이메일 형식, 도메인에 점(.)이 있어야 함 (`a@localhost` 거부)
/// - `quantity`: 1 이상 10 이하, 생략하면 1
/// - `notes`: 최대 500자 (없어도 됨)
///
/// `package`는 자유 형식 문자열입니다 ("Standard", "VIP", "Family" 등).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Ticket {
    #[validate(length(min = 2))]
    pub purchaser_name: String,
    #[validate(email, custom(function = "validate_email_domain"))]
    pub purchaser_email: String,
    pub package: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 10))]
    pub quantity: i64,
    /// None이면 저장 문서에서 필드 자체를 생략합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

/// 이메일 도메인에 점(.)으로 구분된 라벨이 두 개 이상 있는지 확인합니다.
///
/// `#[validate(email)]`은 `a@localhost` 같은 단일 라벨 도메인도 통과시키므로
/// 공개 티켓 폼에서는 이 규칙을 추가로 적용합니다.
fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("");
    let dotted = domain
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
        >= 2;

    if dotted {
        Ok(())
    } else {
        Err(ValidationError::new("email_domain"))
    }
}

/// 목록 조회 응답의 티켓 한 건
///
/// `notes`가 없으면 `null`로 직렬화되어, 항상 여섯 개의 필드가 응답에 포함됩니다.
#[derive(Debug, Clone, Serialize)]
pub struct TicketOut {
    pub id: String,
    pub purchaser_name: String,
    pub purchaser_email: String,
    pub package: String,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl TicketOut {
    /// 저장소가 부여한 ID와 문서 본문으로 응답 객체를 만듭니다.
    pub fn new(id: String, ticket: Ticket) -> Self {
        Self {
            id,
            purchaser_name: ticket.purchaser_name,
            purchaser_email: ticket.purchaser_email,
            package: ticket.package,
            quantity: ticket.quantity,
            notes: ticket.notes,
        }
    }
}

/// 티켓 생성 성공 응답 — `{ "id": "...", "status": "created" }`
#[derive(Debug, Serialize)]
pub struct CreateTicketResponse {
    pub id: String,
    pub status: String,
}

impl CreateTicketResponse {
    pub fn created(id: String) -> Self {
        Self {
            id,
            status: "created".to_string(),
        }
    }
}

/// `GET /api/tickets?limit=N`
#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub limit: Option<u32>,
}

impl ListTicketsQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket(value: serde_json::Value) -> Ticket {
        serde_json::from_value(value).unwrap()
    }

    fn valid() -> serde_json::Value {
        json!({
            "purchaser_name": "Alice Smith",
            "purchaser_email": "alice@example.com",
            "package": "VIP",
            "quantity": 2
        })
    }

    fn rejected_field(value: serde_json::Value) -> Vec<String> {
        let errors = ticket(value).validate().unwrap_err();
        errors.field_errors().keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn accepts_a_valid_ticket() {
        assert!(ticket(valid()).validate().is_ok());
    }

    #[test]
    fn quantity_defaults_to_one() {
        let t = ticket(json!({
            "purchaser_name": "Bo",
            "purchaser_email": "bo@example.com",
            "package": "Family"
        }));
        assert_eq!(t.quantity, 1);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn quantity_bounds_are_inclusive() {
        for (quantity, ok) in [(0, false), (1, true), (10, true), (11, false)] {
            let mut value = valid();
            value["quantity"] = json!(quantity);
            assert_eq!(ticket(value).validate().is_ok(), ok, "quantity {quantity}");
        }
    }

    #[test]
    fn short_name_is_rejected() {
        let mut value = valid();
        value["purchaser_name"] = json!("A");
        assert_eq!(rejected_field(value), vec!["purchaser_name"]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut value = valid();
        value["purchaser_email"] = json!("bad");
        assert_eq!(rejected_field(value), vec!["purchaser_email"]);
    }

    #[test]
    fn dotless_email_domain_is_rejected() {
        let mut value = valid();
        value["purchaser_email"] = json!("a@localhost");
        assert_eq!(rejected_field(value), vec!["purchaser_email"]);

        assert!(validate_email_domain("santa@north.pole").is_ok());
        assert!(validate_email_domain("santa@.pole").is_err());
    }

    #[test]
    fn notes_length_is_capped_at_500() {
        let mut value = valid();
        value["notes"] = json!("x".repeat(500));
        assert!(ticket(value.clone()).validate().is_ok());

        value["notes"] = json!("x".repeat(501));
        assert_eq!(rejected_field(value), vec!["notes"]);
    }

    #[test]
    fn every_violation_is_reported() {
        let errors = ticket(json!({
            "purchaser_name": "A",
            "purchaser_email": "bad",
            "package": "Standard",
            "quantity": 1
        }))
        .validate()
        .unwrap_err();

        let fields = errors.field_errors();
        assert!(fields.contains_key("purchaser_name"));
        assert!(fields.contains_key("purchaser_email"));
    }

    #[test]
    fn absent_notes_are_not_stored() {
        let stored = serde_json::to_value(ticket(valid())).unwrap();
        assert!(stored.get("notes").is_none());
    }

    #[test]
    fn list_limit_defaults_to_twenty() {
        assert_eq!(ListTicketsQuery { limit: None }.limit(), 20);
        assert_eq!(ListTicketsQuery { limit: Some(3) }.limit(), 3);
    }
}
