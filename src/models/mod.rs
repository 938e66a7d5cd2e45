//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체들을 정의합니다.
//! - `ticket`: 티켓 요청/응답 구조체와 검증 규칙

pub mod ticket;

pub use ticket::*;
