//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `HOST`: 서버 바인딩 주소 (기본값: "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값: 8000)
//! - `DATABASE_URL`: 문서 저장소(SQLite) 연결 문자열 (선택)
//! - `DATABASE_NAME`: 문서 저장소의 논리적 이름 (선택)
//!
//! `DATABASE_URL`이 없어도 서버는 시작됩니다.
//! 이 경우 저장소 핸들이 `None`이 되고, `/test` 진단 엔드포인트가 이를 보고합니다.

use std::env;

/// 포트 환경변수가 없거나 잘못되었을 때 사용하는 기본 포트
pub const DEFAULT_PORT: u16 = 8000;

/// `DATABASE_NAME`이 없을 때 사용하는 저장소 이름
pub const DEFAULT_DATABASE_NAME: &str = "santa";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어옵니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    /// 서버 포트 번호
    pub port: u16,
    /// 저장소 연결 문자열 (예: "sqlite:data/santa.db")
    /// 없으면 저장소 없이 동작합니다.
    pub database_url: Option<String>,
    /// 저장소 이름 (진단 응답과 로그에 사용)
    pub database_name: Option<String>,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 필수 환경변수가 없으므로 항상 성공합니다.
    /// 빈 문자열은 "설정되지 않음"으로 취급합니다.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_port(env::var("PORT").ok().as_deref()),
            database_url: non_empty_var("DATABASE_URL"),
            database_name: non_empty_var("DATABASE_NAME"),
        }
    }

    /// 저장소 이름. 설정되지 않았으면 기본값을 사용합니다.
    pub fn database_name_or_default(&self) -> &str {
        self.database_name
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_NAME)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    // env::var(): 변수가 없거나 UTF-8이 아니면 Err → .ok()로 None 처리
    present(env::var(key).ok())
}

/// 공백뿐인 값은 "설정되지 않음"으로 취급합니다.
fn present(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

/// 포트 문자열을 파싱합니다. 없거나 파싱에 실패하면 기본 포트를 사용합니다.
fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
