//! # BaZi Core
//!
//! 인생 K선 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 엔진 전반에서 사용되는 기본 타입을 제공합니다:
//! - 천간/지지/오행/십신 및 육십갑자 타입
//! - 출생 입력과 검증
//! - 사주(四柱) 및 K선 결과 구조체
//! - 달력 오라클 추상화
//! - 설정 관리
//! - 로깅 인프라
//! - 공유 ID

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod share;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use share::*;
pub use types::*;
