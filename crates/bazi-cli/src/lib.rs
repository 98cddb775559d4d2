//! CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - JSON 파일 또는 플래그에서 출생 입력 읽기
//! - 명반 / K선 계산 결과 출력
//! - 공유 ID 계산
//! - 시간대 목록 보기

pub mod commands;
