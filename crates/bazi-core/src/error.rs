//! 엔진의 에러 타입.
//!
//! 이 모듈은 명반 계산 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::OracleError;

/// 검증 위반 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// 필드 경로 (예: `date.month`)
    pub field: String,
    /// 위반 코드 (예: `range`)
    pub code: String,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 위반 목록을 `a: .., b: ..` 형식으로 합칩니다.
fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 핵심 명반 에러.
#[derive(Debug, Error)]
pub enum ChartError {
    /// 입력 검증 실패
    #[error("입력 검증 실패: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// 잘못된 입력 (존재하지 않는 날짜 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 달력 오라클 에러
    #[error("달력 오라클 에러: {0}")]
    Oracle(#[from] OracleError),

    /// 일주 누락
    #[error("일주 누락: {0}")]
    MissingDayMaster(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 명반 작업을 위한 Result 타입.
pub type ChartResult<T> = Result<T, ChartError>;

impl ChartError {
    /// 호출자 입력이 원인인 에러인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ChartError::Validation(_)
                | ChartError::InvalidInput(_)
                | ChartError::Oracle(OracleError::InvalidLunarDate(_))
        )
    }

    /// 검증 위반 목록. 다른 에러면 빈 슬라이스.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ChartError::Validation(v) => v,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ChartError {
    fn from(err: config::ConfigError) -> Self {
        ChartError::Config(err.to_string())
    }
}

impl From<ValidationErrors> for ChartError {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Vec::new();
        flatten_errors("", &errors, &mut out);
        out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
        ChartError::Validation(out)
    }
}

/// 중첩된 검증 에러를 `부모.자식` 경로로 펼칩니다.
fn flatten_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(FieldViolation {
                        field: path.clone(),
                        code: err.code.to_string(),
                        message: err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    flatten_errors(&format!("{}[{}]", path, idx), inner, out);
                }
            }
        }
    }
}
