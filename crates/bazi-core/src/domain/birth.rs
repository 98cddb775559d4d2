//! 출생 입력 모델과 검증.
//!
//! 입력은 요청마다 한 번 만들어지고, 어떤 계산보다도 먼저 검증됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use crate::error::{ChartError, ChartResult};

// =============================================================================
// 열거형
// =============================================================================

/// 성별.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// 입력 날짜의 역법.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    /// 양력
    Solar,
    /// 음력
    Lunar,
}

/// 이름 붙은 출생 시간대 (12지시 + 오전/오후).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSegment {
    #[serde(rename = "子时")]
    Zi,
    #[serde(rename = "丑时")]
    Chou,
    #[serde(rename = "寅时")]
    Yin,
    #[serde(rename = "卯时")]
    Mao,
    #[serde(rename = "辰时")]
    Chen,
    #[serde(rename = "巳时")]
    Si,
    #[serde(rename = "午时")]
    Wu,
    #[serde(rename = "未时")]
    Wei,
    #[serde(rename = "申时")]
    Shen,
    #[serde(rename = "酉时")]
    You,
    #[serde(rename = "戌时")]
    Xu,
    #[serde(rename = "亥时")]
    Hai,
    #[serde(rename = "上午")]
    Morning,
    #[serde(rename = "下午")]
    Afternoon,
}

impl TimeSegment {
    /// 전체 시간대.
    pub const ALL: [TimeSegment; 14] = [
        TimeSegment::Zi,
        TimeSegment::Chou,
        TimeSegment::Yin,
        TimeSegment::Mao,
        TimeSegment::Chen,
        TimeSegment::Si,
        TimeSegment::Wu,
        TimeSegment::Wei,
        TimeSegment::Shen,
        TimeSegment::You,
        TimeSegment::Xu,
        TimeSegment::Hai,
        TimeSegment::Morning,
        TimeSegment::Afternoon,
    ];

    /// 한자 라벨.
    pub fn label(self) -> &'static str {
        match self {
            TimeSegment::Zi => "子时",
            TimeSegment::Chou => "丑时",
            TimeSegment::Yin => "寅时",
            TimeSegment::Mao => "卯时",
            TimeSegment::Chen => "辰时",
            TimeSegment::Si => "巳时",
            TimeSegment::Wu => "午时",
            TimeSegment::Wei => "未时",
            TimeSegment::Shen => "申时",
            TimeSegment::You => "酉时",
            TimeSegment::Xu => "戌时",
            TimeSegment::Hai => "亥时",
            TimeSegment::Morning => "上午",
            TimeSegment::Afternoon => "下午",
        }
    }

    /// 라벨에서 파싱합니다.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|seg| seg.label() == s)
    }
}

impl fmt::Display for TimeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// 입력 구조체
// =============================================================================

/// 출생 날짜. `calendar`에 따라 양력 또는 음력으로 해석됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BirthDate {
    #[validate(range(min = 1800, max = 2200, message = "연도는 1800~2200 사이여야 합니다"))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "월은 1~12 사이여야 합니다"))]
    pub month: i32,
    #[validate(range(min = 1, max = 31, message = "일은 1~31 사이여야 합니다"))]
    pub day: i32,
    /// 음력 윤달 여부 (양력이면 무시)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_leap_month: Option<bool>,
}

/// 출생 시간: 정확한 시각 또는 이름 붙은 시간대.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BirthTime {
    /// 시:분
    Exact { hour: i32, minute: i32 },
    /// 12지시 또는 오전/오후
    Segment { label: TimeSegment },
}

/// 출생지.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BirthLocation {
    #[validate(custom(function = "validate_not_blank"))]
    pub province: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,
    /// 동경 (도)
    #[validate(range(min = 70.0, max = 140.0, message = "경도는 70~140 사이여야 합니다"))]
    pub longitude: f64,
}

/// 출생 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BirthInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub gender: Gender,
    pub calendar: CalendarType,
    #[validate(nested)]
    pub date: BirthDate,
    #[validate(custom(function = "validate_birth_time"))]
    pub time: BirthTime,
    #[validate(nested)]
    pub location: BirthLocation,
}

impl BirthInput {
    /// JSON 문자열을 파싱하고 검증합니다.
    ///
    /// # Errors
    ///
    /// - `ChartError::Serialization`: JSON 형식 또는 알 수 없는 라벨
    /// - `ChartError::Validation`: 범위를 벗어난 필드
    pub fn from_json(raw: &str) -> ChartResult<Self> {
        let input: BirthInput = serde_json::from_str(raw)?;
        input.ensure_valid()?;
        Ok(input)
    }

    /// 검증을 실행하고 위반을 필드 경로별로 돌려줍니다.
    pub fn ensure_valid(&self) -> ChartResult<()> {
        self.validate().map_err(ChartError::from)
    }

    /// 음력 입력의 윤달 여부.
    pub fn is_leap_month(&self) -> bool {
        self.calendar == CalendarType::Lunar && self.date.is_leap_month.unwrap_or(false)
    }
}

// =============================================================================
// 사용자 정의 검증
// =============================================================================

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("비어 있을 수 없습니다".into()));
    }
    Ok(())
}

fn validate_birth_time(time: &BirthTime) -> Result<(), ValidationError> {
    if let BirthTime::Exact { hour, minute } = *time {
        if !(0..=23).contains(&hour) {
            return Err(ValidationError::new("hour_range")
                .with_message("시는 0~23 사이여야 합니다".into()));
        }
        if !(0..=59).contains(&minute) {
            return Err(ValidationError::new("minute_range")
                .with_message("분은 0~59 사이여야 합니다".into()));
        }
    }
    Ok(())
}
