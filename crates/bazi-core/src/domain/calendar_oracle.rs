//! 달력 오라클 추상화.
//!
//! 양력/음력 변환과 주어진 보정 시각의 간지, 십신, 지장간, 대운 정보를
//! 제공하는 역법 중립적인 인터페이스입니다. 파이프라인은 이 trait에만
//! 의존하며, 구체적인 역법 계산은 어댑터 크레이트가 담당합니다.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{Gender, LuckDirection, LuckPeriod, PillarKey};
use crate::types::{Branch, Stem};

// =============================================================================
// 에러 타입
// =============================================================================

/// CalendarOracle 에러.
#[derive(Debug, Error)]
pub enum OracleError {
    /// 지원 범위를 벗어난 날짜
    #[error("지원하지 않는 날짜: {0}")]
    UnsupportedDate(String),

    /// 존재하지 않는 음력 날짜 (윤달 없음, 일수 초과 등)
    #[error("잘못된 음력 날짜: {0}")]
    InvalidLunarDate(String),

    /// 계산 실패
    #[error("계산 에러: {0}")]
    Calculation(String),

    /// 지원하지 않는 기능
    #[error("지원하지 않는 기능: {0}")]
    Unsupported(String),
}

/// 오라클 작업을 위한 Result 타입.
pub type OracleResult<T> = Result<T, OracleError>;

// =============================================================================
// 데이터 타입
// =============================================================================

/// 음력 날짜.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    /// 새 음력 날짜.
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// 오라클이 돌려주는 기둥 하나의 원본 기록.
///
/// 값이 없을 수 있는 필드는 모두 `Option`/빈 `Vec`이며, 빌더가 기본값으로
/// 채웁니다. 일주의 천간·지지만 필수입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OraclePillar {
    pub stem: Option<Stem>,
    pub branch: Option<Branch>,
    /// 천간 십신 라벨 (일주는 `日主`)
    pub stem_ten_god: Option<String>,
    /// 지장간 순서대로의 십신 라벨
    pub branch_ten_gods: Vec<String>,
    pub hidden_stems: Vec<Stem>,
    /// 지지 십이운성 (일간 기준)
    pub star_luck: Option<String>,
    /// 자좌 (자기 천간 기준 십이운성)
    pub self_seat: Option<String>,
    /// 공망
    pub void: Option<String>,
    /// 납음
    pub na_yin: Option<String>,
}

/// 네 기둥의 원본 기록.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EightChar {
    pub year: OraclePillar,
    pub month: OraclePillar,
    pub day: OraclePillar,
    pub hour: OraclePillar,
}

impl EightChar {
    /// 기둥 키로 기록을 찾습니다.
    pub fn pillar(&self, key: PillarKey) -> &OraclePillar {
        match key {
            PillarKey::Year => &self.year,
            PillarKey::Month => &self.month,
            PillarKey::Day => &self.day,
            PillarKey::Hour => &self.hour,
        }
    }
}

// =============================================================================
// CalendarOracle Trait
// =============================================================================

/// 달력 오라클 trait.
///
/// 시각은 모두 보정이 끝난 현지 시각(`NaiveDateTime`)으로 전달됩니다.
/// 대운 관련 메서드는 선택 기능이며, 기본 구현은 "지원하지 않음"(`None`)을
/// 돌려줍니다. 이 경우 파이프라인이 자체 규칙으로 대체합니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct TableOracle {
///     table: LunarTable,
/// }
///
/// impl CalendarOracle for TableOracle {
///     fn name(&self) -> &str {
///         "table"
///     }
///
///     // ... 필수 메서드 구현
/// }
/// ```
pub trait CalendarOracle: Send + Sync {
    /// 오라클 이름.
    fn name(&self) -> &str;

    /// 음력 날짜를 양력 날짜로 변환합니다.
    ///
    /// # Errors
    ///
    /// - `OracleError::InvalidLunarDate`: 해당 해에 없는 윤달, 월 일수 초과
    /// - `OracleError::UnsupportedDate`: 지원 범위 밖
    fn lunar_to_solar(&self, date: &LunarDate) -> OracleResult<NaiveDate>;

    /// 양력 날짜를 음력 날짜로 변환합니다.
    ///
    /// # Errors
    ///
    /// - `OracleError::UnsupportedDate`: 지원 범위 밖
    fn solar_to_lunar(&self, date: NaiveDate) -> OracleResult<LunarDate>;

    /// 보정 시각의 네 기둥을 계산합니다.
    ///
    /// # Errors
    ///
    /// - `OracleError::Calculation`: 간지 계산 실패
    fn eight_char(&self, moment: NaiveDateTime) -> OracleResult<EightChar>;

    /// 기운(起運) 나이. 지원하지 않으면 `None`.
    fn start_luck_age(&self, _moment: NaiveDateTime, _gender: Gender) -> Option<u32> {
        None
    }

    /// 대운 진행 방향. 지원하지 않으면 `None`.
    fn luck_direction(&self, _moment: NaiveDateTime, _gender: Gender) -> Option<LuckDirection> {
        None
    }

    /// 대운 목록. 지원하지 않으면 `None`.
    fn luck_periods(&self, _moment: NaiveDateTime, _gender: Gender) -> Option<Vec<LuckPeriod>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyOracle;

    impl CalendarOracle for EmptyOracle {
        fn name(&self) -> &str {
            "empty"
        }

        fn lunar_to_solar(&self, date: &LunarDate) -> OracleResult<NaiveDate> {
            Err(OracleError::Unsupported(date.to_string()))
        }

        fn solar_to_lunar(&self, date: NaiveDate) -> OracleResult<LunarDate> {
            Err(OracleError::Unsupported(date.to_string()))
        }

        fn eight_char(&self, _moment: NaiveDateTime) -> OracleResult<EightChar> {
            Ok(EightChar::default())
        }
    }

    #[test]
    fn test_optional_capabilities_default_to_none() {
        let oracle = EmptyOracle;
        let moment = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(oracle.start_luck_age(moment, Gender::Male), None);
        assert_eq!(oracle.luck_direction(moment, Gender::Female), None);
        assert!(oracle.luck_periods(moment, Gender::Male).is_none());
    }

    #[test]
    fn test_lunar_date_display() {
        assert_eq!(LunarDate::new(1989, 12, 5, false).to_string(), "1989-12-05");
    }

    #[test]
    fn test_eight_char_pillar_lookup() {
        let chart = EightChar {
            day: OraclePillar {
                stem: Some(Stem::Bing),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(chart.pillar(PillarKey::Day).stem, Some(Stem::Bing));
        assert_eq!(chart.pillar(PillarKey::Hour).stem, None);
    }
}
