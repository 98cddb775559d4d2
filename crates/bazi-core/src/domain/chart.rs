//! 명반(排盘) 결과 모델.
//!
//! 사주 네 기둥과 전체 판단, 대운 목록을 담는 읽기 전용 스냅샷입니다.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::BirthInput;
use crate::types::{Branch, Element, GanZhi, Stem};

/// `YYYY-MM-DD HH:MM:SS` 형식의 시각 직렬화.
pub mod ymd_hms {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// 형식 문자열.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}

// =============================================================================
// 기둥
// =============================================================================

/// 기둥 키.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarKey {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarKey {
    /// 연·월·일·시 순서.
    pub const ALL: [PillarKey; 4] = [
        PillarKey::Year,
        PillarKey::Month,
        PillarKey::Day,
        PillarKey::Hour,
    ];
}

/// 기둥 하나의 상세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarDetail {
    pub pillar: PillarKey,
    pub stem: Option<Stem>,
    pub branch: Option<Branch>,
    pub stem_ten_god: String,
    /// 지지 십신 (지장간 십신 중 첫째, 없으면 천간 십신)
    pub branch_ten_god: String,
    pub hidden_stems: Vec<Stem>,
    pub hidden_stem_ten_gods: Vec<String>,
    pub star_luck: String,
    pub self_seat: String,
    pub void: String,
    pub na_yin: String,
    /// `冲X`, `煞Y` 태그
    pub shen_sha: Vec<String>,
}

impl PillarDetail {
    /// 간지 쌍. 천간이나 지지가 없으면 `None`.
    pub fn ganzhi(&self) -> Option<GanZhi> {
        GanZhi::new(self.stem?, self.branch?)
    }
}

/// 일간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMaster {
    pub stem: Stem,
    pub element: Element,
}

/// 네 기둥과 일간.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourPillars {
    pub year: PillarDetail,
    pub month: PillarDetail,
    pub day: PillarDetail,
    pub hour: PillarDetail,
    pub day_master: DayMaster,
}

impl FourPillars {
    /// 연·월·일·시 순서의 기둥.
    pub fn iter(&self) -> impl Iterator<Item = &PillarDetail> {
        PillarKey::ALL.into_iter().map(move |key| self.get(key))
    }

    /// 기둥 키로 찾습니다.
    pub fn get(&self, key: PillarKey) -> &PillarDetail {
        match key {
            PillarKey::Year => &self.year,
            PillarKey::Month => &self.month,
            PillarKey::Day => &self.day,
            PillarKey::Hour => &self.hour,
        }
    }

    /// 원국 지지 (알려진 것만).
    pub fn branches(&self) -> Vec<Branch> {
        self.iter().filter_map(|p| p.branch).collect()
    }
}

// =============================================================================
// 전체 판단
// =============================================================================

/// 일간 강약.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "强")]
    Strong,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "弱")]
    Weak,
}

impl Strength {
    /// 한자 라벨.
    pub fn label(self) -> &'static str {
        match self {
            Strength::Strong => "强",
            Strength::Medium => "中",
            Strength::Weak => "弱",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 대운 진행 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuckDirection {
    /// 순행
    #[serde(rename = "顺")]
    Forward,
    /// 역행
    #[serde(rename = "逆")]
    Reverse,
}

impl LuckDirection {
    /// 간지 한 칸 이동량 (+1 / -1).
    pub fn step(self) -> i64 {
        match self {
            LuckDirection::Forward => 1,
            LuckDirection::Reverse => -1,
        }
    }
}

/// 전체 판단 블록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overall {
    pub day_master_strength: Strength,
    pub favorable_elements: Vec<Element>,
    pub unfavorable_elements: Vec<Element>,
    pub start_luck_age: u32,
    pub luck_direction: LuckDirection,
}

/// 대운 한 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckPeriod {
    pub start_year: i32,
    pub end_year: i32,
    pub start_age: u32,
    pub end_age: u32,
    pub stem_branch: GanZhi,
}

impl LuckPeriod {
    /// 나이 구간 `[start_age, end_age]`로 대운을 만듭니다. 연도는 출생 연도 기준 가세(虚岁)입니다.
    pub fn spanning(birth_year: i32, start_age: u32, end_age: u32, stem_branch: GanZhi) -> Self {
        Self {
            start_year: birth_year + start_age as i32 - 1,
            end_year: birth_year + end_age as i32 - 1,
            start_age,
            end_age,
            stem_branch,
        }
    }

    /// 해당 나이가 이 구간에 속하는지.
    pub fn contains_age(&self, age: u32) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

// =============================================================================
// 명반 결과
// =============================================================================

/// 양력 시각 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarInfo {
    /// 보정 전 현지 시각
    #[serde(with = "ymd_hms")]
    pub ymd_hms: NaiveDateTime,
    /// 진태양시 보정 시각
    #[serde(with = "ymd_hms")]
    pub corrected_ymd_hms: NaiveDateTime,
    /// 경도 보정 분 (소수 첫째 자리 반올림)
    pub longitude_delta_minutes: f64,
    /// 시간대 입력일 때의 설명 (예: `子时(23:00-01:00, 取00:00)`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time_note: String,
}

/// 음력 날짜 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarInfo {
    /// `YYYY-MM-DD`
    pub ymd: String,
    pub is_leap_month: bool,
}

/// 명반 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaipanResult {
    pub input: BirthInput,
    pub solar: SolarInfo,
    pub lunar: LunarInfo,
    pub four_pillars: FourPillars,
    pub overall: Overall,
    pub luck_periods: Vec<LuckPeriod>,
}

impl PaipanResult {
    /// K선의 1세 연도.
    ///
    /// 첫 대운에서 역산하고, 대운이 없으면 보정 시각의 연도를 씁니다.
    pub fn birth_year(&self) -> i32 {
        match self.luck_periods.first() {
            Some(first) => first.start_year - (first.start_age as i32 - 1),
            None => self.solar.corrected_ymd_hms.year(),
        }
    }

    /// 해당 나이의 대운. 어느 구간에도 없으면 마지막 구간.
    pub fn luck_period_at(&self, age: u32) -> Option<&LuckPeriod> {
        self.luck_periods
            .iter()
            .find(|p| p.contains_age(age))
            .or_else(|| self.luck_periods.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start_age: u32, gz: &str) -> LuckPeriod {
        LuckPeriod::spanning(1990, start_age, start_age + 9, gz.parse().unwrap())
    }

    #[test]
    fn test_luck_period_years() {
        let p = period(4, "丁丑");
        assert_eq!(p.start_year, 1993);
        assert_eq!(p.end_year, 2002);
        assert!(p.contains_age(13));
        assert!(!p.contains_age(14));
    }

    #[test]
    fn test_ymd_hms_format() {
        #[derive(Serialize, Deserialize)]
        struct Wrap(#[serde(with = "ymd_hms")] NaiveDateTime);

        let dt = chrono::NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .and_hms_milli_opt(11, 45, 50, 400)
            .unwrap();
        let json = serde_json::to_string(&Wrap(dt)).unwrap();
        assert_eq!(json, "\"1990-01-01 11:45:50\"");
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(LuckDirection::Forward.step(), 1);
        assert_eq!(LuckDirection::Reverse.step(), -1);
        let json = serde_json::to_string(&LuckDirection::Reverse).unwrap();
        assert_eq!(json, "\"逆\"");
    }
}
