//! 대운 조립.
//!
//! 오라클이 제공하는 기운 나이·방향·대운 목록을 우선 사용하고, 없으면
//! 월주에서 천간·지지를 한 칸씩 돌리는 규칙으로 대체합니다.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use bazi_core::{CalendarOracle, GanZhi, Gender, LuckDirection, LuckPeriod, Stem};

/// 대체 규칙에서 생성하는 10년 대운 수.
pub const FALLBACK_DECADES: u32 = 11;

/// 대운 한 구간의 햇수.
const DECADE_YEARS: u32 = 10;

/// 조립 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct LuckAssembly {
    pub start_age: u32,
    pub direction: LuckDirection,
    pub periods: Vec<LuckPeriod>,
}

/// 대운 조립 입력.
#[derive(Debug, Clone, Copy)]
pub struct LuckRequest {
    /// 보정된 출생 시각
    pub moment: NaiveDateTime,
    pub gender: Gender,
    pub day_master: Stem,
    /// 월주 (없으면 甲子에서 시작)
    pub month: Option<GanZhi>,
    pub birth_year: i32,
}

/// 대운 조립기.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuckAssembler;

impl LuckAssembler {
    /// 새 조립기.
    pub fn new() -> Self {
        Self
    }

    /// 대운을 조립합니다.
    pub fn assemble<O: CalendarOracle + ?Sized>(
        &self,
        oracle: &O,
        req: &LuckRequest,
    ) -> LuckAssembly {
        let start_age = oracle
            .start_luck_age(req.moment, req.gender)
            .unwrap_or(1)
            .max(1);

        let direction = oracle
            .luck_direction(req.moment, req.gender)
            .unwrap_or_else(|| {
                debug!(oracle = oracle.name(), "luck direction falls back to day-master rule");
                Self::fallback_direction(req.day_master, req.gender)
            });

        let periods = match oracle.luck_periods(req.moment, req.gender) {
            Some(list) if !list.is_empty() => list,
            _ => {
                warn!(
                    oracle = oracle.name(),
                    "oracle has no luck periods, cycling from month pillar"
                );
                let month = req.month.unwrap_or_else(|| GanZhi::from_cycle_index(0));
                Self::fallback_periods(req.birth_year, start_age, month, direction)
            }
        };

        LuckAssembly {
            start_age,
            direction,
            periods,
        }
    }

    /// 양간 남자 또는 음간 여자 → 순행.
    pub fn fallback_direction(day_master: Stem, gender: Gender) -> LuckDirection {
        match (day_master.is_yang(), gender) {
            (true, Gender::Male) | (false, Gender::Female) => LuckDirection::Forward,
            _ => LuckDirection::Reverse,
        }
    }

    /// 월주에서 시작해 10년마다 한 칸씩 진행하는 대운 11개.
    ///
    /// 기운 나이가 1보다 크면 그 앞 구간을 월주로 채웁니다.
    pub fn fallback_periods(
        birth_year: i32,
        start_age: u32,
        month: GanZhi,
        direction: LuckDirection,
    ) -> Vec<LuckPeriod> {
        let mut periods = Vec::with_capacity(FALLBACK_DECADES as usize + 1);
        if start_age > 1 {
            periods.push(LuckPeriod::spanning(birth_year, 1, start_age - 1, month));
        }
        periods.extend((0..FALLBACK_DECADES).map(|i| {
            let age = start_age + i * DECADE_YEARS;
            LuckPeriod::spanning(
                birth_year,
                age,
                age + DECADE_YEARS - 1,
                month.step(direction.step() * i as i64),
            )
        }));
        periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi_core::{EightChar, LunarDate, OracleError, OracleResult};
    use chrono::NaiveDate;

    /// 대운 기능이 없는 오라클.
    struct PlainOracle;

    impl CalendarOracle for PlainOracle {
        fn name(&self) -> &str {
            "plain"
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

    /// 기운 나이만 아는 오라클.
    struct AgeOnlyOracle(u32);

    impl CalendarOracle for AgeOnlyOracle {
        fn name(&self) -> &str {
            "age-only"
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
        fn start_luck_age(&self, _moment: NaiveDateTime, _gender: Gender) -> Option<u32> {
            Some(self.0)
        }
    }

    fn request(day_master: Stem, gender: Gender) -> LuckRequest {
        LuckRequest {
            moment: NaiveDate::from_ymd_opt(1990, 1, 1)
                .unwrap()
                .and_hms_opt(11, 45, 50)
                .unwrap(),
            gender,
            day_master,
            month: Some("丙子".parse().unwrap()),
            birth_year: 1990,
        }
    }

    #[test]
    fn test_fallback_direction_rule() {
        let dir = LuckAssembler::fallback_direction;
        assert_eq!(dir(Stem::Bing, Gender::Male), LuckDirection::Forward);
        assert_eq!(dir(Stem::Bing, Gender::Female), LuckDirection::Reverse);
        assert_eq!(dir(Stem::Ding, Gender::Female), LuckDirection::Forward);
        assert_eq!(dir(Stem::Ding, Gender::Male), LuckDirection::Reverse);
    }

    #[test]
    fn test_plain_oracle_uses_fallbacks() {
        let out = LuckAssembler::new().assemble(&PlainOracle, &request(Stem::Bing, Gender::Male));
        assert_eq!(out.start_age, 1);
        assert_eq!(out.direction, LuckDirection::Forward);
        assert_eq!(out.periods.len(), FALLBACK_DECADES as usize);
        assert_eq!(out.periods[0].stem_branch.to_string(), "丙子");
        assert_eq!(out.periods[1].stem_branch.to_string(), "丁丑");
        assert_eq!(out.periods[0].start_year, 1990);
        assert_eq!(out.periods[10].end_age, 110);
    }

    #[test]
    fn test_reverse_fallback_cycles_backwards() {
        let out = LuckAssembler::new().assemble(&PlainOracle, &request(Stem::Bing, Gender::Female));
        assert_eq!(out.direction, LuckDirection::Reverse);
        assert_eq!(out.periods[1].stem_branch.to_string(), "乙亥");
        assert_eq!(out.periods[2].stem_branch.to_string(), "甲戌");
    }

    #[test]
    fn test_late_start_prepends_pre_luck_period() {
        let req = request(Stem::Bing, Gender::Male);
        let out = LuckAssembler::new().assemble(&AgeOnlyOracle(6), &req);
        assert_eq!(out.start_age, 6);
        assert_eq!(out.periods[0].start_age, 1);
        assert_eq!(out.periods[0].end_age, 5);
        assert_eq!(out.periods[1].start_age, 6);
        assert_eq!(out.periods[1].start_year, 1995);
        for pair in out.periods.windows(2) {
            assert_eq!(pair[0].end_age + 1, pair[1].start_age);
        }
    }

    #[test]
    fn test_missing_month_starts_from_jiazi() {
        let mut req = request(Stem::Bing, Gender::Male);
        req.month = None;
        let out = LuckAssembler::new().assemble(&PlainOracle, &req);
        assert_eq!(out.periods[0].stem_branch.to_string(), "甲子");
    }
}
