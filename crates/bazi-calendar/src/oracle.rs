//! 천문 계산 기반 달력 오라클.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use bazi_core::{
    CalendarOracle, EightChar, GanZhi, Gender, LuckDirection, LuckPeriod, LunarDate, OracleError,
    OraclePillar, OracleResult, Stem, TenGod, DAY_MASTER_LABEL,
};

use crate::astro::local_to_jde;
use crate::lunisolar::{self, SUPPORTED_YEARS};
use crate::luck;
use crate::sexagenary::{pillars_at, SexagenaryPillars};
use crate::stages::{na_yin, twelve_stage, void_pair};

/// 외부 데이터 없이 해석적 천문 공식으로 동작하는 오라클.
///
/// 현지 시각은 UTC+8로 해석하며, 대운 세 기능을 모두 지원합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalOracle;

impl AstronomicalOracle {
    /// 새 오라클.
    pub fn new() -> Self {
        Self
    }

    fn pillars(&self, moment: NaiveDateTime) -> OracleResult<SexagenaryPillars> {
        if !SUPPORTED_YEARS.contains(&moment.year()) {
            return Err(OracleError::UnsupportedDate(moment.to_string()));
        }
        pillars_at(moment)
    }

    /// 기둥 하나의 기록. `is_day`면 천간 십신은 `日主`.
    fn pillar_record(gz: GanZhi, day_master: Stem, is_day: bool) -> OraclePillar {
        let hidden_stems = gz.branch().hidden_stems().to_vec();
        let stem_ten_god = if is_day {
            DAY_MASTER_LABEL.to_string()
        } else {
            TenGod::between(day_master, gz.stem()).label().to_string()
        };
        OraclePillar {
            stem: Some(gz.stem()),
            branch: Some(gz.branch()),
            stem_ten_god: Some(stem_ten_god),
            branch_ten_gods: hidden_stems
                .iter()
                .map(|h| TenGod::between(day_master, *h).label().to_string())
                .collect(),
            hidden_stems,
            star_luck: Some(twelve_stage(day_master, gz.branch()).to_string()),
            self_seat: Some(twelve_stage(gz.stem(), gz.branch()).to_string()),
            void: Some(void_pair(gz)),
            na_yin: Some(na_yin(gz).to_string()),
        }
    }

    fn resolved_luck(
        &self,
        moment: NaiveDateTime,
        gender: Gender,
    ) -> Option<(SexagenaryPillars, LuckDirection, u32)> {
        let pillars = self.pillars(moment).ok()?;
        let direction = luck::direction(pillars.year.stem(), gender);
        let age = luck::start_age(local_to_jde(moment), direction);
        Some((pillars, direction, age))
    }
}

impl CalendarOracle for AstronomicalOracle {
    fn name(&self) -> &str {
        "astronomical"
    }

    fn lunar_to_solar(&self, date: &LunarDate) -> OracleResult<NaiveDate> {
        lunisolar::lunar_to_solar(date)
    }

    fn solar_to_lunar(&self, date: NaiveDate) -> OracleResult<LunarDate> {
        lunisolar::solar_to_lunar(date)
    }

    fn eight_char(&self, moment: NaiveDateTime) -> OracleResult<EightChar> {
        let p = self.pillars(moment)?;
        let dm = p.day.stem();
        debug!(
            %moment,
            year = %p.year,
            month = %p.month,
            day = %p.day,
            hour = %p.hour,
            "pillars resolved"
        );
        Ok(EightChar {
            year: Self::pillar_record(p.year, dm, false),
            month: Self::pillar_record(p.month, dm, false),
            day: Self::pillar_record(p.day, dm, true),
            hour: Self::pillar_record(p.hour, dm, false),
        })
    }

    fn start_luck_age(&self, moment: NaiveDateTime, gender: Gender) -> Option<u32> {
        self.resolved_luck(moment, gender).map(|(_, _, age)| age)
    }

    fn luck_direction(&self, moment: NaiveDateTime, gender: Gender) -> Option<LuckDirection> {
        self.resolved_luck(moment, gender).map(|(_, dir, _)| dir)
    }

    fn luck_periods(&self, moment: NaiveDateTime, gender: Gender) -> Option<Vec<LuckPeriod>> {
        let (pillars, direction, age) = self.resolved_luck(moment, gender)?;
        Some(luck::periods(moment.year(), age, pillars.month, direction))
    }
}
