//! 시각 → 사주 간지.
//!
//! - 연주: 입춘 기준으로 바뀜
//! - 월주: 태양 황경 315°(입춘)부터 30°마다 寅, 卯, ... 천간은 五虎遁
//! - 일주: 율리우스 적일, 자정에 바뀜 (2000-01-01 = 戊午)
//! - 시주: 五鼠遁, 23시는 다음 날 일간 기준

use chrono::{Datelike, NaiveDateTime, Timelike};

use bazi_core::{Branch, GanZhi, OracleError, OracleResult, Stem};

use crate::astro::{day_number_of, lichun_jde, local_to_jde, sun_longitude};

/// 일주 순번 오프셋: `(JDN + 49) mod 60`.
const DAY_CYCLE_OFFSET: i64 = 49;

/// 네 기둥 간지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexagenaryPillars {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    pub hour: GanZhi,
}

/// 현지 시각의 네 기둥.
pub fn pillars_at(moment: NaiveDateTime) -> OracleResult<SexagenaryPillars> {
    let jde = local_to_jde(moment);
    let year = year_pillar(moment.year(), jde);
    let month = month_pillar(year.stem(), sun_longitude(jde))?;
    let day = day_pillar(moment);
    let hour = hour_pillar(day.stem(), moment.hour())?;
    Ok(SexagenaryPillars {
        year,
        month,
        day,
        hour,
    })
}

/// 입춘 전이면 전년도 간지.
fn year_pillar(gregorian_year: i32, jde: f64) -> GanZhi {
    if jde < lichun_jde(gregorian_year) {
        GanZhi::for_year(gregorian_year - 1)
    } else {
        GanZhi::for_year(gregorian_year)
    }
}

/// 절월 번호 (寅월 = 0).
pub fn solar_month_index(sun_lon: f64) -> usize {
    (((sun_lon - 315.0).rem_euclid(360.0)) / 30.0).floor() as usize % 12
}

fn month_pillar(year_stem: Stem, sun_lon: f64) -> OracleResult<GanZhi> {
    let m = solar_month_index(sun_lon);
    let branch = Branch::from_index(Branch::Yin.index() + m);
    let stem = Stem::from_index((year_stem.index() % 5) * 2 + Stem::Bing.index() + m);
    GanZhi::new(stem, branch)
        .ok_or_else(|| OracleError::Calculation(format!("월주 계산 실패: {}{}", stem, branch)))
}

fn day_pillar(moment: NaiveDateTime) -> GanZhi {
    let jdn = day_number_of(moment.date());
    GanZhi::from_cycle_index((jdn + DAY_CYCLE_OFFSET).rem_euclid(60) as usize)
}

fn hour_pillar(day_stem: Stem, hour: u32) -> OracleResult<GanZhi> {
    let branch = Branch::from_index(((hour + 1) / 2) as usize);
    // 23시(夜子时)는 다음 날 일간으로 시간을 일으킴
    let base = if hour == 23 {
        Stem::from_index(day_stem.index() + 1)
    } else {
        day_stem
    };
    let stem = Stem::from_index((base.index() % 5) * 2 + branch.index());
    GanZhi::new(stem, branch)
        .ok_or_else(|| OracleError::Calculation(format!("시주 계산 실패: {}{}", stem, branch)))
}
