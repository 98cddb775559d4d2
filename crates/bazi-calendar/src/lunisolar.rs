//! 음양력(农历) 변환.
//!
//! 동지가 든 달을 11월로 두고, 두 동지월 사이에 삭망월이 13개면
//! 중기(中气)가 없는 첫 달을 윤달로 둡니다. 1월 이전의 11·12월은
//! 전년도 음력 연도에 속합니다.

use chrono::{Datelike, NaiveDate};

use bazi_core::{LunarDate, OracleError, OracleResult};

use crate::astro::{
    date_of_day_number, day_number_of, new_moon_day, new_moon_on_or_before,
    principal_term_index, winter_solstice_day,
};

/// 지원하는 그레고리력 연도 범위.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1700..=2300;

/// 음력 한 달.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarMonth {
    /// 음력 연도
    pub year: i32,
    /// 월 번호 1~12
    pub number: u32,
    pub is_leap: bool,
    /// 초하루 JDN
    pub first_day: i64,
    /// 일수 (29 또는 30)
    pub days: u32,
}

impl LunarMonth {
    fn contains(&self, jdn: i64) -> bool {
        jdn >= self.first_day && jdn < self.first_day + self.days as i64
    }
}

/// `year-1`년 동지월부터 `year`년 동지월 직전까지의 달 목록 (歲).
pub fn months_of_sui(year: i32) -> Vec<LunarMonth> {
    let (k_start, _) = new_moon_on_or_before(winter_solstice_day(year - 1));
    let (k_end, _) = new_moon_on_or_before(winter_solstice_day(year));

    let starts: Vec<i64> = (k_start..=k_end).map(new_moon_day).collect();
    let lunations = starts.len() - 1;

    let leap_index = if lunations == 13 {
        (1..lunations)
            .find(|&i| principal_term_index(starts[i]) == principal_term_index(starts[i + 1]))
    } else {
        None
    };

    let mut months = Vec::with_capacity(lunations);
    let mut number = 11u32;
    let mut past_new_year = false;
    for i in 0..lunations {
        let is_leap = Some(i) == leap_index;
        if i > 0 && !is_leap {
            number = number % 12 + 1;
        }
        if number == 1 && !is_leap {
            past_new_year = true;
        }
        months.push(LunarMonth {
            year: if past_new_year { year } else { year - 1 },
            number,
            is_leap,
            first_day: starts[i],
            days: (starts[i + 1] - starts[i]) as u32,
        });
    }
    months
}

fn ensure_supported(year: i32) -> OracleResult<()> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(OracleError::UnsupportedDate(format!(
            "{}년은 지원 범위({}~{}) 밖입니다",
            year,
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )))
    }
}

/// 양력 → 음력.
pub fn solar_to_lunar(date: NaiveDate) -> OracleResult<LunarDate> {
    ensure_supported(date.year())?;
    let jdn = day_number_of(date);
    [date.year(), date.year() + 1]
        .into_iter()
        .flat_map(months_of_sui)
        .find(|m| m.contains(jdn))
        .map(|m| LunarDate::new(m.year, m.number, (jdn - m.first_day + 1) as u32, m.is_leap))
        .ok_or_else(|| OracleError::Calculation(format!("{} 의 음력 월을 찾지 못했습니다", date)))
}

/// 음력 → 양력.
pub fn lunar_to_solar(date: &LunarDate) -> OracleResult<NaiveDate> {
    ensure_supported(date.year)?;
    let month = [date.year, date.year + 1]
        .into_iter()
        .flat_map(months_of_sui)
        .find(|m| m.year == date.year && m.number == date.month && m.is_leap == date.is_leap_month)
        .ok_or_else(|| {
            OracleError::InvalidLunarDate(format!(
                "{}년에 {}{}월이 없습니다",
                date.year,
                if date.is_leap_month { "윤" } else { "" },
                date.month
            ))
        })?;

    if date.day == 0 || date.day > month.days {
        return Err(OracleError::InvalidLunarDate(format!(
            "{}년 {}월은 {}일까지입니다: {}일",
            date.year, date.month, month.days, date.day
        )));
    }

    date_of_day_number(month.first_day + date.day as i64 - 1)
        .ok_or_else(|| OracleError::Calculation(format!("날짜 변환 실패: {}", date)))
}

/// 해당 음력 연도의 윤달 번호.
pub fn leap_month_of(year: i32) -> Option<u32> {
    [year, year + 1]
        .into_iter()
        .flat_map(months_of_sui)
        .find(|m| m.year == year && m.is_leap)
        .map(|m| m.number)
}
