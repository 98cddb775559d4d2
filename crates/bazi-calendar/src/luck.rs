//! 대운(大运) 배열.
//!
//! 방향은 연간 음양과 성별로 정하고, 기운 나이는 출생 시각에서 다음(순행)
//! 또는 직전(역행) 절(节)까지의 일수를 3일 = 1년으로 환산합니다.

use bazi_core::{Gender, GanZhi, LuckDirection, LuckPeriod, Stem};

use crate::astro::{solar_term_jde, sun_longitude, TROPICAL_YEAR};

/// 대운 한 구간의 햇수.
pub const DECADE_YEARS: u32 = 10;

/// 생성하는 대운 수 (기운 전 구간 제외).
pub const DECADE_COUNT: u32 = 10;

/// 절기 중 절(节)의 황경 오프셋: 15° + 30°k.
const JIE_OFFSET: f64 = 15.0;

/// 양남음녀 순행, 음남양녀 역행.
pub fn direction(year_stem: Stem, gender: Gender) -> LuckDirection {
    match (year_stem.is_yang(), gender) {
        (true, Gender::Male) | (false, Gender::Female) => LuckDirection::Forward,
        _ => LuckDirection::Reverse,
    }
}

/// 출생 JDE에서 기준 절까지의 일수.
pub fn days_to_jie(jde: f64, direction: LuckDirection) -> f64 {
    let lon = sun_longitude(jde);
    let since_jie = (lon - JIE_OFFSET).rem_euclid(30.0);
    let term = match direction {
        LuckDirection::Forward => {
            let ahead = 30.0 - since_jie;
            solar_term_jde(lon + ahead, jde + ahead * TROPICAL_YEAR / 360.0)
        }
        LuckDirection::Reverse => {
            solar_term_jde(lon - since_jie, jde - since_jie * TROPICAL_YEAR / 360.0)
        }
    };
    (term - jde).abs()
}

/// 기운 나이 (가세). `1 + floor(일수 / 3)`
pub fn start_age(jde: f64, direction: LuckDirection) -> u32 {
    1 + (days_to_jie(jde, direction) / 3.0).floor() as u32
}

/// 대운 목록.
///
/// 기운 나이가 1보다 크면 `1..start_age-1` 구간을 월주 간지로 먼저 둡니다.
/// 이후 10년마다 월주에서 한 칸씩 진행합니다.
pub fn periods(
    birth_year: i32,
    start_age: u32,
    month: GanZhi,
    direction: LuckDirection,
) -> Vec<LuckPeriod> {
    let mut out = Vec::with_capacity(DECADE_COUNT as usize + 1);
    if start_age > 1 {
        out.push(LuckPeriod::spanning(birth_year, 1, start_age - 1, month));
    }
    for i in 0..DECADE_COUNT {
        let age = start_age + i * DECADE_YEARS;
        out.push(LuckPeriod::spanning(
            birth_year,
            age,
            age + DECADE_YEARS - 1,
            month.step(direction.step() * (i as i64 + 1)),
        ));
    }
    out
}
