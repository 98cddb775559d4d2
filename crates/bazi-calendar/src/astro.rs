//! 천문 계산 기초.
//!
//! 율리우스일, ΔT, 태양 시황경, 삭(新月) 시각, 절기 시각을 해석적 공식으로
//! 구합니다. 정밀도는 분 단위이며 간지·음력 날짜 판정에 충분합니다.
//!
//! 모든 현지 시각은 UTC+8(베이징 시각)로 해석합니다.
//!
//! # 참고 공식
//!
//! - 태양: 저정밀 태양 이론 (평균 황경 + 중심차 + 장동/광행차 근사)
//! - 삭: 평균 삭망월 + 주요 주기항 25개
//! - ΔT: 장기 포물선 `-20 + 32u²` 초, `u = (연도 - 1820) / 100`

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// J2000.0 율리우스일.
pub const J2000: f64 = 2_451_545.0;

/// 1970-01-01 00:00 UT의 율리우스일.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// 0001-01-01 (proleptic Gregorian) 의 율리우스 적일 - 1.
const CE_DAY_OFFSET: i64 = 1_721_425;

/// 현지 시각의 UTC 오프셋 (일).
pub const LOCAL_OFFSET_DAYS: f64 = 8.0 / 24.0;

/// 회귀년 (일).
pub const TROPICAL_YEAR: f64 = 365.242_19;

/// 평균 삭망월 (일).
pub const SYNODIC_MONTH: f64 = 29.530_588_861;

/// 첫 평균 삭 (2000-01-06) 의 JDE.
const NEW_MOON_EPOCH: f64 = 2_451_550.097_66;

// =============================================================================
// 시각 변환
// =============================================================================

/// naive 시각을 UT로 보고 율리우스일을 구합니다.
pub fn julian_day(dt: NaiveDateTime) -> f64 {
    let millis = dt.and_utc().timestamp_millis() as f64;
    UNIX_EPOCH_JD + millis / 86_400_000.0
}

/// 대략적인 소수 연도 (ΔT 계산용).
fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// ΔT = TT - UT (초).
pub fn delta_t_seconds(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

fn delta_t_days(jd: f64) -> f64 {
    delta_t_seconds(decimal_year(jd)) / 86_400.0
}

/// 현지(UTC+8) 시각 → JDE(역학시).
pub fn local_to_jde(local: NaiveDateTime) -> f64 {
    let jd_ut = julian_day(local) - LOCAL_OFFSET_DAYS;
    jd_ut + delta_t_days(jd_ut)
}

/// JDE → 현지(UTC+8) 율리우스일.
pub fn jde_to_local_jd(jde: f64) -> f64 {
    jde - delta_t_days(jde) + LOCAL_OFFSET_DAYS
}

/// 현지 율리우스일이 속한 날짜의 율리우스 적일(JDN).
pub fn day_number(local_jd: f64) -> i64 {
    (local_jd + 0.5).floor() as i64
}

/// 날짜의 율리우스 적일.
pub fn day_number_of(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + CE_DAY_OFFSET
}

/// 율리우스 적일의 날짜.
pub fn date_of_day_number(jdn: i64) -> Option<NaiveDate> {
    i32::try_from(jdn - CE_DAY_OFFSET)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// 해당 날짜 현지 자정의 JDE.
pub fn local_midnight_jde(jdn: i64) -> f64 {
    let jd_ut = jdn as f64 - 0.5 - LOCAL_OFFSET_DAYS;
    jd_ut + delta_t_days(jd_ut)
}

// =============================================================================
// 태양
// =============================================================================

fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// 각도 차이를 (-180, 180] 으로 정규화합니다.
fn signed_degrees(deg: f64) -> f64 {
    let d = normalize_degrees(deg);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// 태양의 시황경 (도, [0, 360)).
pub fn sun_longitude(jde: f64) -> f64 {
    let t = (jde - J2000) / 36_525.0;
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_degrees(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// 태양 황경이 `target`(도)이 되는 JDE를 `guess` 근처에서 찾습니다.
pub fn solar_term_jde(target: f64, guess: f64) -> f64 {
    let mut jde = guess;
    for _ in 0..50 {
        let step = signed_degrees(target - sun_longitude(jde)) * TROPICAL_YEAR / 360.0;
        jde += step;
        if step.abs() < 1e-7 {
            break;
        }
    }
    jde
}

/// 그레고리력 `year`년 동지(270°)가 드는 현지 날짜의 JDN.
pub fn winter_solstice_day(year: i32) -> i64 {
    let guess = NaiveDate::from_ymd_opt(year, 12, 21)
        .map(|d| day_number_of(d) as f64)
        .unwrap_or(J2000 + (year - 2000) as f64 * TROPICAL_YEAR + 355.0);
    day_number(jde_to_local_jd(solar_term_jde(270.0, guess)))
}

/// 그레고리력 `year`년 입춘(315°) 의 JDE.
pub fn lichun_jde(year: i32) -> f64 {
    let guess = NaiveDate::from_ymd_opt(year, 2, 4)
        .map(|d| day_number_of(d) as f64)
        .unwrap_or(J2000 + (year - 2000) as f64 * TROPICAL_YEAR + 34.0);
    solar_term_jde(315.0, guess)
}

/// 해당 날짜 자정의 중기(中气) 구간 번호 `floor(황경 / 30)`.
pub fn principal_term_index(jdn: i64) -> i64 {
    (sun_longitude(local_midnight_jde(jdn)) / 30.0).floor() as i64
}

// =============================================================================
// 달
// =============================================================================

/// 삭 번호 `k`(2000-01-06 = 0) 의 삭 시각 JDE.
pub fn new_moon_jde(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let jde = NEW_MOON_EPOCH + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.553_4 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.564_3 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.710_8 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let omega = (124.774_6 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * mp.sin()
        + 0.172_41 * e * m.sin()
        + 0.016_08 * (2.0 * mp).sin()
        + 0.010_39 * (2.0 * f).sin()
        + 0.007_39 * e * (mp - m).sin()
        - 0.005_14 * e * (mp + m).sin()
        + 0.002_08 * e * e * (2.0 * m).sin()
        - 0.001_11 * (mp - 2.0 * f).sin()
        - 0.000_57 * (mp + 2.0 * f).sin()
        + 0.000_56 * e * (2.0 * mp + m).sin()
        - 0.000_42 * (3.0 * mp).sin()
        + 0.000_42 * e * (m + 2.0 * f).sin()
        + 0.000_38 * e * (m - 2.0 * f).sin()
        - 0.000_24 * e * (2.0 * mp - m).sin()
        - 0.000_17 * omega.sin()
        - 0.000_07 * (mp + 2.0 * m).sin()
        + 0.000_04 * (2.0 * mp - 2.0 * f).sin()
        + 0.000_04 * (3.0 * m).sin()
        + 0.000_03 * (mp + m - 2.0 * f).sin()
        + 0.000_03 * (2.0 * mp + 2.0 * f).sin()
        - 0.000_03 * (mp + m + 2.0 * f).sin()
        + 0.000_03 * (mp - m + 2.0 * f).sin()
        - 0.000_02 * (mp - m - 2.0 * f).sin()
        - 0.000_02 * (3.0 * mp + m).sin()
        + 0.000_02 * (4.0 * mp).sin();

    jde + correction
}

/// 삭 번호 `k`의 삭이 드는 현지 날짜 JDN.
pub fn new_moon_day(k: i64) -> i64 {
    day_number(jde_to_local_jd(new_moon_jde(k)))
}

/// `jdn` 당일 또는 그 이전의 가장 가까운 삭. `(k, 삭 날짜 JDN)`
pub fn new_moon_on_or_before(jdn: i64) -> (i64, i64) {
    let mut k = ((jdn as f64 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() as i64 + 1;
    loop {
        let day = new_moon_day(k);
        if day <= jdn {
            return (k, day);
        }
        k -= 1;
    }
}
