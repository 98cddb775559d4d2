//! 진태양시(真太阳时) 보정.
//!
//! **계산식**: `delta_minutes = (경도 - 표준 자오선) × 분/도`
//!
//! 기본값은 동경 120°, 1°당 4분입니다. 보정은 밀리초 단위로 적용하며
//! 자정을 넘으면 날짜도 함께 바뀝니다.

use chrono::{Duration, NaiveDateTime};

use bazi_core::ChartConfig;

/// 보정 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCorrection {
    pub corrected: NaiveDateTime,
    /// 보정 분 (반올림 전)
    pub delta_minutes: f64,
}

impl SolarCorrection {
    /// 표시용 보정 분 (소수 첫째 자리 반올림).
    pub fn display_delta(&self) -> f64 {
        (self.delta_minutes * 10.0).round() / 10.0
    }
}

/// 진태양시 보정기.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTimeCorrector {
    standard_meridian: f64,
    minutes_per_degree: f64,
}

impl Default for SolarTimeCorrector {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl SolarTimeCorrector {
    /// 설정에서 생성합니다.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            standard_meridian: config.standard_meridian,
            minutes_per_degree: config.minutes_per_degree,
        }
    }

    /// 경도 보정 분.
    pub fn delta_minutes(&self, longitude: f64) -> f64 {
        (longitude - self.standard_meridian) * self.minutes_per_degree
    }

    /// 현지 시각을 진태양시로 보정합니다.
    pub fn correct(&self, local: NaiveDateTime, longitude: f64) -> SolarCorrection {
        let delta_minutes = self.delta_minutes(longitude);
        let offset = Duration::milliseconds((delta_minutes * 60_000.0).round() as i64);
        SolarCorrection {
            corrected: local + offset,
            delta_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_beijing_correction() {
        let c = SolarTimeCorrector::default().correct(at(1990, 1, 1, 12, 0), 116.46);
        assert!((c.delta_minutes - (-14.16)).abs() < 1e-9);
        assert_eq!(c.display_delta(), -14.2);
        assert_eq!(
            c.corrected.format("%Y-%m-%d %H:%M:%S").to_string(),
            "1990-01-01 11:45:50"
        );
    }

    #[test]
    fn test_standard_meridian_is_identity() {
        let local = at(2000, 6, 1, 8, 0);
        let c = SolarTimeCorrector::default().correct(local, 120.0);
        assert_eq!(c.corrected, local);
        assert_eq!(c.delta_minutes, 0.0);
    }

    #[test]
    fn test_correction_rolls_date_back() {
        // 우루무치 근처 87.6°E → 약 -2시간 10분
        let c = SolarTimeCorrector::default().correct(at(2000, 1, 1, 1, 0), 87.6);
        assert_eq!(c.corrected.format("%Y-%m-%d %H:%M").to_string(), "1999-12-31 22:50");
    }

    #[test]
    fn test_custom_meridian() {
        let corrector = SolarTimeCorrector::from_config(&ChartConfig {
            standard_meridian: 105.0,
            minutes_per_degree: 4.0,
        });
        assert_eq!(corrector.delta_minutes(106.0), 4.0);
    }
}
