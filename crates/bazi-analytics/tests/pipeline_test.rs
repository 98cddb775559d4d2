//! 명반 → K선 파이프라인 통합 테스트.

use bazi_analytics::{ChartContext, ChartEngine, KLineGenerator};
use bazi_calendar::AstronomicalOracle;
use bazi_core::{
    BirthInput, CalendarOracle, ChartError, EightChar, GanZhi, LunarDate, OracleError,
    OraclePillar, OracleResult, RelationTag, Strength, Trend,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn engine() -> ChartEngine<AstronomicalOracle> {
    ChartEngine::new(AstronomicalOracle::new())
}

fn beijing_input() -> BirthInput {
    BirthInput::from_json(
        r#"{
            "name": "测试",
            "gender": "male",
            "calendar": "solar",
            "date": { "year": 1990, "month": 1, "day": 1 },
            "time": { "mode": "exact", "hour": 12, "minute": 0 },
            "location": { "province": "北京", "city": "北京", "longitude": 116.46 }
        }"#,
    )
    .unwrap()
}

fn input_at(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    lon: f64,
    gender: &str,
) -> BirthInput {
    let raw = format!(
        r#"{{
            "name": "P",
            "gender": "{gender}",
            "calendar": "solar",
            "date": {{ "year": {year}, "month": {month}, "day": {day} }},
            "time": {{ "mode": "exact", "hour": {hour}, "minute": {minute} }},
            "location": {{ "province": "X", "city": "Y", "longitude": {lon} }}
        }}"#
    );
    BirthInput::from_json(&raw).unwrap()
}

// =============================================================================
// 명반
// =============================================================================

#[test]
fn test_beijing_paipan() {
    let paipan = engine().paipan(&beijing_input()).unwrap();

    assert_eq!(paipan.solar.longitude_delta_minutes, -14.2);
    assert_eq!(
        paipan.solar.corrected_ymd_hms.format("%Y-%m-%d %H:%M:%S").to_string(),
        "1990-01-01 11:45:50"
    );
    assert_eq!(paipan.lunar.ymd, "1989-12-05");
    assert!(!paipan.lunar.is_leap_month);

    let gz: Vec<String> = paipan
        .four_pillars
        .iter()
        .map(|p| p.ganzhi().unwrap().to_string())
        .collect();
    assert_eq!(gz, vec!["己巳", "丙子", "丙寅", "甲午"]);
    assert_eq!(paipan.four_pillars.day.stem_ten_god, "日主");
    assert_eq!(paipan.four_pillars.day.shen_sha, vec!["冲申", "煞北"]);

    // 丙火: 子월(水) 월령 없음, 巳·寅 지장간 丙 통근 → 2점
    assert_eq!(paipan.overall.day_master_strength, Strength::Medium);
    let fav = &paipan.overall.favorable_elements;
    assert!(fav.iter().all(|e| !paipan.overall.unfavorable_elements.contains(e)));
}

#[test]
fn test_segment_input_note() {
    let input = BirthInput::from_json(
        r#"{
            "name": "子时",
            "gender": "female",
            "calendar": "solar",
            "date": { "year": 2000, "month": 6, "day": 15 },
            "time": { "mode": "segment", "label": "子时" },
            "location": { "province": "上海", "city": "上海", "longitude": 121.47 }
        }"#,
    )
    .unwrap();
    let paipan = engine().paipan(&input).unwrap();
    assert!(paipan.solar.time_note.contains("23:00-01:00"));
    assert_eq!(paipan.solar.ymd_hms.format("%H:%M").to_string(), "00:00");
}

#[test]
fn test_lunar_input_matches_solar() {
    let mut input = beijing_input();
    input.calendar = bazi_core::CalendarType::Lunar;
    input.date.year = 1989;
    input.date.month = 12;
    input.date.day = 5;

    let lunar = engine().paipan(&input).unwrap();
    let solar = engine().paipan(&beijing_input()).unwrap();
    assert_eq!(lunar.solar.corrected_ymd_hms, solar.solar.corrected_ymd_hms);
    assert_eq!(lunar.four_pillars, solar.four_pillars);
    assert_eq!(lunar.lunar.ymd, "1989-12-05");
}

#[test]
fn test_nonexistent_solar_day_is_rejected() {
    let mut input = beijing_input();
    input.date.month = 2;
    input.date.day = 30;
    let err = engine().paipan(&input).unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput(_)));
    assert!(err.is_input_error());
}

#[test]
fn test_invalid_fields_fail_before_derivation() {
    let mut input = beijing_input();
    input.date.month = 13;
    input.location.longitude = 150.0;
    let err = engine().paipan(&input).unwrap_err();
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, vec!["date.month", "location.longitude"]);
}

// =============================================================================
// K선
// =============================================================================

#[test]
fn test_compute_is_deterministic() {
    let a = engine().compute(&beijing_input()).unwrap();
    let b = engine().compute(&beijing_input()).unwrap();
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());

    let id = a.share_id().unwrap();
    assert_eq!(id.len(), 10);
    assert_eq!(id, b.share_id().unwrap());
}

#[test]
fn test_kline_shape() {
    let result = engine().compute(&beijing_input()).unwrap();
    let years = &result.kline.years;

    assert_eq!(years.len(), 100);
    assert_eq!(years[0].age, 1);
    assert_eq!(years[0].year, 1990);
    assert_eq!(years[0].stem_branch.to_string(), "庚午");
    assert_eq!(years[99].year, 2089);

    // 1세 시가는 강약 기준 점수 (中 = 70)
    assert_eq!(years[0].open, 70.0);
    assert!(years.iter().all(|y| y.score == y.close));

    let insight = &result.kline.insight;
    assert_eq!(insight.peaks.len(), 6);
    assert_eq!(insight.troughs.len(), 6);
    assert!(insight.peaks.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(insight.troughs.windows(2).all(|w| w[0].score <= w[1].score));
    assert_eq!(insight.ten_god_focus.len(), 4);
    assert!(insight.ten_god_focus.contains(&"日主".to_string()));

    assert!(!result.kline.stages.is_empty());
    for stage in &result.kline.stages {
        assert!((1..=100).contains(&stage.start_age));
        assert!(stage.summary.starts_with(stage.level.label()));
    }
}

#[test]
fn test_day_branch_clash_year() {
    let paipan = engine().paipan(&beijing_input()).unwrap();
    let ctx = ChartContext::from_paipan(&paipan);
    let generator = KLineGenerator::new();

    // 일지 寅을 충하는 申년
    let year: GanZhi = "壬申".parse().unwrap();
    let luck: GanZhi = "乙亥".parse().unwrap();
    let scored = generator.score_year(&ctx, Some(luck), year);
    assert_eq!(scored.year_factor, scored.year.score as f64 - 18.0);
    assert!(scored.tags.contains(&RelationTag::DayBranchClash));

    let result = generator.generate(&paipan);
    for y in result.years.iter().filter(|y| y.stem_branch.branch().label() == "申") {
        assert!(y.has_tag(RelationTag::DayBranchClash), "age {}", y.age);
    }
}

// =============================================================================
// 오라클 대체 경로
// =============================================================================

/// 고정된 팔자만 돌려주는 오라클 (대운 기능 없음).
struct FixedOracle {
    chart: EightChar,
}

impl FixedOracle {
    fn new(pillars: [&str; 4]) -> Self {
        let to_pillar = |s: &str| {
            let gz: GanZhi = s.parse().unwrap();
            OraclePillar {
                stem: Some(gz.stem()),
                branch: Some(gz.branch()),
                hidden_stems: gz.branch().hidden_stems().to_vec(),
                ..Default::default()
            }
        };
        Self {
            chart: EightChar {
                year: to_pillar(pillars[0]),
                month: to_pillar(pillars[1]),
                day: to_pillar(pillars[2]),
                hour: to_pillar(pillars[3]),
            },
        }
    }
}

impl CalendarOracle for FixedOracle {
    fn name(&self) -> &str {
        "fixed"
    }

    fn lunar_to_solar(&self, date: &LunarDate) -> OracleResult<NaiveDate> {
        Err(OracleError::Unsupported(date.to_string()))
    }

    fn solar_to_lunar(&self, date: NaiveDate) -> OracleResult<LunarDate> {
        Ok(LunarDate::new(date.year(), 1, 1, false))
    }

    fn eight_char(&self, _moment: NaiveDateTime) -> OracleResult<EightChar> {
        Ok(self.chart.clone())
    }
}

#[test]
fn test_fallback_luck_from_month_pillar() {
    let engine = ChartEngine::new(FixedOracle::new(["己巳", "丙子", "丙寅", "甲午"]));
    let paipan = engine.paipan(&beijing_input()).unwrap();

    // 丙 양간 + 남자 → 순행, 기운 1세
    assert_eq!(paipan.overall.start_luck_age, 1);
    assert_eq!(paipan.overall.luck_direction, bazi_core::LuckDirection::Forward);
    assert_eq!(paipan.luck_periods.len(), 11);
    assert_eq!(paipan.luck_periods[0].stem_branch.to_string(), "丙子");
    assert_eq!(paipan.luck_periods[1].stem_branch.to_string(), "丁丑");
    assert_eq!(paipan.luck_periods[0].start_year, 1990);

    // 오라클이 십신을 주지 않음
    assert_eq!(paipan.four_pillars.year.stem_ten_god, "");

    let kline = engine.kline(&paipan);
    assert_eq!(kline.years.len(), 100);
    assert_eq!(kline.stages.len(), 10);
    assert!(kline.insight.ten_god_focus.is_empty());
}

#[test]
fn test_lunar_input_without_oracle_support() {
    let engine = ChartEngine::new(FixedOracle::new(["己巳", "丙子", "丙寅", "甲午"]));
    let mut input = beijing_input();
    input.calendar = bazi_core::CalendarType::Lunar;
    let err = engine.paipan(&input).unwrap_err();
    assert!(matches!(err, ChartError::Oracle(OracleError::Unsupported(_))));
}

#[test]
fn test_missing_day_master_is_fatal() {
    let mut oracle = FixedOracle::new(["己巳", "丙子", "丙寅", "甲午"]);
    oracle.chart.day.stem = None;
    let err = ChartEngine::new(oracle).paipan(&beijing_input()).unwrap_err();
    assert!(matches!(err, ChartError::MissingDayMaster(_)));
}

// =============================================================================
// 성질 테스트
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_candles_are_bounded_and_continuous(
        year in 1900i32..2100,
        month in 1i32..=12,
        day in 1i32..=28,
        hour in 0i32..24,
        minute in 0i32..60,
        lon in 75.0f64..135.0,
        male in any::<bool>(),
    ) {
        let gender = if male { "male" } else { "female" };
        let result = engine()
            .compute(&input_at(year, month, day, hour, minute, lon, gender))
            .unwrap();
        let paipan = &result.paipan;
        let years = &result.kline.years;

        prop_assert_eq!(years.len(), 100);
        for (i, y) in years.iter().enumerate() {
            prop_assert!(0.0 <= y.low);
            prop_assert!(y.low <= y.open.min(y.close));
            prop_assert!(y.open.max(y.close) <= y.high);
            prop_assert!(y.high <= 100.0);
            prop_assert_eq!(y.trend == Trend::Up, y.close >= y.open);
            if i > 0 {
                prop_assert_eq!(y.open, years[i - 1].close);
            }
        }

        for age in 1..=100u32 {
            prop_assert!(paipan.luck_periods.iter().any(|p| p.contains_age(age)), "age {}", age);
        }

        let overall = &paipan.overall;
        prop_assert!(overall
            .favorable_elements
            .iter()
            .all(|e| !overall.unfavorable_elements.contains(e)));
    }
}
