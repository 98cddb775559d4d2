//! 명반 모델 통합 테스트
//!
//! 직렬화 형태와 대운 조회 규칙을 공개 API로만 확인합니다.

use bazi_core::{
    BirthInput, Branch, DayMaster, Element, FourPillars, GanZhi, LuckDirection, LuckPeriod,
    LunarInfo, Overall, PaipanResult, PillarDetail, PillarKey, SolarInfo, Stem, Strength,
};
use chrono::NaiveDate;

fn pillar(key: PillarKey, gz: &str) -> PillarDetail {
    let gz: GanZhi = gz.parse().unwrap();
    PillarDetail {
        pillar: key,
        stem: Some(gz.stem()),
        branch: Some(gz.branch()),
        stem_ten_god: String::new(),
        branch_ten_god: String::new(),
        hidden_stems: gz.branch().hidden_stems().to_vec(),
        hidden_stem_ten_gods: Vec::new(),
        star_luck: String::new(),
        self_seat: String::new(),
        void: String::new(),
        na_yin: String::new(),
        shen_sha: Vec::new(),
    }
}

fn sample(periods: Vec<LuckPeriod>) -> PaipanResult {
    let input = BirthInput::from_json(
        r#"{
            "name": "모델",
            "gender": "female",
            "calendar": "solar",
            "date": { "year": 1990, "month": 1, "day": 1 },
            "time": { "mode": "segment", "label": "午时" },
            "location": { "province": "北京", "city": "北京", "longitude": 116.46 }
        }"#,
    )
    .unwrap();
    let moment = NaiveDate::from_ymd_opt(1990, 1, 1)
        .unwrap()
        .and_hms_opt(11, 45, 50)
        .unwrap();

    PaipanResult {
        input,
        solar: SolarInfo {
            ymd_hms: moment,
            corrected_ymd_hms: moment,
            longitude_delta_minutes: -14.2,
            time_note: String::new(),
        },
        lunar: LunarInfo {
            ymd: "1989-12-05".to_string(),
            is_leap_month: false,
        },
        four_pillars: FourPillars {
            year: pillar(PillarKey::Year, "己巳"),
            month: pillar(PillarKey::Month, "丙子"),
            day: pillar(PillarKey::Day, "丙寅"),
            hour: pillar(PillarKey::Hour, "甲午"),
            day_master: DayMaster {
                stem: Stem::Bing,
                element: Element::Fire,
            },
        },
        overall: Overall {
            day_master_strength: Strength::Medium,
            favorable_elements: vec![Element::Fire, Element::Earth],
            unfavorable_elements: vec![Element::Water],
            start_luck_age: 4,
            luck_direction: LuckDirection::Reverse,
        },
        luck_periods: periods,
    }
}

fn decades(start_age: u32) -> Vec<LuckPeriod> {
    let month: GanZhi = "丙子".parse().unwrap();
    (0..10)
        .map(|i| {
            let age = start_age + i * 10;
            LuckPeriod::spanning(1990, age, age + 9, month.step(-(i as i64) - 1))
        })
        .collect()
}

#[test]
fn test_json_shape_uses_camel_case_and_labels() {
    let value = serde_json::to_value(sample(decades(4))).unwrap();

    assert_eq!(value["solar"]["correctedYmdHms"], "1990-01-01 11:45:50");
    assert_eq!(value["solar"]["longitudeDeltaMinutes"], -14.2);
    assert!(value["solar"].get("timeNote").is_none());
    assert_eq!(value["lunar"]["isLeapMonth"], false);
    assert_eq!(value["fourPillars"]["dayMaster"]["stem"], "丙");
    assert_eq!(value["fourPillars"]["dayMaster"]["element"], "火");
    assert_eq!(value["fourPillars"]["month"]["stem"], "丙");
    assert_eq!(value["fourPillars"]["month"]["branch"], "子");
    assert_eq!(value["overall"]["dayMasterStrength"], "中");
    assert_eq!(value["overall"]["luckDirection"], "逆");
    assert_eq!(value["overall"]["favorableElements"][1], "土");
    assert_eq!(value["luckPeriods"][0]["stemBranch"], "乙亥");
    assert_eq!(value["input"]["time"]["mode"], "segment");
    assert_eq!(value["input"]["time"]["label"], "午时");
}

#[test]
fn test_json_roundtrip_preserves_model() {
    let original = sample(decades(4));
    let json = serde_json::to_string(&original).unwrap();
    let parsed: PaipanResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_birth_year_from_first_period() {
    assert_eq!(sample(decades(4)).birth_year(), 1990);
    assert_eq!(sample(Vec::new()).birth_year(), 1990);
}

#[test]
fn test_luck_period_lookup_edges() {
    let paipan = sample(decades(4));

    assert_eq!(paipan.luck_period_at(4).unwrap().start_age, 4);
    assert_eq!(paipan.luck_period_at(13).unwrap().start_age, 4);
    assert_eq!(paipan.luck_period_at(14).unwrap().start_age, 14);
    // 마지막 구간 이후 → 마지막 구간
    assert_eq!(paipan.luck_period_at(100).unwrap().start_age, 94);
    assert_eq!(paipan.luck_period_at(120).unwrap().start_age, 94);

    assert!(sample(Vec::new()).luck_period_at(1).is_none());
}

#[test]
fn test_luck_period_before_first_uses_last() {
    let paipan = sample(decades(5));
    let first = paipan.luck_periods[0].stem_branch;
    let last = paipan.luck_periods[9].stem_branch;
    assert_ne!(first, last);

    for age in 1..5 {
        let period = paipan.luck_period_at(age).unwrap();
        assert_eq!(period.start_age, 95);
        assert_eq!(period.stem_branch, last);
    }
    assert_eq!(paipan.luck_period_at(5).unwrap().stem_branch, first);
}

#[test]
fn test_natal_branches_in_pillar_order() {
    let paipan = sample(decades(4));
    assert_eq!(
        paipan.four_pillars.branches(),
        vec![Branch::Si, Branch::Zi, Branch::Yin, Branch::Wu]
    );
    assert_eq!(
        paipan.four_pillars.get(PillarKey::Day).ganzhi().unwrap().to_string(),
        "丙寅"
    );
}
