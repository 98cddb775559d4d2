//! 명반 + K선 파이프라인.
//!
//! 입력 검증 → 시간 정규화 → 양력 날짜 확정 → 진태양시 보정 → 음력 변환
//! → 팔자 → 네 기둥 → 강약 → 대운 → [`PaipanResult`] → [`KLineResult`].

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use bazi_core::{
    chart_span, BirthInput, CalendarOracle, CalendarType, ChartConfig, ChartError, ChartResult,
    Computation, KLineResult, LunarDate, LunarInfo, Overall, PaipanResult, SolarInfo,
};

use crate::chart::{LuckAssembler, LuckRequest, PillarBuilder, StrengthEvaluator};
use crate::kline::KLineGenerator;
use crate::normalizer::normalize;
use crate::solar_time::SolarTimeCorrector;

/// 명반 엔진.
///
/// 상태가 없으므로 하나의 엔진을 여러 스레드에서 공유할 수 있습니다.
pub struct ChartEngine<O: CalendarOracle> {
    oracle: O,
    corrector: SolarTimeCorrector,
    pillars: PillarBuilder,
    strength: StrengthEvaluator,
    luck: LuckAssembler,
    kline: KLineGenerator,
}

impl<O: CalendarOracle> ChartEngine<O> {
    /// 기본 설정으로 엔진을 생성합니다.
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, &ChartConfig::default())
    }

    /// 설정을 지정해 엔진을 생성합니다.
    pub fn with_config(oracle: O, config: &ChartConfig) -> Self {
        Self {
            oracle,
            corrector: SolarTimeCorrector::from_config(config),
            pillars: PillarBuilder::new(),
            strength: StrengthEvaluator::new(),
            luck: LuckAssembler::new(),
            kline: KLineGenerator::new(),
        }
    }

    /// 명반을 계산합니다.
    ///
    /// # Errors
    ///
    /// - `ChartError::Validation`: 입력 검증 실패
    /// - `ChartError::InvalidInput`: 존재하지 않는 양력 날짜
    /// - `ChartError::Oracle`: 음력 변환/팔자 계산 실패
    /// - `ChartError::MissingDayMaster`: 일간/일지 누락
    pub fn paipan(&self, input: &BirthInput) -> ChartResult<PaipanResult> {
        let span = chart_span!("paipan", input.name, input.calendar);
        let _guard = span.enter();

        input.ensure_valid()?;

        let time = normalize(&input.time)?;
        let date = self.civil_date(input)?;
        let local = date
            .and_hms_opt(time.hour, time.minute, 0)
            .ok_or_else(|| {
                ChartError::InvalidInput(format!("시각: {:02}:{:02}", time.hour, time.minute))
            })?;
        debug!(%local, note = %time.note, "birth moment normalized");

        let correction = self.corrector.correct(local, input.location.longitude);
        let corrected = correction.corrected;
        debug!(%corrected, delta_minutes = correction.delta_minutes, "solar time corrected");

        let lunar = self.oracle.solar_to_lunar(corrected.date())?;
        let chart = self.oracle.eight_char(corrected)?;
        let four_pillars = self.pillars.build(&chart)?;

        let evaluation = self.strength.evaluate(&four_pillars);
        debug!(
            score = evaluation.score,
            strength = %evaluation.strength,
            "day master evaluated"
        );

        let luck = self.luck.assemble(
            &self.oracle,
            &LuckRequest {
                moment: corrected,
                gender: input.gender,
                day_master: four_pillars.day_master.stem,
                month: four_pillars.month.ganzhi(),
                birth_year: corrected.year(),
            },
        );

        let result = PaipanResult {
            input: input.clone(),
            solar: SolarInfo {
                ymd_hms: local,
                corrected_ymd_hms: corrected,
                longitude_delta_minutes: correction.display_delta(),
                time_note: time.note,
            },
            lunar: LunarInfo {
                ymd: lunar.to_string(),
                is_leap_month: lunar.is_leap_month,
            },
            four_pillars,
            overall: Overall {
                day_master_strength: evaluation.strength,
                favorable_elements: evaluation.favorable,
                unfavorable_elements: evaluation.unfavorable,
                start_luck_age: luck.start_age,
                luck_direction: luck.direction,
            },
            luck_periods: luck.periods,
        };

        info!(
            oracle = self.oracle.name(),
            day_master = %result.four_pillars.day_master.stem,
            periods = result.luck_periods.len(),
            "✅ paipan complete"
        );
        Ok(result)
    }

    /// 명반에서 K선을 생성합니다.
    pub fn kline(&self, paipan: &PaipanResult) -> KLineResult {
        self.kline.generate(paipan)
    }

    /// 명반과 K선을 함께 계산합니다.
    pub fn compute(&self, input: &BirthInput) -> ChartResult<Computation> {
        let paipan = self.paipan(input)?;
        let kline = self.kline(&paipan);
        Ok(Computation { paipan, kline })
    }

    /// 입력 날짜를 양력으로 확정합니다.
    fn civil_date(&self, input: &BirthInput) -> ChartResult<NaiveDate> {
        let d = &input.date;
        match input.calendar {
            CalendarType::Solar => u32::try_from(d.month)
                .ok()
                .zip(u32::try_from(d.day).ok())
                .and_then(|(m, day)| NaiveDate::from_ymd_opt(d.year, m, day))
                .ok_or_else(|| {
                    ChartError::InvalidInput(format!(
                        "존재하지 않는 날짜: {}-{:02}-{:02}",
                        d.year, d.month, d.day
                    ))
                }),
            CalendarType::Lunar => {
                let lunar = LunarDate::new(
                    d.year,
                    u32::try_from(d.month).unwrap_or_default(),
                    u32::try_from(d.day).unwrap_or_default(),
                    input.is_leap_month(),
                );
                let solar = self.oracle.lunar_to_solar(&lunar)?;
                debug!(%lunar, %solar, "lunar date converted");
                Ok(solar)
            }
        }
    }
}

impl<O: CalendarOracle + Default> Default for ChartEngine<O> {
    fn default() -> Self {
        Self::new(O::default())
    }
}
