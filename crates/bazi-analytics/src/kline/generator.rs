//! 인생 K선 생성기.
//!
//! 1~100세(가세) 각 해의 점수를 캔들(open/high/low/close)로 만듭니다.
//!
//! # 5개 팩터 (가중치 합계 = 1.0)
//!
//! 1. **원국 기준 (BASE)**: 0.20 - 일간 강약 (强 80, 中 70, 弱 58)
//! 2. **대운 (LUCK)**: 0.35 - 대운 간지의 희기 점수
//! 3. **유년 (YEAR)**: 0.30 - 유년 간지의 희기 점수 + 충일지/岁运并临 조정
//! 4. **합충 (CLASH)**: 0.10 - 원국·대운·유년 지지 합충
//! 5. **원국 분포 (PATTERN)**: 0.05 - 원국 오행 분포
//!
//! # 유년 조정
//!
//! - 유년 지지가 일지를 충: -18 (0~100 클램프), 태그 `冲日支`
//! - 유년 간지 == 대운 간지: 유년이 희용이면 +15, 아니면 -15, 태그 `岁运并临`
//!
//! # 변동폭
//!
//! `min(8, round(|luck - 65| / 5)) + min(12, |clash.delta| + 6·[충일지])`

use tracing::debug;

use bazi_core::{
    Branch, Element, GanZhi, KLineResult, PaipanResult, RelationTag, TenGod, Trend, YearKLine,
};

use super::insight;
use super::relation::{
    base_score, clash_factor, ganzhi_relation, pattern_adjustment, ClashFactor, RelationScore,
};
use super::stages::{StageContext, StageWriter};

/// K선 나이 범위.
pub const FIRST_AGE: u32 = 1;
pub const LAST_AGE: u32 = 100;

/// 유년 지지가 일지를 충할 때의 감점.
const DAY_CLASH_PENALTY: f64 = 18.0;
/// 岁运并临 가감.
const COINCIDE_SWING: f64 = 15.0;
/// 대운 변동폭 상한.
const LUCK_VOL_CAP: u32 = 8;
/// 유년 변동폭 상한.
const YEAR_VOL_CAP: u32 = 12;
/// 충일지 변동폭 가산.
const DAY_CLASH_VOL: u32 = 6;

fn clamp_score(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

// =============================================================================
// 가중치와 원국 문맥
// =============================================================================

/// 팩터 가중치.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub base: f64,    // BASE: 0.20
    pub luck: f64,    // LUCK: 0.35
    pub year: f64,    // YEAR: 0.30
    pub clash: f64,   // CLASH: 0.10
    pub pattern: f64, // PATTERN: 0.05
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            base: 0.20,
            luck: 0.35,
            year: 0.30,
            clash: 0.10,
            pattern: 0.05,
        }
    }
}

/// 연도와 무관하게 한 번만 계산하는 원국 값.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartContext {
    pub base: u32,
    pub favorable: Vec<Element>,
    pub unfavorable: Vec<Element>,
    pub natal_branches: Vec<Branch>,
    pub day_branch: Option<Branch>,
    pub pattern: u32,
}

impl ChartContext {
    /// 명반에서 문맥을 만듭니다.
    pub fn from_paipan(paipan: &PaipanResult) -> Self {
        let pillars = &paipan.four_pillars;
        let natal_elements = pillars.iter().flat_map(|p| {
            p.stem
                .map(|s| s.element())
                .into_iter()
                .chain(p.branch.map(|b| b.element()))
        });

        Self {
            base: base_score(paipan.overall.day_master_strength),
            favorable: paipan.overall.favorable_elements.clone(),
            unfavorable: paipan.overall.unfavorable_elements.clone(),
            natal_branches: pillars.branches(),
            day_branch: pillars.day.branch,
            pattern: pattern_adjustment(natal_elements),
        }
    }
}

/// 한 해의 점수 구성.
#[derive(Debug, Clone, PartialEq)]
pub struct YearScore {
    pub luck: RelationScore,
    pub year: RelationScore,
    /// 조정 후 유년 팩터
    pub year_factor: f64,
    pub clash: ClashFactor,
    pub day_branch_clash: bool,
    pub tags: Vec<RelationTag>,
    /// 가중 합 (0~100)
    pub close: f64,
}

impl YearScore {
    /// 변동폭.
    pub fn volatility(&self) -> f64 {
        let luck_vol = ((self.luck.score as f64 - 65.0).abs() / 5.0).round() as u32;
        let year_vol = self.clash.delta.unsigned_abs()
            + if self.day_branch_clash { DAY_CLASH_VOL } else { 0 };
        (luck_vol.min(LUCK_VOL_CAP) + year_vol.min(YEAR_VOL_CAP)) as f64
    }
}

// =============================================================================
// 생성기
// =============================================================================

/// 인생 K선 생성기.
#[derive(Debug, Clone, Default)]
pub struct KLineGenerator {
    weights: FactorWeights,
}

impl KLineGenerator {
    /// 기본 가중치로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 명반에서 K선·대운 단계·인사이트를 생성합니다.
    pub fn generate(&self, paipan: &PaipanResult) -> KLineResult {
        let ctx = ChartContext::from_paipan(paipan);
        let birth_year = paipan.birth_year();
        let mut prev_close = clamp_score(ctx.base as f64);
        let mut years = Vec::with_capacity(LAST_AGE as usize);

        for age in FIRST_AGE..=LAST_AGE {
            let year = birth_year + age as i32 - 1;
            let year_gz = GanZhi::for_year(year);
            let luck_gz = paipan.luck_period_at(age).map(|p| p.stem_branch);
            let scored = self.score_year(&ctx, luck_gz, year_gz);

            let open = prev_close;
            let close = scored.close;
            let vol = scored.volatility();
            let trend = if close >= open { Trend::Up } else { Trend::Down };

            years.push(YearKLine {
                age,
                year,
                stem_branch: year_gz,
                open,
                high: clamp_score(open.max(close) + vol),
                low: clamp_score(open.min(close) - vol),
                close,
                score: close,
                trend,
                tags: scored.tags,
                brief: brief_label(trend).to_string(),
            });
            prev_close = close;
        }

        let writer = StageWriter::new(StageContext {
            natal_ten_gods: paipan
                .four_pillars
                .iter()
                .filter_map(|p| TenGod::from_label(&p.stem_ten_god))
                .collect(),
            strength: paipan.overall.day_master_strength,
        });
        let stages = paipan
            .luck_periods
            .iter()
            .filter(|p| (FIRST_AGE..=LAST_AGE).contains(&p.start_age))
            .map(|p| {
                let closes: Vec<f64> = years
                    .iter()
                    .filter(|y| p.contains_age(y.age))
                    .map(|y| y.close)
                    .collect();
                let relation = ganzhi_relation(&ctx.favorable, &ctx.unfavorable, p.stem_branch);
                writer.write(p.start_age, p.end_age, p.stem_branch, relation.label, &closes)
            })
            .collect::<Vec<_>>();

        let insight = insight::summarize(&years, &paipan.four_pillars);
        debug!(
            birth_year,
            stages = stages.len(),
            total_score = insight.total_score,
            "k-line generated"
        );

        KLineResult {
            years,
            stages,
            insight,
        }
    }

    /// 한 해의 점수를 계산합니다.
    ///
    /// 대운이 없으면 대운 관계는 중립(65)이고 합충 계산에서 대운 지지를 뺍니다.
    pub fn score_year(&self, ctx: &ChartContext, luck: Option<GanZhi>, year: GanZhi) -> YearScore {
        let luck_rel = luck
            .map(|gz| ganzhi_relation(&ctx.favorable, &ctx.unfavorable, gz))
            .unwrap_or(RelationScore::NEUTRAL);
        let year_rel = ganzhi_relation(&ctx.favorable, &ctx.unfavorable, year);
        let clash = clash_factor(&ctx.natal_branches, luck.map(GanZhi::branch), year.branch());

        let mut tags = clash.tags();
        let mut year_factor = year_rel.score as f64;

        let day_branch_clash = ctx.day_branch.is_some_and(|d| year.branch().clashes(d));
        if day_branch_clash {
            year_factor = clamp_score(year_factor - DAY_CLASH_PENALTY);
            tags.push(RelationTag::DayBranchClash);
        }
        if luck == Some(year) {
            let swing = if year_rel.is_favorable() { COINCIDE_SWING } else { -COINCIDE_SWING };
            year_factor = clamp_score(year_factor + swing);
            tags.push(RelationTag::LuckYearCoincide);
        }

        let w = &self.weights;
        let close = clamp_score(
            ctx.base as f64 * w.base
                + luck_rel.score as f64 * w.luck
                + year_factor * w.year
                + clash.score as f64 * w.clash
                + ctx.pattern as f64 * w.pattern,
        );

        YearScore {
            luck: luck_rel,
            year: year_rel,
            year_factor,
            clash,
            day_branch_clash,
            tags,
            close,
        }
    }
}

/// 캔들 방향 라벨.
pub fn brief_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "上行",
        Trend::Down => "回撤",
    }
}
