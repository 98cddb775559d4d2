//! 대운 단계 요약 문구.
//!
//! 문구 선택은 시드 기반입니다: `seed = 간지 두 글자의 코드 포인트 합 + 점수`,
//! 문구 = `pool[seed % pool.len()]`. 같은 입력이면 항상 같은 문구가 나옵니다.

use bazi_core::{GanZhi, LuckStage, StageLevel, Strength, TenGod};

use super::relation::RelationLabel;

/// 데이터가 없는 구간의 점수.
pub const EMPTY_STAGE_SCORE: u32 = 60;

// =============================================================================
// 문구 풀
// =============================================================================

const STRONG_PHRASES: [&str; 3] = [
    "运势上扬，主动出击正当时",
    "势能充沛，宜扩展格局",
    "顺风顺水，可加大投入",
];
const STEADY_PHRASES: [&str; 3] = [
    "起伏有度，稳中求进",
    "节奏平缓，积累为主",
    "守成有余，静待时机",
];
const WEAK_PHRASES: [&str; 3] = [
    "阻力偏大，宜收缩防守",
    "波折较多，先求自保",
    "压力上升，需要耐心",
];

const STRONG_ADVICE: [&str; 3] = ["把握节奏，顺势布局", "主动争取，扩大战果", "乘势而上，适度进取"];
const STEADY_ADVICE: [&str; 3] = ["稳健推进，重视复利", "夯实基础，循序渐进", "守正出奇，积小成多"];
const WEAK_ADVICE: [&str; 3] = ["控制风险，先守后攻", "收缩战线，保存实力", "修身养性，厚积薄发"];

const STRONG_RISKS: [&str; 3] = ["刚愎冒进", "树大招风", "过度扩张"];
const MEDIUM_RISKS: [&str; 3] = ["犹豫反复", "节奏失衡", "精力分散"];
const WEAK_RISKS: [&str; 3] = ["情绪波动", "决策保守", "精力透支"];

fn phrases(level: StageLevel) -> &'static [&'static str] {
    match level {
        StageLevel::Strong => &STRONG_PHRASES,
        StageLevel::Steady => &STEADY_PHRASES,
        StageLevel::Weak => &WEAK_PHRASES,
    }
}

fn advice_pool(level: StageLevel) -> &'static [&'static str] {
    match level {
        StageLevel::Strong => &STRONG_ADVICE,
        StageLevel::Steady => &STEADY_ADVICE,
        StageLevel::Weak => &WEAK_ADVICE,
    }
}

fn risk_pool(strength: Strength) -> &'static [&'static str] {
    match strength {
        Strength::Strong => &STRONG_RISKS,
        Strength::Medium => &MEDIUM_RISKS,
        Strength::Weak => &WEAK_RISKS,
    }
}

fn relation_suffix(label: RelationLabel) -> &'static str {
    match label {
        RelationLabel::Favorable => "，大运喜用加持",
        RelationLabel::Neutral => "，大运中性",
        RelationLabel::Unfavorable => "，大运忌神当令",
    }
}

fn ten_god_hint(god: TenGod) -> &'static str {
    match god {
        TenGod::Companion => "借助同伴之力",
        TenGod::RobWealth => "留意合伙分利",
        TenGod::EatingGod => "发挥才艺口碑",
        TenGod::HurtingOfficer => "注意言辞锋芒",
        TenGod::IndirectWealth => "把握偏门机会",
        TenGod::DirectWealth => "稳守本业收入",
        TenGod::SevenKillings => "化压力为动力",
        TenGod::DirectOfficer => "遵循规则秩序",
        TenGod::IndirectResource => "深耕专业技能",
        TenGod::DirectResource => "重视学习贵人",
    }
}

/// `pool[seed % len]`.
pub fn pick<'a>(pool: &[&'a str], seed: u64) -> &'a str {
    pool[(seed % pool.len() as u64) as usize]
}

/// 간지 글자 코드 포인트 합 + 점수.
pub fn stage_seed(gz: GanZhi, score: u32) -> u64 {
    let chars: u64 = gz.to_string().chars().map(|c| c as u64).sum();
    chars + score as u64
}

// =============================================================================
// 작성기
// =============================================================================

/// 단계 문구 입력.
#[derive(Debug, Clone)]
pub struct StageContext {
    /// 원국 천간 십신 (일주 제외)
    pub natal_ten_gods: Vec<TenGod>,
    pub strength: Strength,
}

/// 대운 단계 작성기.
#[derive(Debug, Clone)]
pub struct StageWriter {
    ctx: StageContext,
}

impl StageWriter {
    /// 새 작성기.
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }

    /// 대운 한 구간의 단계를 작성합니다.
    pub fn write(
        &self,
        start_age: u32,
        end_age: u32,
        gz: GanZhi,
        relation: RelationLabel,
        closes: &[f64],
    ) -> LuckStage {
        let score = if closes.is_empty() {
            EMPTY_STAGE_SCORE
        } else {
            let mean = closes.iter().sum::<f64>() / closes.len() as f64;
            mean.round().clamp(0.0, 100.0) as u32
        };
        let level = StageLevel::from_score(score);
        let seed = stage_seed(gz, score);

        LuckStage {
            start_age,
            end_age,
            stem_branch: gz,
            score,
            level,
            summary: self.summary(level, relation, seed),
            advice: self.advice(level, seed),
            risks: self.risks(level, relation, seed),
        }
    }

    fn summary(&self, level: StageLevel, relation: RelationLabel, seed: u64) -> String {
        format!(
            "{}：{}{}",
            level.label(),
            pick(phrases(level), seed),
            relation_suffix(relation)
        )
    }

    fn advice(&self, level: StageLevel, seed: u64) -> String {
        let base = pick(advice_pool(level), seed);
        if self.ctx.natal_ten_gods.is_empty() {
            return base.to_string();
        }
        let god = self.ctx.natal_ten_gods[(seed % self.ctx.natal_ten_gods.len() as u64) as usize];
        format!("{base}；{}", ten_god_hint(god))
    }

    /// 偏弱 → 두 개, 平稳 + 忌 → 한 개, 그 외 없음.
    fn risks(&self, level: StageLevel, relation: RelationLabel, seed: u64) -> Vec<String> {
        let pool = risk_pool(self.ctx.strength);
        let count = match (level, relation) {
            (StageLevel::Weak, _) => 2,
            (StageLevel::Steady, RelationLabel::Unfavorable) => 1,
            _ => 0,
        };
        (0..count).map(|i| pick(pool, seed + i).to_string()).collect()
    }
}
