//! 오라클 기록 → 정규화된 네 기둥.

use tracing::warn;

use bazi_core::{
    Branch, ChartError, ChartResult, DayMaster, EightChar, FourPillars, OraclePillar, PillarDetail,
    PillarKey,
};

/// 기둥 빌더.
#[derive(Debug, Clone, Copy, Default)]
pub struct PillarBuilder;

impl PillarBuilder {
    /// 새 빌더.
    pub fn new() -> Self {
        Self
    }

    /// 네 기둥을 만듭니다.
    ///
    /// # Errors
    ///
    /// - `ChartError::MissingDayMaster`: 일간 또는 일지가 없음
    pub fn build(&self, chart: &EightChar) -> ChartResult<FourPillars> {
        let day_stem = chart
            .day
            .stem
            .ok_or_else(|| ChartError::MissingDayMaster("일간이 없습니다".to_string()))?;
        if chart.day.branch.is_none() {
            return Err(ChartError::MissingDayMaster("일지가 없습니다".to_string()));
        }

        Ok(FourPillars {
            year: self.build_pillar(PillarKey::Year, &chart.year),
            month: self.build_pillar(PillarKey::Month, &chart.month),
            day: self.build_pillar(PillarKey::Day, &chart.day),
            hour: self.build_pillar(PillarKey::Hour, &chart.hour),
            day_master: DayMaster {
                stem: day_stem,
                element: day_stem.element(),
            },
        })
    }

    fn build_pillar(&self, key: PillarKey, raw: &OraclePillar) -> PillarDetail {
        if raw.stem.is_none() || raw.branch.is_none() {
            warn!(pillar = ?key, "oracle returned an incomplete pillar");
        }

        let stem_ten_god = raw.stem_ten_god.clone().unwrap_or_default();
        let branch_ten_god = raw
            .branch_ten_gods
            .first()
            .cloned()
            .unwrap_or_else(|| stem_ten_god.clone());
        let self_seat = raw
            .self_seat
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| branch_ten_god.clone());

        PillarDetail {
            pillar: key,
            stem: raw.stem,
            branch: raw.branch,
            stem_ten_god,
            branch_ten_god,
            hidden_stems: raw.hidden_stems.clone(),
            hidden_stem_ten_gods: raw.branch_ten_gods.clone(),
            star_luck: raw.star_luck.clone().unwrap_or_default(),
            self_seat,
            void: raw.void.clone().unwrap_or_default(),
            na_yin: raw.na_yin.clone().unwrap_or_default(),
            shen_sha: shen_sha(raw.branch),
        }
    }
}

/// 지지 하나의 신살 태그: `冲X`, `煞Y`.
pub fn shen_sha(branch: Option<Branch>) -> Vec<String> {
    match branch {
        Some(b) => vec![
            format!("冲{}", b.clash_partner()),
            format!("煞{}", b.sha_direction()),
        ],
        None => Vec::new(),
    }
}
