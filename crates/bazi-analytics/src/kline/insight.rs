//! 100년 전체 인사이트.

use bazi_core::{FourPillars, Insight, KeyYear, OverallTrend, YearKLine};

/// 고점/저점 개수.
pub const KEY_YEAR_COUNT: usize = 6;
/// 십신 포커스 개수.
pub const TEN_GOD_FOCUS_COUNT: usize = 4;

/// 나이 구간 (인덱스 기준): 1~34세, 35~67세, 68~100세.
const EARLY: std::ops::Range<usize> = 0..34;
const MIDDLE: std::ops::Range<usize> = 34..67;
const LATE: std::ops::Range<usize> = 67..100;

/// 인사이트를 계산합니다.
pub fn summarize(years: &[YearKLine], pillars: &FourPillars) -> Insight {
    let total_score = total_score(years);
    Insight {
        overall_trend: overall_trend(years),
        peaks: peaks(years),
        troughs: troughs(years),
        ten_god_focus: pillars
            .iter()
            .map(|p| p.stem_ten_god.clone())
            .filter(|g| !g.is_empty())
            .take(TEN_GOD_FOCUS_COUNT)
            .collect(),
        total_score,
        summary: summary_text(total_score).to_string(),
    }
}

/// 점수 내림차순 상위 6개 (동점은 나이 순).
pub fn peaks(years: &[YearKLine]) -> Vec<KeyYear> {
    let mut sorted: Vec<&YearKLine> = years.iter().collect();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted.into_iter().take(KEY_YEAR_COUNT).map(KeyYear::from).collect()
}

/// 점수 오름차순 하위 6개 (동점은 나이 순).
pub fn troughs(years: &[YearKLine]) -> Vec<KeyYear> {
    let mut sorted: Vec<&YearKLine> = years.iter().collect();
    sorted.sort_by(|a, b| a.score.total_cmp(&b.score));
    sorted.into_iter().take(KEY_YEAR_COUNT).map(KeyYear::from).collect()
}

/// 세 구간 평균 중 엄격하게 가장 높은 구간.
pub fn overall_trend(years: &[YearKLine]) -> OverallTrend {
    let early = mean_close(years, EARLY);
    let middle = mean_close(years, MIDDLE);
    let late = mean_close(years, LATE);

    if early > middle && early > late {
        OverallTrend::EarlyPeak
    } else if middle > early && middle > late {
        OverallTrend::MiddlePeak
    } else if late > early && late > middle {
        OverallTrend::LatePeak
    } else {
        OverallTrend::Volatile
    }
}

/// 전체 평균 점수 (반올림).
pub fn total_score(years: &[YearKLine]) -> u32 {
    if years.is_empty() {
        return 0;
    }
    let mean = years.iter().map(|y| y.score).sum::<f64>() / years.len() as f64;
    mean.round().clamp(0.0, 100.0) as u32
}

/// 총점 구간별 요약.
pub fn summary_text(total: u32) -> &'static str {
    if total >= 75 {
        "整体偏强，波段与趋势并存"
    } else if total >= 60 {
        "整体平稳，关键在于节奏"
    } else {
        "整体偏弱，需要以稳为先"
    }
}

fn mean_close(years: &[YearKLine], range: std::ops::Range<usize>) -> f64 {
    let slice = years.get(range.start..range.end.min(years.len())).unwrap_or(&[]);
    if slice.is_empty() {
        return 0.0;
    }
    slice.iter().map(|y| y.close).sum::<f64>() / slice.len() as f64
}
