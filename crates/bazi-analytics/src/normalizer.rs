//! 출생 시간 정규화.
//!
//! 정확한 시각은 그대로 쓰고, 이름 붙은 시간대는 대표 시각으로 바꿉니다.

use bazi_core::{BirthTime, ChartError, ChartResult, TimeSegment};

/// 정규화된 시각.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTime {
    pub hour: u32,
    pub minute: u32,
    /// 시간대 입력일 때 `子时(23:00-01:00, 取00:00)` 형식의 설명, 정확한 시각이면 빈 문자열
    pub note: String,
}

/// 시간대의 대표 시각(시)과 범위 표기.
pub fn segment_window(segment: TimeSegment) -> (u32, &'static str) {
    match segment {
        TimeSegment::Zi => (0, "23:00-01:00"),
        TimeSegment::Chou => (2, "01:00-03:00"),
        TimeSegment::Yin => (4, "03:00-05:00"),
        TimeSegment::Mao => (6, "05:00-07:00"),
        TimeSegment::Chen => (8, "07:00-09:00"),
        TimeSegment::Si => (10, "09:00-11:00"),
        TimeSegment::Wu => (12, "11:00-13:00"),
        TimeSegment::Wei => (14, "13:00-15:00"),
        TimeSegment::Shen => (16, "15:00-17:00"),
        TimeSegment::You => (18, "17:00-19:00"),
        TimeSegment::Xu => (20, "19:00-21:00"),
        TimeSegment::Hai => (22, "21:00-23:00"),
        TimeSegment::Morning => (10, "06:00-12:00"),
        TimeSegment::Afternoon => (16, "12:00-18:00"),
    }
}

/// 출생 시간을 시:분으로 정규화합니다.
///
/// # Errors
///
/// - `ChartError::InvalidInput`: 범위를 벗어난 시각 (검증을 거치지 않은 입력)
pub fn normalize(time: &BirthTime) -> ChartResult<NormalizedTime> {
    match *time {
        BirthTime::Exact { hour, minute } => {
            let hour = u32::try_from(hour)
                .ok()
                .filter(|h| *h <= 23)
                .ok_or_else(|| ChartError::InvalidInput(format!("시: {}", hour)))?;
            let minute = u32::try_from(minute)
                .ok()
                .filter(|m| *m <= 59)
                .ok_or_else(|| ChartError::InvalidInput(format!("분: {}", minute)))?;
            Ok(NormalizedTime {
                hour,
                minute,
                note: String::new(),
            })
        }
        BirthTime::Segment { label } => {
            let (hour, range) = segment_window(label);
            Ok(NormalizedTime {
                hour,
                minute: 0,
                note: format!("{}({}, 取{:02}:00)", label, range, hour),
            })
        }
    }
}
