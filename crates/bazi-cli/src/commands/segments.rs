//! 시간대 목록.

use bazi_analytics::normalizer::segment_window;
use bazi_core::TimeSegment;

/// 시간대 라벨, 범위, 대표 시각을 출력합니다.
pub fn print_segments() {
    println!("\n=== 출생 시간대 ===\n");
    println!("{:<6} {:<14} {}", "라벨", "범위", "대표 시각");
    println!("{}", "-".repeat(32));
    for segment in TimeSegment::ALL {
        let (hour, range) = segment_window(segment);
        println!("{:<6} {:<14} {:02}:00", segment.label(), range, hour);
    }
    println!("\n사용 예: bazi compute -d 1990-01-01 -s 子时");
}
