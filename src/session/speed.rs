use std::time::Duration;

const SPEEDS_MS: [u64; 13] = [1000, 750, 500, 400, 300, 250, 200, 150, 125, 100, 90, 80, 75];
const MIN_DROP_MS: u64 = 10;

/// Drop interval for `level`. Past level 13 the interval shrinks by 5ms per level
/// down to a 10ms floor. Level 0 is treated as level 1.
pub fn speed(level: u32) -> Duration {
    let level = level.max(1) as usize;
    let ms = match SPEEDS_MS.get(level - 1) {
        Some(ms) => *ms,
        None => {
            let past = (level - SPEEDS_MS.len()) as u64;
            75u64.saturating_sub(5 * past).max(MIN_DROP_MS)
        }
    };
    Duration::from_millis(ms)
}
