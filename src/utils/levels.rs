/// 等级经验阈值表: (等级, 达到该等级所需累计经验)
/// 必须按等级升序排列且首项为 (1, 0); 超出表尾的经验一律解析为最高等级
pub const LEVEL_THRESHOLDS: &[(i32, i64)] = &[
    (1, 0),
    (2, 100),
    (3, 250),
    (4, 450),
    (5, 700),
    (6, 1000),
    (7, 1350),
    (8, 1750),
    (9, 2200),
    (10, 2700),
];

/// 按累计经验解析等级: 返回满足 experience >= threshold(L) 的最大 L
///
/// 纯函数, 无副作用; 经验低于首档 (理论上不会出现负值) 时返回 1 级保底
pub fn resolve_level(experience: i64) -> i32 {
    let mut level = 1;
    for &(lv, required) in LEVEL_THRESHOLDS {
        if experience >= required {
            level = lv;
        } else {
            break;
        }
    }
    level
}

/// 某等级所需累计经验; 表中未定义的等级返回 None
pub fn threshold_for(level: i32) -> Option<i64> {
    LEVEL_THRESHOLDS
        .iter()
        .find(|(lv, _)| *lv == level)
        .map(|(_, xp)| *xp)
}

/// 阈值表定义的最高等级
pub fn max_level() -> i32 {
    LEVEL_THRESHOLDS.last().map(|(lv, _)| *lv).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_level() {
        assert_eq!(resolve_level(0), 1);
        assert_eq!(resolve_level(-5), 1);
        assert_eq!(resolve_level(99), 1);
    }

    #[test]
    fn test_exact_boundaries() {
        // 每个已定义等级 L > 1: threshold(L) 恰好升级, threshold(L) - 1 还差一点
        for &(level, required) in LEVEL_THRESHOLDS.iter().skip(1) {
            assert_eq!(resolve_level(required), level);
            assert_eq!(resolve_level(required - 1), level - 1);
        }
    }

    #[test]
    fn test_monotonicity() {
        let mut last = 0;
        for e in 0..3000 {
            let level = resolve_level(e);
            assert!(level >= last, "level dropped at experience {e}");
            last = level;
        }
    }

    #[test]
    fn test_beyond_last_threshold() {
        assert_eq!(resolve_level(2700), max_level());
        assert_eq!(resolve_level(1_000_000), max_level());
    }

    #[test]
    fn test_threshold_for() {
        assert_eq!(threshold_for(1), Some(0));
        assert_eq!(threshold_for(2), Some(100));
        assert_eq!(threshold_for(3), Some(250));
        assert_eq!(threshold_for(99), None);
    }
}
