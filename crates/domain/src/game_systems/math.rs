//! Ability score arithmetic.

/// Ability modifier: `floor((score - 10) / 2)`.
///
/// Rust's `/` rounds toward zero, so this uses Euclidean division, which
/// floors for a positive divisor (`modifier(7) == -2`, not `-1`).
pub fn modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Proficiency bonus by character level: +2 at 1-4, rising by one every four
/// levels to +6 at 17 and above. Levels below 1 get the level-1 bonus.
pub fn proficiency_bonus(level: u8) -> i32 {
    match level {
        17.. => 6,
        13..=16 => 5,
        9..=12 => 4,
        5..=8 => 3,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_modifier_calculation() {
        assert_eq!(modifier(1), -5);
        assert_eq!(modifier(7), -2);
        assert_eq!(modifier(8), -1);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(12), 1);
        assert_eq!(modifier(20), 5);
        assert_eq!(modifier(30), 10);
    }

    #[test]
    fn ability_modifier_matches_floor_formula() {
        for score in -5..=40 {
            let expected = ((score - 10) as f64 / 2.0).floor() as i32;
            assert_eq!(modifier(score), expected, "score {}", score);
        }
    }

    #[test]
    fn proficiency_bonus_progression() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(16), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn proficiency_bonus_never_decreases() {
        let mut previous = proficiency_bonus(1);
        for level in 2..=30 {
            let bonus = proficiency_bonus(level);
            assert!(bonus >= previous, "level {}", level);
            previous = bonus;
        }
    }
}
