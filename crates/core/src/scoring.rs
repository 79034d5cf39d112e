//! Scoring module - lock score and speed progression
//!
//! Every lock is worth a flat `LOCK_SCORE`; clearing lines adds
//! `LINE_BONUS_BASE * 2^lines`. Speed is the number of ticks between gravity
//! steps and drops by one every `pieces_per_step` locks, never below `MIN_SPEED`.

use crate::types::{LINE_BONUS_BASE, LOCK_SCORE, MIN_SPEED};

/// Bonus for clearing `lines` rows in one lock (0 when nothing cleared)
pub fn line_bonus(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_BONUS_BASE << lines
}

/// Total score for one lock
pub fn lock_score(lines: usize) -> u32 {
    LOCK_SCORE + line_bonus(lines)
}

/// Speed after the `piece_count`-th lock
pub fn next_speed(speed: u32, piece_count: u32, pieces_per_step: u32) -> u32 {
    if pieces_per_step > 0 && piece_count % pieces_per_step == 0 && speed > MIN_SPEED {
        speed - 1
    } else {
        speed
    }
}

/// Display level: 1 at the initial speed, one higher per speed step
pub fn level(initial_speed: u32, speed: u32) -> u32 {
    initial_speed.saturating_sub(speed) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bonus_doubles_per_line() {
        assert_eq!(line_bonus(0), 0);
        assert_eq!(line_bonus(1), 200);
        assert_eq!(line_bonus(2), 400);
        assert_eq!(line_bonus(3), 800);
        assert_eq!(line_bonus(4), 1600);
    }

    #[test]
    fn test_lock_score_includes_flat_points() {
        assert_eq!(lock_score(0), 25);
        assert_eq!(lock_score(1), 225);
        assert_eq!(lock_score(4), 1625);
    }

    #[test]
    fn test_next_speed_steps_every_tenth_piece() {
        assert_eq!(next_speed(20, 9, 10), 20);
        assert_eq!(next_speed(20, 10, 10), 19);
        assert_eq!(next_speed(19, 11, 10), 19);
        assert_eq!(next_speed(19, 20, 10), 18);
    }

    #[test]
    fn test_next_speed_floor() {
        assert_eq!(next_speed(1, 10, 10), 1);
        assert_eq!(next_speed(2, 10, 10), 1);
    }

    #[test]
    fn test_level() {
        assert_eq!(level(20, 20), 1);
        assert_eq!(level(20, 1), 20);
    }
}
