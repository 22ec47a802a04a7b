//! Placeholder like/comment counts.
//!
//! The Instagram Basic Display / Graph media listing does not return
//! engagement for this account type. The gallery design still shows counts,
//! so they are generated here. These numbers are NOT real telemetry: every
//! item carrying them is flagged `engagementIsSynthetic`.

use std::ops::RangeInclusive;

use rand::Rng;

pub const SYNTHETIC_LIKE_RANGE: RangeInclusive<u32> = 20..=150;
pub const SYNTHETIC_COMMENT_RANGE: RangeInclusive<u32> = 1..=20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticEngagement {
    pub like_count: u32,
    pub comment_count: u32,
}

/// Draws a random placeholder engagement pair.
pub fn synthetic_engagement<R: Rng>(rng: &mut R) -> SyntheticEngagement {
    SyntheticEngagement {
        like_count: rng.random_range(SYNTHETIC_LIKE_RANGE),
        comment_count: rng.random_range(SYNTHETIC_COMMENT_RANGE),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn synthetic_engagement_stays_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let e = synthetic_engagement(&mut rng);
            assert!(SYNTHETIC_LIKE_RANGE.contains(&e.like_count));
            assert!(SYNTHETIC_COMMENT_RANGE.contains(&e.comment_count));
        }
    }
}
