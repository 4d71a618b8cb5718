//! Alternative slot ranking.
//!
//! # Algorithm
//!
//! Two stages, so that a rejected slot never competes on score:
//!
//! 1. **Hard filter**: drop slots failing [`MatchConstraints::admits`].
//! 2. **Soft score** (higher first):
//!
//! | Relation to course | Score |
//! |--------------------|-------|
//! | same teacher and same content | 100 |
//! | same content, `prefer_same_content` | 50 |
//! | same teacher | 25 |
//! | otherwise | 0 |
//!
//! Ties on score are broken by ascending distance to the target (minutes
//! for exact targets, days for date targets). The sort is stable, so full
//! ties keep store order. The top [`MAX_ALTERNATIVES`] are returned.

use std::cmp::Reverse;

use super::{
    AlternativeSlot, MatchConstraints, MatchFlags, MAX_ALTERNATIVES, SCORE_SAME_CONTENT,
    SCORE_SAME_TEACHER, SCORE_SAME_TEACHER_AND_CONTENT,
};
use crate::models::{Course, Slot, SlotTarget};

/// Soft score of a slot that already passed the hard filter.
pub fn match_score(slot: &Slot, course: &Course, constraints: &MatchConstraints) -> u32 {
    let flags = MatchFlags::between(slot, course);
    match (flags.same_teacher, flags.same_content) {
        (true, true) => SCORE_SAME_TEACHER_AND_CONTENT,
        (_, true) if constraints.prefer_same_content => SCORE_SAME_CONTENT,
        (true, _) => SCORE_SAME_TEACHER,
        _ => 0,
    }
}

/// Ranks an arbitrary candidate set and keeps the best [`MAX_ALTERNATIVES`].
///
/// Only the hard constraints are applied here; the caller decides which
/// slots are candidates.
pub fn rank_candidates<'a>(
    candidates: impl IntoIterator<Item = &'a Slot>,
    course: &Course,
    target: &SlotTarget,
    constraints: &MatchConstraints,
) -> Vec<AlternativeSlot> {
    let mut scored: Vec<(u32, i64, &Slot)> = candidates
        .into_iter()
        .filter(|s| constraints.admits(s, course))
        .map(|s| (match_score(s, course, constraints), target.distance(s.time), s))
        .collect();

    scored.sort_by_key(|&(score, distance, _)| (Reverse(score), distance));

    scored
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .map(|(_, _, slot)| AlternativeSlot::from_slot(slot, course))
        .collect()
}

/// Proposes replacements for a request to move `course` to `target`.
///
/// Candidates are bookable slots with the course's content that are not
/// at the target itself.
pub fn rank_alternatives(
    course: &Course,
    target: &SlotTarget,
    constraints: &MatchConstraints,
    slots: &[Slot],
) -> Vec<AlternativeSlot> {
    let candidates = slots
        .iter()
        .filter(|s| s.content == course.content && s.is_bookable() && !target.matches(s.time));
    rank_candidates(candidates, course, target, constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_slot_time;
    use proptest::prelude::*;

    fn course() -> Course {
        Course::new("C1").with_teacher("Mr.Li").with_content("Math")
    }

    fn slot(id: &str, time: &str, teacher: &str, content: &str, capacity: u32, booked: u32) -> Slot {
        Slot::new(id, parse_slot_time(time).unwrap())
            .with_teacher(teacher)
            .with_content(content)
            .with_seats(capacity, booked)
    }

    fn ids(alternatives: &[AlternativeSlot]) -> Vec<&str> {
        alternatives.iter().map(|a| a.slot_id.as_str()).collect()
    }

    #[test]
    fn test_match_score_table() {
        let c = course();
        let prefer = MatchConstraints::default().with_require_same_teacher(false);
        let no_prefer = prefer.with_prefer_same_content(false);
        let t = "2025-03-10 09:00";

        assert_eq!(match_score(&slot("a", t, "Mr.Li", "Math", 1, 0), &c, &prefer), 100);
        assert_eq!(match_score(&slot("b", t, "Ms.Wang", "Math", 1, 0), &c, &prefer), 50);
        assert_eq!(match_score(&slot("c", t, "Mr.Li", "Art", 1, 0), &c, &prefer), 25);
        assert_eq!(match_score(&slot("d", t, "Ms.Wang", "Art", 1, 0), &c, &prefer), 0);
        assert_eq!(match_score(&slot("e", t, "Ms.Wang", "Math", 1, 0), &c, &no_prefer), 0);
        assert_eq!(match_score(&slot("f", t, "Mr.Li", "Math", 1, 0), &c, &no_prefer), 100);
    }

    #[test]
    fn test_score_dominates_distance() {
        // Scores [25, 100, 50] at equal distance rank [100, 50, 25].
        let slots = vec![
            slot("teacher_only", "2025-03-11 09:00", "Mr.Li", "Art", 3, 0),
            slot("both", "2025-03-09 09:00", "Mr.Li", "Math", 3, 0),
            slot("content_only", "2025-03-11 09:00", "Ms.Wang", "Math", 3, 0),
        ];
        let target = SlotTarget::parse("2025-03-10").unwrap();
        let constraints = MatchConstraints::default().with_require_same_teacher(false);

        let ranked = rank_candidates(&slots, &course(), &target, &constraints);
        assert_eq!(ids(&ranked), vec!["both", "content_only", "teacher_only"]);
    }

    #[test]
    fn test_distance_breaks_score_ties() {
        let slots = vec![
            slot("far", "2025-03-20 09:00", "Mr.Li", "Math", 3, 0),
            slot("near", "2025-03-11 09:00", "Mr.Li", "Math", 3, 0),
            slot("before", "2025-03-08 09:00", "Mr.Li", "Math", 3, 0),
        ];
        let target = SlotTarget::parse("2025-03-10").unwrap();

        let ranked = rank_alternatives(&course(), &target, &MatchConstraints::default(), &slots);
        assert_eq!(ids(&ranked), vec!["near", "before", "far"]);
    }

    #[test]
    fn test_full_ties_keep_store_order() {
        let slots = vec![
            slot("x", "2025-03-11 09:00", "Mr.Li", "Math", 3, 0),
            slot("y", "2025-03-09 09:00", "Mr.Li", "Math", 3, 0),
            slot("z", "2025-03-11 18:00", "Mr.Li", "Math", 3, 0),
        ];
        let target = SlotTarget::parse("2025-03-10").unwrap();

        let ranked = rank_alternatives(&course(), &target, &MatchConstraints::default(), &slots);
        assert_eq!(ids(&ranked), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_exact_target_uses_minutes() {
        let slots = vec![
            slot("evening", "2025-03-10 18:00", "Mr.Li", "Math", 3, 0),
            slot("late_morning", "2025-03-10 11:00", "Mr.Li", "Math", 3, 0),
            slot("requested", "2025-03-10 09:00", "Mr.Li", "Math", 3, 0),
        ];
        let target = SlotTarget::parse("2025-03-10 09:00").unwrap();

        let ranked = rank_alternatives(&course(), &target, &MatchConstraints::default(), &slots);
        // The requested time itself is never an alternative.
        assert_eq!(ids(&ranked), vec!["late_morning", "evening"]);
    }

    #[test]
    fn test_candidate_filter() {
        let slots = vec![
            slot("full", "2025-03-11 09:00", "Mr.Li", "Math", 2, 2),
            slot("other_content", "2025-03-11 09:00", "Mr.Li", "Physics", 5, 0),
            slot("same_day", "2025-03-10 15:00", "Mr.Li", "Math", 5, 0),
            slot("other_teacher", "2025-03-12 09:00", "Ms.Wang", "Math", 50, 0),
            slot("ok", "2025-03-14 09:00", "Mr.Li", "Math", 1, 0),
        ];
        let target = SlotTarget::parse("2025-03-10").unwrap();

        let ranked = rank_alternatives(&course(), &target, &MatchConstraints::default(), &slots);
        assert_eq!(ids(&ranked), vec!["ok"]);

        let relaxed = MatchConstraints::default().with_require_same_teacher(false);
        let ranked = rank_alternatives(&course(), &target, &relaxed, &slots);
        assert_eq!(ids(&ranked), vec!["ok", "other_teacher"]);
        assert!(!ranked[1].flags.same_teacher);
        assert!(ranked[1].flags.same_content);
    }

    #[test]
    fn test_truncates_to_three() {
        let slots: Vec<Slot> = (11..=18)
            .map(|day| slot(&format!("S{day}"), &format!("2025-03-{day} 09:00"), "Mr.Li", "Math", 1, 0))
            .collect();
        let target = SlotTarget::parse("2025-03-10").unwrap();

        let ranked = rank_alternatives(&course(), &target, &MatchConstraints::default(), &slots);
        assert_eq!(ids(&ranked), vec!["S11", "S12", "S13"]);
    }

    #[test]
    fn test_no_candidates() {
        let target = SlotTarget::parse("2025-03-10").unwrap();
        assert!(rank_alternatives(&course(), &target, &MatchConstraints::default(), &[]).is_empty());
    }

    fn arb_slot() -> impl Strategy<Value = Slot> {
        (
            1u32..28,
            0u32..24,
            prop::sample::select(vec!["Mr.Li", "Ms.Wang", "Mr.Zhao"]),
            prop::sample::select(vec!["Math", "Art"]),
            0u32..4,
            0u32..4,
        )
            .prop_map(|(day, hour, teacher, content, capacity, booked)| {
                slot(
                    "",
                    &format!("2025-03-{day:02} {hour:02}:00"),
                    teacher,
                    content,
                    capacity,
                    booked.min(capacity),
                )
            })
    }

    proptest! {
        #[test]
        fn prop_ranking_invariants(
            slots in prop::collection::vec(arb_slot(), 0..20).prop_map(|mut slots| {
                for (i, s) in slots.iter_mut().enumerate() {
                    s.slot_id = format!("S{i}");
                }
                slots
            }),
            day in 1u32..28,
            require_same_teacher in any::<bool>(),
            prefer_same_content in any::<bool>(),
        ) {
            let course = course();
            let target = SlotTarget::parse(&format!("2025-03-{day:02}")).unwrap();
            let constraints = MatchConstraints { require_same_teacher, prefer_same_content };

            let ranked = rank_alternatives(&course, &target, &constraints, &slots);
            prop_assert!(ranked.len() <= MAX_ALTERNATIVES);

            for alt in &ranked {
                prop_assert!(alt.capacity_left > 0);
                prop_assert!(alt.flags.same_content);
                prop_assert!(!alt.time.starts_with(&target.to_string()));
                if require_same_teacher {
                    prop_assert!(alt.flags.same_teacher);
                }
            }

            let keys: Vec<(Reverse<u32>, i64)> = ranked
                .iter()
                .map(|alt| {
                    let slot = slots.iter().find(|s| s.slot_id == alt.slot_id).unwrap();
                    (Reverse(match_score(slot, &course, &constraints)), target.distance(slot.time))
                })
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));

            // Deterministic for identical input.
            prop_assert_eq!(ranked, rank_alternatives(&course, &target, &constraints, &slots));
        }
    }
}
