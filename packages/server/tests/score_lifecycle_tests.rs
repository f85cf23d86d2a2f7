//! End-to-end checks of the scoring lifecycle rules.
//!
//! Drives the public crate surface the way the approval flow does at
//! runtime: a registration sits PENDING, a staff decision moves it to
//! APPROVED or REJECTED, and only approved point values feed the
//! semester summary. No database is required here; the SQL-backed
//! guarantees live in `registration_scoring_tests.rs`.

use api_core::domains::activities::CriteriaCategory;
use api_core::domains::auth::{JwtService, Role};
use api_core::domains::participations::ParticipationStatus;
use api_core::domains::scores::engine::ApprovedPoints;
use api_core::domains::scores::{classify, summarize, Classification, MAX_TOTAL};
use uuid::Uuid;

fn approved(point_value: i32, category: CriteriaCategory) -> ApprovedPoints {
    ApprovedPoints {
        point_value,
        category,
    }
}

#[test]
fn pending_is_the_only_decidable_state() {
    use ParticipationStatus::*;

    assert!(Pending.can_transition_to(Approved));
    assert!(Pending.can_transition_to(Rejected));

    // Decisions are final in both directions
    for decided in [Approved, Rejected] {
        for target in [Pending, Approved, Rejected] {
            assert!(!decided.can_transition_to(target));
        }
    }
}

#[test]
fn approving_more_activities_never_lowers_the_total() {
    let mut set = vec![approved(20, CriteriaCategory::Academic)];
    let mut previous = summarize(&set).total;

    for value in [5, 30, 45, 60] {
        set.push(approved(value, CriteriaCategory::Extracurricular));
        let next = summarize(&set).total;
        assert!(next >= previous);
        assert!(next <= MAX_TOTAL);
        previous = next;
    }
}

#[test]
fn rejected_points_do_not_count() {
    // A rejected 50-point activity leaves only the approved 30 on record
    let summary = summarize(&[approved(30, CriteriaCategory::Skill)]);
    assert_eq!(summary.total, 30);
    assert_eq!(summary.classification, Classification::Weak);
}

#[test]
fn full_semester_reaches_excellent() {
    let summary = summarize(&[
        approved(40, CriteriaCategory::Academic),
        approved(25, CriteriaCategory::Discipline),
        approved(15, CriteriaCategory::Extracurricular),
        approved(12, CriteriaCategory::Skill),
    ]);
    assert_eq!(summary.total, 92);
    assert_eq!(summary.classification, Classification::Excellent);
    assert_eq!(summary.breakdown.get("ACADEMIC"), Some(&40));
}

#[test]
fn every_total_maps_to_exactly_one_classification() {
    for total in 0..=150 {
        let clamped = total.min(MAX_TOTAL);
        match classify(clamped) {
            Classification::Excellent => assert!(clamped >= 90),
            Classification::Good => assert!((80..90).contains(&clamped)),
            Classification::Fair => assert!((65..80).contains(&clamped)),
            Classification::Average => assert!((50..65).contains(&clamped)),
            Classification::Weak => assert!(clamped < 50),
        }
    }
}

#[test]
fn student_tokens_carry_their_role() {
    let service = JwtService::new("lifecycle_test_secret", "training-points".to_string());
    let account_id = Uuid::new_v4();

    let token = service
        .create_token(account_id, Role::Student)
        .expect("token creation should not fail");
    let claims = service.verify_token(&token).expect("token should verify");

    assert_eq!(claims.account_id, account_id);
    assert_eq!(claims.role, Role::Student);
}
