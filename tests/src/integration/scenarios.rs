//! # Assignment Scenarios
//!
//! The five reference scenarios, driven through the public engine API only.
//!
//! | Scenario | Setup | Expected |
//! |----------|-------|----------|
//! | A | 3 people, no history | every order yields a single 3-cycle |
//! | B | {X, Y}, X had Y | `NoFeasibleOption` for X |
//! | C | 7 people, history is a 7-cycle | every order completes and verifies |
//! | D | declared pair strands C | `NoFeasibleOption`, verify lists the missing |
//! | E | two declarations, same receiver | second is `ReceiverTaken` |

#[cfg(test)]
mod tests {
    use crate::fixtures::{cyclic_roster, family, ids, roster};
    use gx_01_assignment_engine::{
        AssignmentApi, AssignmentError, AssignmentService, StdRandomSource, VerificationIssue,
    };
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_types::ParticipantId;

    // =========================================================================
    // SCENARIO A
    // =========================================================================

    #[test]
    fn scenario_a_three_people_form_one_cycle() {
        let names = ["A", "B", "C"];
        for seed in 0..30u64 {
            let service = AssignmentService::new(roster(&names, &[]), StdRandomSource::from_seed(seed));
            let mut order = ids(&names);
            order.shuffle(&mut StdRng::seed_from_u64(seed));

            let mut state = service.initialize();
            for giver in &order {
                state = service.request_assignment(&state, giver).unwrap().state;
            }

            let a = ParticipantId::from("A");
            let b = state.receiver_for(&a).unwrap();
            let c = state.receiver_for(b).unwrap();
            assert_ne!(&a, c);
            assert_eq!(state.receiver_for(c), Some(&a));
        }
    }

    // =========================================================================
    // SCENARIO B
    // =========================================================================

    #[test]
    fn scenario_b_only_excluded_receiver_left() {
        let service = AssignmentService::new(
            roster(&["X", "Y"], &[("X", "Y")]),
            StdRandomSource::from_seed(0),
        );
        let result = service.request_assignment(&service.initialize(), &"X".into());
        assert_eq!(
            result,
            Err(AssignmentError::NoFeasibleOption { giver: "X".into() })
        );
    }

    // =========================================================================
    // SCENARIO C
    // =========================================================================

    #[test]
    fn scenario_c_seven_cycle_history_completes_in_any_order() {
        let roster = cyclic_roster(7);
        for seed in 0..200u64 {
            let service = AssignmentService::new(roster.clone(), StdRandomSource::from_seed(seed));
            let mut order = roster.participants().to_vec();
            order.shuffle(&mut StdRng::seed_from_u64(seed.wrapping_mul(31)));

            let mut state = service.initialize();
            for giver in &order {
                match service.request_assignment(&state, giver) {
                    Ok(assignment) => state = assignment.state,
                    Err(err) => panic!("seed {seed}: {err}"),
                }
            }

            let report = service.verify(&state);
            assert!(report.valid, "seed {seed}: {:?}", report.messages());
        }
    }

    #[test]
    fn scenario_c_family_draw_completes() {
        let family = family();
        for seed in 0..100u64 {
            let service = AssignmentService::new(family.clone(), StdRandomSource::from_seed(seed));
            let mut order = family.participants().to_vec();
            order.shuffle(&mut StdRng::seed_from_u64(!seed));

            let mut state = service.initialize();
            for giver in &order {
                state = service.request_assignment(&state, giver).unwrap().state;
            }
            assert!(service.verify(&state).valid);
        }
    }

    // =========================================================================
    // SCENARIO D
    // =========================================================================

    #[test]
    fn scenario_d_declaration_strands_a_participant() {
        let service = AssignmentService::new(
            roster(&["A", "B", "C"], &[("C", "A")]),
            StdRandomSource::from_seed(0),
        );
        let state = service
            .declare_assignment(&service.initialize(), &"A".into(), &"B".into())
            .unwrap();

        assert_eq!(
            service.request_assignment(&state, &"C".into()),
            Err(AssignmentError::NoFeasibleOption { giver: "C".into() })
        );

        let report = service.verify(&state);
        assert!(!report.valid);
        assert_eq!(
            report.issues,
            vec![VerificationIssue::MissingAssignments {
                members: ids(&["B", "C"])
            }]
        );
    }

    // =========================================================================
    // SCENARIO E
    // =========================================================================

    #[test]
    fn scenario_e_receiver_cannot_be_declared_twice() {
        let service = AssignmentService::new(
            roster(&["A", "B", "C", "D"], &[]),
            StdRandomSource::from_seed(0),
        );
        let state = service
            .declare_assignment(&service.initialize(), &"A".into(), &"D".into())
            .unwrap();

        assert_eq!(
            service.declare_assignment(&state, &"B".into(), &"D".into()),
            Err(AssignmentError::ReceiverTaken {
                receiver: "D".into()
            })
        );
        assert_eq!(state.assigned_count(), 1);
    }
}
