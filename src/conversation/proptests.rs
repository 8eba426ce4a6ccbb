//! Property-based tests for the scripted booking flow
//!
//! These tests verify the flow's invariants across arbitrary chat input.

use super::*;
use crate::catalog::{format_price, Catalog};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn catalog() -> Catalog {
    Catalog::default()
}

fn arb_treatment_index() -> impl Strategy<Value = usize> {
    0..catalog().treatments().len()
}

fn arb_slot_number() -> impl Strategy<Value = usize> {
    1..=catalog().slots().len()
}

/// Anything a customer might type, numbers included
fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,20}",
        "[0-9]{1,3}",
        " *[0-9]{1,2} *",
        "-[0-9]{1,2}",
        "[0-9]\\.[0-9]",
        any::<String>(),
    ]
}

/// Input that is never a catalog number: no digits at all
fn arb_non_numeric() -> impl Strategy<Value = String> {
    "[a-zA-Z !?.,]{0,30}"
}

fn arb_state() -> impl Strategy<Value = BookingState> {
    let catalog = catalog();
    let treatments = catalog.treatments().to_vec();
    let slots = catalog.slots().to_vec();
    let t_count = treatments.len();
    let s_count = slots.len();
    prop_oneof![
        Just(BookingState::Start),
        Just(BookingState::TreatmentChoice),
        (0..t_count).prop_map({
            let treatments = treatments.clone();
            move |i| BookingState::SlotChoice {
                treatment: treatments[i].clone(),
            }
        }),
        (0..t_count, 0..s_count).prop_map(move |(i, j)| BookingState::Completed {
            treatment: treatments[i].clone(),
            slot: slots[j].clone(),
        }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn first_message_always_lists_the_catalog(input in arb_message()) {
        let catalog = catalog();
        let turn = advance(&catalog, &BookingState::Start, &input);

        prop_assert_eq!(&turn.new_state, &BookingState::TreatmentChoice);
        prop_assert_eq!(&turn.outcome, &TurnOutcome::Advanced);
        for treatment in catalog.treatments() {
            prop_assert!(turn.reply.contains(&treatment.name));
            prop_assert!(turn.reply.contains(&format_price(treatment.price)));
        }
    }

    #[test]
    fn valid_treatment_number_selects_that_treatment(
        index in arb_treatment_index(),
        padding in " {0,3}",
    ) {
        let catalog = catalog();
        let expected = &catalog.treatments()[index];
        let input = format!("{padding}{}{padding}", expected.id);

        let turn = advance(&catalog, &BookingState::TreatmentChoice, &input);

        prop_assert_eq!(turn.new_state.stage(), Stage::SlotChoice);
        prop_assert_eq!(turn.new_state.selected_treatment(), Some(expected));
        for slot in catalog.slots() {
            prop_assert!(turn.reply.contains(&slot.label));
        }
    }

    #[test]
    fn non_numeric_input_never_moves_a_choosing_state(
        state in arb_state().prop_filter("choosing stages only", |s| {
            matches!(s.stage(), Stage::TreatmentChoice | Stage::SlotChoice)
        }),
        input in arb_non_numeric(),
    ) {
        let turn = advance(&catalog(), &state, &input);

        prop_assert_eq!(&turn.new_state, &state);
        prop_assert_eq!(&turn.outcome, &TurnOutcome::Rejected);
        let expected = if state.stage() == Stage::TreatmentChoice {
            INVALID_TREATMENT_REPLY
        } else {
            INVALID_SLOT_REPLY
        };
        prop_assert_eq!(turn.reply.as_str(), expected);
    }

    #[test]
    fn out_of_range_numbers_are_rejected(offset in 1usize..1000) {
        let catalog = catalog();

        let too_high_treatment = (catalog.treatments().len() + offset).to_string();
        let turn = advance(&catalog, &BookingState::TreatmentChoice, &too_high_treatment);
        prop_assert_eq!(&turn.new_state, &BookingState::TreatmentChoice);

        let choosing = BookingState::SlotChoice {
            treatment: catalog.treatments()[0].clone(),
        };
        let too_high_slot = (catalog.slots().len() + offset).to_string();
        let turn = advance(&catalog, &choosing, &too_high_slot);
        prop_assert_eq!(&turn.new_state, &choosing);
        prop_assert_eq!(&turn.outcome, &TurnOutcome::Rejected);
    }

    #[test]
    fn valid_slot_completes_with_full_summary(
        index in arb_treatment_index(),
        slot_number in arb_slot_number(),
    ) {
        let catalog = catalog();
        let treatment = catalog.treatments()[index].clone();
        let state = BookingState::SlotChoice { treatment: treatment.clone() };

        let turn = advance(&catalog, &state, &slot_number.to_string());

        let slot = &catalog.slots()[slot_number - 1];
        prop_assert_eq!(turn.new_state.booked_slot(), Some(slot));
        prop_assert_eq!(turn.new_state.selected_treatment(), Some(&treatment));
        prop_assert!(turn.reply.contains(&treatment.name));
        prop_assert!(turn.reply.contains(&slot.label));
        prop_assert!(turn.reply.contains(&format_price(treatment.price)));
    }

    #[test]
    fn completed_is_terminal(
        state in arb_state().prop_filter("completed only", |s| s.stage() == Stage::Completed),
        input in arb_message(),
    ) {
        let turn = advance(&catalog(), &state, &input);

        prop_assert_eq!(&turn.new_state, &state);
        prop_assert_eq!(turn.reply.as_str(), COMPLETED_REPLY);
    }

    #[test]
    fn stages_never_go_backwards(
        messages in proptest::collection::vec(arb_message(), 1..12),
    ) {
        let catalog = catalog();
        let mut state = BookingState::default();
        for message in &messages {
            let turn = advance(&catalog, &state, message);
            prop_assert!(turn.new_state.stage() >= state.stage());
            prop_assert!(!turn.reply.is_empty());
            // A treatment is held exactly in the later two stages
            prop_assert_eq!(
                turn.new_state.selected_treatment().is_some(),
                turn.new_state.stage() >= Stage::SlotChoice
            );
            state = turn.new_state;
        }
    }

    #[test]
    fn transitions_are_deterministic(state in arb_state(), input in arb_message()) {
        let catalog = catalog();
        prop_assert_eq!(advance(&catalog, &state, &input), advance(&catalog, &state, &input));
    }
}
