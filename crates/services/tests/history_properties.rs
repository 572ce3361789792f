// Path: crates/services/tests/history_properties.rs
mod common;

use common::{deposit_params, Harness, FORGED, GOOD};
use custody_test_utils::fixtures::{account, proof};
use custody_types::app::{AccountId, Role};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Grant { actor: u8, role: Role },
    Deposit { actor: u8, forged: bool },
    Transfer { actor: u8, to: u8 },
    Process { actor: u8 },
    Reject { actor: u8 },
    Ceiling { max: u32 },
}

fn actor() -> impl Strategy<Value = u8> {
    1u8..5
}

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Consumer),
        Just(Role::Collector),
        Just(Role::Processor)
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (actor(), role()).prop_map(|(actor, role)| Step::Grant { actor, role }),
        1 => (actor(), any::<bool>()).prop_map(|(actor, forged)| Step::Deposit { actor, forged }),
        4 => (actor(), actor()).prop_map(|(actor, to)| Step::Transfer { actor, to }),
        1 => actor().prop_map(|actor| Step::Process { actor }),
        1 => actor().prop_map(|actor| Step::Reject { actor }),
        1 => (0u32..6).prop_map(|max| Step::Ceiling { max }),
    ]
}

const BATCH: u64 = 9;

proptest! {
    #[test]
    fn history_grows_by_one_per_success_and_never_changes(
        steps in prop::collection::vec(step(), 1..40)
    ) {
        let mut h = Harness::new();
        let admin = AccountId([0xAD; 32]);
        let mut seen = Vec::new();

        for step in steps {
            let before = h.count(BATCH);
            let status_before = h.ledger.get_batch_status(&h.state, BATCH).unwrap();
            let outcome = match step {
                Step::Grant { actor, role } => {
                    h.grant(account(actor), role);
                    continue;
                }
                Step::Deposit { actor, forged } => {
                    let tag = if forged { FORGED } else { GOOD };
                    h.deposit_with(account(actor), deposit_params(BATCH, proof(tag).to_vec()))
                }
                Step::Transfer { actor, to } => h.transfer(account(actor), BATCH, account(to)),
                Step::Process { actor } => h.process(account(actor), BATCH),
                Step::Reject { actor } => h.reject(account(actor), BATCH),
                Step::Ceiling { max } => {
                    let ctx = h.next_ctx(admin);
                    let _ = h.ledger.set_max_history_per_batch(&mut h.state, &ctx, max);
                    continue;
                }
            };

            let after = h.count(BATCH);
            match outcome {
                Ok(()) => prop_assert_eq!(after, before + 1),
                Err(_) => {
                    prop_assert_eq!(after, before);
                    prop_assert_eq!(
                        h.ledger.get_batch_status(&h.state, BATCH).unwrap(),
                        status_before.clone()
                    );
                }
            }
            if let Some(prev) = status_before {
                if prev.current_status.is_terminal() {
                    prop_assert_eq!(after, before);
                }
            }

            let history = h.ledger.get_batch_history(&h.state, BATCH).unwrap();
            prop_assert_eq!(history.len() as u32, after);
            prop_assert_eq!(&history[..seen.len()], &seen[..]);
            prop_assert!(h.ledger.get_batch_history_entry(&h.state, BATCH, after).unwrap().is_none());
            seen = history;
        }
    }
}
