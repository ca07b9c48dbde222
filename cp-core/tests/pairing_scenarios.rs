//! Pairing Engine Integration Tests
//!
//! Drives the engine the way the pairing screen does:
//! - Drag sequences (move deltas, then drag end with the final rect)
//! - Eviction when a third element lands on a full stage
//! - Match evaluation and the completion signal
//! - Invariants over arbitrary add/remove/drop sequences

use std::{cell::RefCell, rc::Rc, time::Duration};

use cp_core::{ElementId, MatchRule, Offset, PairingEngine, Rect, Slot, StageLayout};
use proptest::prelude::*;

const SLOT_A: Rect = Rect::new(70.0, 75.0, 100.0, 100.0);
const SLOT_B: Rect = Rect::new(230.0, 75.0, 100.0, 100.0);

fn layout() -> StageLayout {
    StageLayout {
        stage: Rect::new(50.0, 50.0, 300.0, 150.0),
        slot_a: SLOT_A,
        slot_b: SLOT_B,
    }
}

/// Resting rect of element `i`: 50px squares in a row below the stage.
fn resting(i: u32) -> Rect {
    Rect::new(f64::from(i) * 60.0, 400.0, 50.0, 50.0)
}

fn engine() -> PairingEngine {
    let mut engine = PairingEngine::new(
        layout(),
        (1..=10).map(|i| (ElementId::new(i), resting(i))),
        MatchRule::Adjacent,
        Duration::from_millis(3000),
    );
    engine.start();
    engine
}

fn id(n: u32) -> ElementId {
    ElementId::new(n)
}

/// Drag element `n` so its top-left lands at (`left`, `top`) and release it.
fn drag_to(engine: &mut PairingEngine, n: u32, left: f64, top: f64) {
    let current = engine.element(id(n)).expect("known element").current_rect();
    engine
        .on_drag_move(id(n), left - current.left, top - current.top)
        .expect("drag move");
    let final_rect = engine.element(id(n)).expect("known element").current_rect();
    engine.on_drag_end(id(n), final_rect).expect("drag end");
}

// ============================================================================
// Drag Scenarios
// ============================================================================

#[test]
fn test_drag_three_then_four_then_match() {
    let mut engine = engine();
    let completions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&completions);
    engine.on_complete(move |pair| sink.borrow_mut().push(pair));

    drag_to(&mut engine, 3, 100.0, 100.0);
    assert_eq!(engine.staged(), &[id(3)]);
    assert!(!engine.match_enabled());

    drag_to(&mut engine, 4, 260.0, 100.0);
    assert_eq!(engine.staged(), &[id(3), id(4)]);
    assert!(engine.match_enabled());

    let outcome = engine.evaluate_match().expect("two staged");
    assert!(outcome.matched);
    assert_eq!((outcome.first, outcome.second), (id(3), id(4)));

    let notice = outcome.notice.expect("success notice");
    assert_eq!(notice.title, "匹配成功！");
    assert!(notice.message.contains("元素 3 和元素 4"));
    assert_eq!(notice.dismiss_after, Duration::from_millis(3000));

    assert_eq!(*completions.borrow(), vec![(id(3), id(4))]);
}

#[test]
fn test_completion_fires_once_per_start() {
    let mut engine = engine();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    engine.on_complete(move |_| *sink.borrow_mut() += 1);

    engine.add_to_stage(id(1)).expect("stage 1");
    engine.add_to_stage(id(2)).expect("stage 2");
    assert!(engine.evaluate_match().is_some_and(|o| o.matched));
    assert!(engine.evaluate_match().is_some_and(|o| o.matched));
    assert_eq!(*count.borrow(), 1);

    engine.start();
    engine.add_to_stage(id(5)).expect("stage 5");
    engine.add_to_stage(id(6)).expect("stage 6");
    engine.evaluate_match();
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn test_third_element_evicts_nearest_staged() {
    let mut engine = engine();
    drag_to(&mut engine, 3, 100.0, 100.0);
    drag_to(&mut engine, 4, 260.0, 100.0);

    // Element 7 lands right next to slot B, where 4 sits.
    drag_to(&mut engine, 7, 250.0, 100.0);

    assert_eq!(engine.staged().len(), 2);
    assert!(engine.is_staged(id(3)));
    assert!(engine.is_staged(id(7)));
    assert!(!engine.is_staged(id(4)));

    let evicted = engine.element(id(4)).expect("element 4");
    assert_eq!(evicted.current_rect(), resting(4));
    assert_eq!(engine.element(id(7)).and_then(|e| e.slot()), Some(Slot::B));
}

#[test]
fn test_eviction_near_slot_a_refills_slot_a() {
    let mut engine = engine();
    drag_to(&mut engine, 3, 100.0, 100.0);
    drag_to(&mut engine, 4, 260.0, 100.0);
    drag_to(&mut engine, 7, 90.0, 110.0);

    assert_eq!(engine.staged(), &[id(4), id(7)]);
    let seven = engine.element(id(7)).expect("element 7");
    assert_eq!(seven.slot(), Some(Slot::A));
    assert_eq!(seven.current_rect().center(), SLOT_A.center());
}

#[test]
fn test_equidistant_drop_evicts_first_placed() {
    let mut engine = engine();
    engine.add_to_stage(id(3)).expect("stage 3");
    engine.add_to_stage(id(4)).expect("stage 4");

    // Centre (200, 125) sits halfway between the slot centres.
    drag_to(&mut engine, 7, 175.0, 100.0);

    assert_eq!(engine.staged(), &[id(4), id(7)]);
}

#[test]
fn test_drop_off_stage_returns_staged_element_home() {
    let mut engine = engine();
    drag_to(&mut engine, 5, 100.0, 100.0);
    assert!(engine.is_staged(id(5)));

    drag_to(&mut engine, 5, 600.0, 600.0);

    let five = engine.element(id(5)).expect("element 5");
    assert!(!five.is_staged());
    assert_eq!(five.offset(), Offset::ZERO);
    assert_eq!(five.current_rect(), resting(5));
    assert!(engine.staged().is_empty());
}

#[test]
fn test_touching_stage_edge_counts_as_on_stage() {
    let mut engine = engine();
    // Stage spans x 50..350; element right edge at exactly 50.
    drag_to(&mut engine, 2, 0.0, 100.0);
    assert!(engine.is_staged(id(2)));
}

#[test]
fn test_add_to_stage_is_idempotent() {
    let mut engine = engine();
    engine.add_to_stage(id(8)).expect("stage 8");
    engine.add_to_stage(id(9)).expect("stage 9");
    let before = engine.staged().to_vec();

    engine.add_to_stage(id(8)).expect("stage 8 again");
    assert_eq!(engine.staged(), before.as_slice());
}

#[test]
fn test_start_twice_yields_same_empty_state() {
    let mut engine = engine();
    engine.add_to_stage(id(1)).expect("stage 1");
    engine.add_to_stage(id(2)).expect("stage 2");

    engine.start();
    let staged_once = engine.staged().to_vec();
    let enabled_once = engine.match_enabled();
    engine.start();

    assert!(staged_once.is_empty());
    assert!(!enabled_once);
    assert_eq!(engine.staged(), staged_once.as_slice());
    assert_eq!(engine.match_enabled(), enabled_once);
    assert!(engine.elements().all(|e| e.offset() == Offset::ZERO));
}

#[test]
fn test_remove_unstaged_element_reports_false() {
    let mut engine = engine();
    assert_eq!(engine.remove_from_stage(id(1)).ok(), Some(false));
    assert!(!engine.match_enabled());
}

// ============================================================================
// Property Tests
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Remove(u32),
    Drop { id: u32, left: f64, top: f64 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..=10).prop_map(Op::Add),
        (1u32..=10).prop_map(Op::Remove),
        (1u32..=10, 0.0f64..700.0, 0.0f64..700.0)
            .prop_map(|(id, left, top)| Op::Drop { id, left, top }),
    ]
}

proptest! {
    #[test]
    fn prop_stage_invariants_hold(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut engine = engine();

        for op in ops {
            match op {
                Op::Add(n) => engine.add_to_stage(id(n)).expect("add"),
                Op::Remove(n) => {
                    engine.remove_from_stage(id(n)).expect("remove");
                }
                Op::Drop { id: n, left, top } => drag_to(&mut engine, n, left, top),
            }

            prop_assert!(engine.staged().len() <= 2);
            prop_assert_eq!(engine.match_enabled(), engine.staged().len() == 2);

            let mut slots = Vec::new();
            for element in engine.elements() {
                prop_assert_eq!(element.is_staged(), engine.is_staged(element.id));
                if let Some(slot) = element.slot() {
                    slots.push(slot);
                }
            }
            slots.sort_by_key(|slot| *slot == Slot::B);
            slots.dedup();
            prop_assert_eq!(slots.len(), engine.staged().len(), "two elements share a slot");
        }
    }

    #[test]
    fn prop_match_iff_adjacent(a in 1u32..=10, b in 1u32..=10) {
        prop_assume!(a != b);
        let mut engine = engine();
        engine.add_to_stage(id(a)).expect("stage a");
        engine.add_to_stage(id(b)).expect("stage b");

        let outcome = engine.evaluate_match().expect("two staged");
        prop_assert_eq!(outcome.matched, a.abs_diff(b) == 1);
        prop_assert_eq!(outcome.notice.is_some(), outcome.matched);
    }

    #[test]
    fn prop_remove_restores_resting_rect(n in 1u32..=10, left in 0.0f64..400.0, top in 0.0f64..400.0) {
        let mut engine = engine();
        drag_to(&mut engine, n, left, top);
        engine.add_to_stage(id(n)).expect("stage");
        engine.remove_from_stage(id(n)).expect("remove");

        let element = engine.element(id(n)).expect("element");
        prop_assert_eq!(element.current_rect(), resting(n));
    }
}
