// ABOUTME: Tests for post-hoc trace analysis.
// ABOUTME: Covers meal reconstruction, overlap detection, and termination counts.

use super::{Event, EventKind, Trace};

fn ev(agent: usize, kind: EventKind) -> Event {
    Event::new(agent, kind)
}

fn eating(agent: usize, primary: usize, secondary: usize) -> Event {
    ev(agent, EventKind::Eating { primary, secondary })
}

fn released(agent: usize, primary: usize, secondary: usize) -> Event {
    ev(agent, EventKind::Released { primary, secondary })
}

#[test]
fn test_sequential_meals_do_not_overlap() {
    let trace = Trace::new(vec![
        eating(0, 0, 1),
        released(0, 0, 1),
        eating(1, 1, 2),
        released(1, 1, 2),
    ]);

    assert_eq!(trace.meals().len(), 2);
    assert!(trace.overlapping_meals().is_empty());
}

#[test]
fn test_shared_resource_overlap_detected() {
    let trace = Trace::new(vec![
        eating(0, 0, 1),
        eating(1, 1, 2),
        released(0, 0, 1),
        released(1, 1, 2),
    ]);

    let overlaps = trace.overlapping_meals();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].0.agent, 0);
    assert_eq!(overlaps[0].1.agent, 1);
}

#[test]
fn test_disjoint_resources_may_eat_together() {
    let trace = Trace::new(vec![
        eating(0, 0, 1),
        eating(2, 2, 3),
        released(0, 0, 1),
        released(2, 2, 3),
    ]);

    assert!(trace.overlapping_meals().is_empty());
}

#[test]
fn test_unfinished_meal_overlaps_later_meal() {
    let trace = Trace::new(vec![eating(0, 0, 1), eating(1, 1, 2), released(1, 1, 2)]);

    let meals = trace.meals();
    assert_eq!(meals[0].end, None);
    assert_eq!(trace.overlapping_meals().len(), 1);
}

#[test]
fn test_finished_counts_per_agent() {
    let trace = Trace::new(vec![
        ev(0, EventKind::Thinking),
        ev(0, EventKind::Finished),
        ev(1, EventKind::Finished),
        ev(1, EventKind::Finished),
    ]);

    assert_eq!(trace.finished_count(), 3);
    let by_agent = trace.finished_by_agent();
    assert_eq!(by_agent[&0], 1);
    assert_eq!(by_agent[&1], 2);
}

#[test]
fn test_acquisition_order_per_agent() {
    let trace = Trace::new(vec![
        ev(1, EventKind::Acquired { resource: 2 }),
        ev(0, EventKind::Acquired { resource: 0 }),
        ev(1, EventKind::Acquired { resource: 1 }),
        ev(0, EventKind::Acquired { resource: 1 }),
    ]);

    assert_eq!(trace.acquisition_order(0), vec![0, 1]);
    assert_eq!(trace.acquisition_order(1), vec![2, 1]);
}

#[test]
fn test_activity_after_finish() {
    let clean = Trace::new(vec![ev(0, EventKind::Thinking), ev(0, EventKind::Finished)]);
    assert!(!clean.activity_after_finish(0));

    let dirty = Trace::new(vec![ev(0, EventKind::Finished), ev(0, EventKind::Thinking)]);
    assert!(dirty.activity_after_finish(0));
}

#[test]
fn test_event_display_labels() {
    assert_eq!(EventKind::Thinking.to_string(), "thinking");
    assert_eq!(EventKind::Finished.to_string(), "finished");
    assert_eq!(
        eating(3, 3, 4).to_string(),
        "agent 3 eating with resources 3 and 4"
    );
    assert_eq!(ev(2, EventKind::Finished).to_string(), "agent 2 finished");
}
