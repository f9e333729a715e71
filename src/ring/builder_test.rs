// ABOUTME: Tests for ring construction and topology invariants.
// ABOUTME: Covers agent-count validation and the two-references-per-resource rule.

use std::sync::Arc;

use super::builder::{Ring, Seat};
use crate::agent::AgentPhase;
use crate::error::ConfigError;
use crate::signal::CancellationSignal;

#[test]
fn test_rejects_rings_smaller_than_two() {
    for count in [0, 1] {
        match Ring::build(count) {
            Err(ConfigError::AgentCount { count: got }) => assert_eq!(got, count),
            other => panic!("Expected AgentCount error, got {:?}", other),
        }
    }
}

#[test]
fn test_agent_binds_to_adjacent_resources() {
    let ring = Ring::build(5).unwrap();
    assert_eq!(ring.len(), 5);

    for agent in ring.agents() {
        let i = agent.index();
        assert_eq!(agent.primary().index(), i);
        assert_eq!(agent.secondary().index(), (i + 1) % 5);
    }
}

#[test]
fn test_each_resource_referenced_by_exactly_two_agents() {
    for n in [2, 3, 5, 10] {
        let ring = Ring::build(n).unwrap();
        for resource in 0..n {
            let refs = ring.references_to(resource);
            assert_eq!(refs.len(), 2, "resource {} in ring of {}", resource, n);
            assert!(refs.contains(&(resource, Seat::Primary)));
            assert!(refs.contains(&((resource + n - 1) % n, Seat::Secondary)));
        }
    }
}

#[test]
fn test_agents_share_resource_instances() {
    let ring = Ring::build(4).unwrap();
    let agents = ring.agents();

    for i in 0..4 {
        let next = &agents[(i + 1) % 4];
        assert!(Arc::ptr_eq(agents[i].secondary(), next.primary()));
        assert!(Arc::ptr_eq(agents[i].primary(), &ring.resources()[i]));
    }
}

#[test]
fn test_reference_graph_is_single_cycle() {
    let n = 7;
    let ring = Ring::build(n).unwrap();
    let agents = ring.agents();

    // Walk agent -> secondary -> agent owning it as primary
    let mut visited = vec![false; n];
    let mut current = 0;
    for _ in 0..n {
        assert!(!visited[current], "cycle closed early at agent {}", current);
        visited[current] = true;
        current = agents[current].secondary().index();
    }
    assert_eq!(current, 0);
    assert!(visited.iter().all(|&v| v));
}

#[test]
fn test_minimal_ring_shares_both_resources() {
    let ring = Ring::build(2).unwrap();
    let agents = ring.agents();

    assert_eq!(agents[0].acquisition_order(), [0, 1]);
    assert_eq!(agents[1].acquisition_order(), [0, 1]);
    assert!(Arc::ptr_eq(agents[0].primary(), agents[1].secondary()));
    assert!(Arc::ptr_eq(agents[0].secondary(), agents[1].primary()));
}

#[test]
fn test_into_agents_keeps_shared_state() {
    let ring = Ring::build(3).unwrap();
    let (handle, agents) = ring.into_agents();

    assert_eq!(agents.len(), 3);
    assert_eq!(handle.resources.len(), 3);
    assert_eq!(handle.statuses.len(), 3);
    assert!(!handle.signal.is_signaled());
}

#[test]
fn test_builder_shares_injected_signal() {
    let signal = CancellationSignal::new();
    let ring = Ring::builder(4).signal(signal.clone()).build().unwrap();

    assert!(!ring.signal().is_signaled());
    signal.signal();
    assert!(ring.signal().is_signaled());
}

#[test]
fn test_statuses_track_each_agent() {
    let ring = Ring::build(3).unwrap();
    let statuses = ring.statuses();

    assert_eq!(statuses.len(), 3);
    for (status, agent) in statuses.iter().zip(ring.agents()) {
        assert_eq!(status.phase(), agent.status().phase());
        assert_eq!(status.phase(), AgentPhase::Thinking);
        assert_eq!(status.meals(), 0);
    }
}
