// ABOUTME: Post-hoc analysis over a recorded event stream.
// ABOUTME: Reconstructs meals and checks termination and acquisition order.

use std::collections::BTreeMap;

use super::{Event, EventKind};

/// One eating interval, in positions of the recorded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meal {
    pub agent: usize,
    pub resources: [usize; 2],
    /// Position of the `Eating` event.
    pub start: usize,
    /// Position of the matching `Released` event, if one was recorded.
    pub end: Option<usize>,
}

impl Meal {
    fn overlaps(&self, other: &Meal) -> bool {
        let (first, second) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        match first.end {
            Some(end) => second.start < end,
            None => true,
        }
    }
}

/// A recorded event stream with helpers for checking run properties.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Total number of `Finished` events.
    pub fn finished_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Finished)
            .count()
    }

    /// Number of `Finished` events per agent.
    pub fn finished_by_agent(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for event in self.events.iter().filter(|e| e.kind == EventKind::Finished) {
            *counts.entry(event.agent).or_insert(0) += 1;
        }
        counts
    }

    /// Resources in the order `agent` acquired them.
    pub fn acquisition_order(&self, agent: usize) -> Vec<usize> {
        self.events
            .iter()
            .filter(|e| e.agent == agent)
            .filter_map(|e| match e.kind {
                EventKind::Acquired { resource } => Some(resource),
                _ => None,
            })
            .collect()
    }

    /// Returns true if `agent` emitted any event after its `Finished`.
    pub fn activity_after_finish(&self, agent: usize) -> bool {
        let mut finished = false;
        for event in self.events.iter().filter(|e| e.agent == agent) {
            if finished {
                return true;
            }
            finished = event.kind == EventKind::Finished;
        }
        false
    }

    /// Every eating interval in the stream.
    pub fn meals(&self) -> Vec<Meal> {
        let mut open: BTreeMap<usize, Meal> = BTreeMap::new();
        let mut meals = Vec::new();

        for (position, event) in self.events.iter().enumerate() {
            match event.kind {
                EventKind::Eating { primary, secondary } => {
                    let meal = Meal {
                        agent: event.agent,
                        resources: [primary, secondary],
                        start: position,
                        end: None,
                    };
                    if let Some(stale) = open.insert(event.agent, meal) {
                        meals.push(stale);
                    }
                }
                EventKind::Released { .. } => {
                    if let Some(mut meal) = open.remove(&event.agent) {
                        meal.end = Some(position);
                        meals.push(meal);
                    }
                }
                _ => {}
            }
        }

        meals.extend(open.into_values());
        meals.sort_by_key(|m| m.start);
        meals
    }

    /// Pairs of meals that share a resource and overlap in time.
    ///
    /// An empty result means no resource was ever eaten with by two agents
    /// at once.
    pub fn overlapping_meals(&self) -> Vec<(Meal, Meal)> {
        let meals = self.meals();
        let mut by_resource: BTreeMap<usize, Vec<Meal>> = BTreeMap::new();
        for meal in &meals {
            for &resource in &meal.resources {
                by_resource.entry(resource).or_default().push(*meal);
            }
        }

        let mut overlaps = Vec::new();
        for meals in by_resource.into_values() {
            for (i, a) in meals.iter().enumerate() {
                for b in &meals[i + 1..] {
                    if b.start > a.end.unwrap_or(usize::MAX) {
                        break;
                    }
                    if a.agent != b.agent && a.overlaps(b) {
                        overlaps.push((*a, *b));
                    }
                }
            }
        }
        overlaps
    }
}
