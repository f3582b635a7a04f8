//! Structural and post-solve checks on a network.

use super::{ActivityId, EventId, Network};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl Network {
    /// Events reachable from the origin along outgoing activities.
    pub fn reachable_from_origin(&self) -> Vec<bool> {
        let mut seen = vec![false; self.event_count()];
        let mut stack = vec![self.origin()];
        seen[self.origin().0] = true;

        while let Some(id) = stack.pop() {
            for activity in self.outgoing(id) {
                let to = activity.to();
                if !seen[to.0] {
                    seen[to.0] = true;
                    stack.push(to);
                }
            }
        }
        seen
    }

    /// Depth-first cycle search over the whole network.
    ///
    /// Returns an event lying on a cycle, or `None` if the network is a DAG.
    pub fn find_cycle(&self) -> Option<EventId> {
        let mut marks = vec![Mark::Unvisited; self.event_count()];

        for start in 0..self.event_count() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (event, index of the next outgoing activity to follow)
            let mut stack: Vec<(EventId, usize)> = vec![(EventId(start), 0)];
            marks[start] = Mark::OnStack;

            while let Some(top) = stack.last_mut() {
                let (id, next) = *top;
                let outgoing = self.event(id).outgoing();
                if next < outgoing.len() {
                    top.1 += 1;
                    let to = self.activity(outgoing[next]).to();
                    match marks[to.0] {
                        Mark::OnStack => return Some(to),
                        Mark::Unvisited => {
                            marks[to.0] = Mark::OnStack;
                            stack.push((to, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[id.0] = Mark::Done;
                    stack.pop();
                }
            }
        }
        None
    }

    /// Activities whose constraint does not hold for the current times.
    pub fn constraint_violations(&self) -> Vec<ActivityId> {
        self.indexed_activities()
            .filter(|(_, a)| {
                self.event(a.to()).compressed_time()
                    < self.event(a.from()).compressed_time() + a.min_duration()
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether some incoming activity holds with equality.
    ///
    /// The origin is always tight.
    pub fn is_tight(&self, id: EventId) -> bool {
        let event = self.event(id);
        if event.is_origin() {
            return true;
        }
        self.incoming(id).any(|a| {
            event.compressed_time() == self.event(a.from()).compressed_time() + a.min_duration()
        })
    }

    /// Reachable events whose time is padded beyond every incoming bound.
    pub fn slack_events(&self) -> Vec<EventId> {
        let reachable = self.reachable_from_origin();
        self.indexed_events()
            .filter(|(id, _)| reachable[id.0] && !self.is_tight(*id))
            .map(|(id, _)| id)
            .collect()
    }
}
