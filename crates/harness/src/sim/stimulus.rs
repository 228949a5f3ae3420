//! Deferred stimulus queue.
//!
//! Stimulus is never written to the circuit directly. Scenario code queues operations that
//! capture their target ports and values when queued; the clock stepper drains the queue
//! right before the clock edge the stimulus is meant to affect.

use std::collections::VecDeque;
use std::fmt;

use crate::circuit::Circuit;
use crate::signal::Port;

/// A queued operation, applied exactly once at the next drain.
pub type StimulusOp<C> = Box<dyn FnOnce(&mut C)>;

/// FIFO of pending stimulus operations for a circuit of type `C`.
pub struct StimulusQueue<C> {
    ops: VecDeque<StimulusOp<C>>,
}

impl<C> StimulusQueue<C> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            ops: VecDeque::new(),
        }
    }

    /// Appends an operation.
    pub fn push(&mut self, op: impl FnOnce(&mut C) + 'static) {
        self.ops.push_back(Box::new(op));
    }

    /// Applies every queued operation in insertion order and empties the queue.
    ///
    /// The pending operations are taken out before any is applied, so the queue seen by the
    /// caller afterwards is empty. Returns the number of operations applied.
    pub fn drain(&mut self, circuit: &mut C) -> usize {
        let pending = std::mem::take(&mut self.ops);
        let count = pending.len();
        for op in pending {
            op(circuit);
        }
        count
    }

    /// Number of pending operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<C: Circuit> StimulusQueue<C> {
    /// Queues a write of `value` to `port`.
    pub fn drive(&mut self, port: Port, value: u64) {
        self.push(move |circuit: &mut C| circuit.poke(port, value));
    }
}

impl<C> Default for StimulusQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for StimulusQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StimulusQueue")
            .field("pending", &self.ops.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Ram;

    #[test]
    fn drain_applies_in_insertion_order() {
        let mut queue = StimulusQueue::<Vec<u32>>::new();
        queue.push(|log| log.push(1));
        queue.push(|log| log.push(2));
        queue.push(|log| log.push(3));

        let mut log = Vec::new();
        assert_eq!(queue.drain(&mut log), 3);
        assert_eq!(log, [1, 2, 3]);
        assert!(queue.is_empty());
        assert_eq!(queue.drain(&mut log), 0);
    }

    #[test]
    fn later_write_to_same_port_wins() {
        let mut queue = StimulusQueue::new();
        queue.drive(Port::Addr, 1);
        queue.drive(Port::Addr, 2);
        let mut ram = Ram::default();
        let _ = queue.drain(&mut ram);
        assert_eq!(ram.peek(Port::Addr), 2);
    }

    #[test]
    fn values_are_captured_at_enqueue_time() {
        let mut queue = StimulusQueue::new();
        let mut value = 5;
        queue.drive(Port::DataIn, value);
        value += 1;
        let mut ram = Ram::default();
        let _ = queue.drain(&mut ram);
        assert_eq!(ram.peek(Port::DataIn), 5);
        assert_eq!(value, 6);
    }
}
