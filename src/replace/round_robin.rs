use std::collections::HashSet;

use super::Replace;

/// Fixed slots overwritten in turn once full, independent of access pattern.
#[derive(Debug)]
pub struct RoundRobin {
    capacity: usize,
    slots: Vec<usize>,
    members: HashSet<usize>,
    cursor: usize,
}

impl RoundRobin {
    pub fn new(capacity: usize) -> Self {
        RoundRobin {
            capacity,
            slots: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Slot the next eviction will overwrite.
    pub fn next_slot(&self) -> usize {
        self.cursor % self.capacity
    }
}

impl Replace for RoundRobin {
    fn probe(&mut self, addr: usize) -> bool {
        self.members.contains(&addr)
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        if self.members.contains(&addr) {
            return None;
        }
        let victim = if self.slots.len() >= self.capacity {
            let slot = self.next_slot();
            let victim = std::mem::replace(&mut self.slots[slot], addr);
            self.members.remove(&victim);
            self.cursor += 1;
            Some(victim)
        } else {
            self.slots.push(addr);
            None
        };
        self.members.insert(addr);
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.members.contains(&addr)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident(&self) -> Vec<usize> {
        self.slots.clone()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.members.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evictions_cycle_through_slots() {
        let mut rr = RoundRobin::new(3);
        for addr in 0..3 {
            rr.insert(addr);
        }
        let mut slots = Vec::new();
        for addr in 10..17 {
            slots.push(rr.next_slot());
            rr.insert(addr);
        }
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(rr.resident(), vec![16, 14, 15]);
    }

    #[test]
    fn hits_do_not_move_cursor() {
        let mut rr = RoundRobin::new(2);
        rr.insert(1);
        rr.insert(2);
        rr.probe(1);
        rr.probe(1);
        assert_eq!(rr.insert(3), Some(1));
        assert_eq!(rr.insert(4), Some(2));
    }
}
