use std::collections::VecDeque;

use super::Replace;

/// Recency ordered store. Front of the queue is the most recently used.
#[derive(Debug)]
pub struct Lru {
    capacity: usize,
    ru_order: VecDeque<usize>,
}

impl Lru {
    pub fn new(capacity: usize) -> Self {
        Lru {
            capacity,
            ru_order: VecDeque::with_capacity(capacity),
        }
    }
}

fn move_to_front(queue: &mut VecDeque<usize>, idx: usize) {
    if let Some(val) = queue.remove(idx) {
        queue.push_front(val);
    }
}

impl Replace for Lru {
    fn probe(&mut self, addr: usize) -> bool {
        match self.ru_order.iter().position(|&a| a == addr) {
            Some(idx) => {
                move_to_front(&mut self.ru_order, idx);
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        if self.probe(addr) {
            return None;
        }
        let victim = if self.ru_order.len() >= self.capacity {
            self.ru_order.pop_back()
        } else {
            None
        };
        self.ru_order.push_front(addr);
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.ru_order.contains(&addr)
    }

    fn len(&self) -> usize {
        self.ru_order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident(&self) -> Vec<usize> {
        self.ru_order.iter().copied().collect()
    }

    fn clear(&mut self) {
        self.ru_order.clear();
    }
}
