use super::Replace;

#[derive(Debug, Clone, Copy)]
struct Entry {
    addr: usize,
    count: u64,
    touched: u64,
}

/// Least frequently used, with ties going to the least recently touched.
/// Timestamps come from a private logical clock.
#[derive(Debug)]
pub struct Lfru {
    capacity: usize,
    entries: Vec<Entry>,
    clock: u64,
}

impl Lfru {
    pub fn new(capacity: usize) -> Self {
        Lfru {
            capacity,
            entries: Vec::with_capacity(capacity),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn victim(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.count, e.touched))
            .map(|(idx, _)| idx)
    }
}

impl Replace for Lfru {
    fn probe(&mut self, addr: usize) -> bool {
        let now = self.tick();
        match self.entries.iter_mut().find(|e| e.addr == addr) {
            Some(entry) => {
                entry.count += 1;
                entry.touched = now;
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        if self.probe(addr) {
            return None;
        }
        let victim = if self.entries.len() >= self.capacity {
            self.victim().map(|idx| self.entries.swap_remove(idx).addr)
        } else {
            None
        };
        let touched = self.tick();
        self.entries.push(Entry {
            addr,
            count: 1,
            touched,
        });
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.entries.iter().any(|e| e.addr == addr)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.addr).collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.clock = 0;
    }
}
