use super::Replace;

/// Usage counters kept in insertion order, so that ties resolve to the
/// earliest inserted surviving address.
#[derive(Debug)]
struct UsageTable {
    entries: Vec<(usize, u64)>,
}

impl UsageTable {
    fn with_capacity(capacity: usize) -> Self {
        UsageTable {
            entries: Vec::with_capacity(capacity),
        }
    }

    fn bump(&mut self, addr: usize) -> bool {
        match self.entries.iter_mut().find(|(a, _)| *a == addr) {
            Some((_, count)) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// First entry whose count beats every earlier one under `better`.
    fn pick(&self, better: impl Fn(u64, u64) -> bool) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (idx, &(_, count)) in self.entries.iter().enumerate() {
            match best {
                Some((_, best_count)) if !better(count, best_count) => {}
                _ => best = Some((idx, count)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    fn insert(
        &mut self,
        addr: usize,
        capacity: usize,
        better: impl Fn(u64, u64) -> bool,
    ) -> Option<usize> {
        if self.bump(addr) {
            return None;
        }
        let victim = if self.entries.len() >= capacity {
            self.pick(better).map(|idx| self.entries.remove(idx).0)
        } else {
            None
        };
        self.entries.push((addr, 1));
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.entries.iter().any(|(a, _)| *a == addr)
    }

    fn count(&self, addr: usize) -> Option<u64> {
        self.entries.iter().find(|(a, _)| *a == addr).map(|(_, c)| *c)
    }

    fn addrs(&self) -> Vec<usize> {
        self.entries.iter().map(|(a, _)| *a).collect()
    }
}

/// Least frequently used.
#[derive(Debug)]
pub struct Lfu {
    capacity: usize,
    usage: UsageTable,
}

impl Lfu {
    pub fn new(capacity: usize) -> Self {
        Lfu {
            capacity,
            usage: UsageTable::with_capacity(capacity),
        }
    }

    pub fn usage(&self, addr: usize) -> Option<u64> {
        self.usage.count(addr)
    }
}

impl Replace for Lfu {
    fn probe(&mut self, addr: usize) -> bool {
        self.usage.bump(addr)
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        self.usage.insert(addr, self.capacity, |count, best| count < best)
    }

    fn contains(&self, addr: usize) -> bool {
        self.usage.contains(addr)
    }

    fn len(&self) -> usize {
        self.usage.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident(&self) -> Vec<usize> {
        self.usage.addrs()
    }

    fn clear(&mut self) {
        self.usage.entries.clear();
    }
}

/// Most frequently used.
#[derive(Debug)]
pub struct Mfu {
    capacity: usize,
    usage: UsageTable,
}

impl Mfu {
    pub fn new(capacity: usize) -> Self {
        Mfu {
            capacity,
            usage: UsageTable::with_capacity(capacity),
        }
    }

    pub fn usage(&self, addr: usize) -> Option<u64> {
        self.usage.count(addr)
    }
}

impl Replace for Mfu {
    fn probe(&mut self, addr: usize) -> bool {
        self.usage.bump(addr)
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        self.usage.insert(addr, self.capacity, |count, best| count > best)
    }

    fn contains(&self, addr: usize) -> bool {
        self.usage.contains(addr)
    }

    fn len(&self) -> usize {
        self.usage.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident(&self) -> Vec<usize> {
        self.usage.addrs()
    }

    fn clear(&mut self) {
        self.usage.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lfu_evicts_lowest_count() {
        let mut lfu = Lfu::new(3);
        for addr in 1..=3 {
            lfu.insert(addr);
        }
        lfu.probe(1);
        lfu.probe(3);
        assert_eq!(lfu.insert(4), Some(2));
    }

    #[test]
    fn lfu_ties_go_to_earliest() {
        let mut lfu = Lfu::new(3);
        for addr in [9, 5, 7] {
            lfu.insert(addr);
        }
        assert_eq!(lfu.insert(1), Some(9));
        // 5 and 7 still at one, 1 is fresh at one too
        assert_eq!(lfu.insert(2), Some(5));
    }

    #[test]
    fn new_entries_start_at_one() {
        let mut lfu = Lfu::new(2);
        lfu.insert(1);
        lfu.probe(1);
        lfu.probe(1);
        assert_eq!(lfu.usage(1), Some(3));
        lfu.insert(2);
        assert_eq!(lfu.usage(2), Some(1));
        assert_eq!(lfu.insert(3), Some(2));
        assert_eq!(lfu.usage(3), Some(1));
        assert_eq!(lfu.usage(2), None);
    }

    #[test]
    fn mfu_evicts_highest_count() {
        let mut mfu = Mfu::new(1);
        mfu.insert(5);
        mfu.insert(5);
        assert_eq!(mfu.usage(5), Some(2));
        assert_eq!(mfu.insert(6), Some(5));
        assert!(mfu.contains(6));
    }

    #[test]
    fn mfu_keeps_cold_entries() {
        let mut mfu = Mfu::new(3);
        for addr in 1..=3 {
            mfu.insert(addr);
        }
        mfu.probe(2);
        assert_eq!(mfu.insert(4), Some(2));
        // all at one now, first encountered goes
        assert_eq!(mfu.insert(5), Some(1));
    }
}
