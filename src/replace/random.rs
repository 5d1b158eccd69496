use super::Replace;

/// Evicts a uniformly chosen resident address.
#[derive(Debug)]
pub struct Random {
    capacity: usize,
    slots: Vec<usize>,
    seed: Option<u64>,
    rng: fastrand::Rng,
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

impl Random {
    /// Without a seed the generator draws from entropy.
    pub fn new(capacity: usize, seed: Option<u64>) -> Self {
        Random {
            capacity,
            slots: Vec::with_capacity(capacity),
            seed,
            rng: make_rng(seed),
        }
    }
}

impl Replace for Random {
    fn probe(&mut self, addr: usize) -> bool {
        self.slots.contains(&addr)
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        if self.slots.contains(&addr) {
            return None;
        }
        let victim = if self.slots.len() >= self.capacity {
            let idx = self.rng.usize(0..self.slots.len());
            Some(self.slots.swap_remove(idx))
        } else {
            None
        };
        self.slots.push(addr);
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.slots.contains(&addr)
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
        self.rng = make_rng(self.seed);
    }
}
