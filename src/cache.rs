use crate::{
    block::Block,
    config::CacheConfig,
    error::ConfigError,
    replace::{Policy, Replace},
};

/// One cache tier: a replacement store plus its hit latency.
#[derive(Debug)]
pub struct CacheLevel {
    pub name: String,
    pub block_size: usize,
    pub hit_time: u32,
    pub repl: Box<dyn Replace>,
}

impl CacheLevel {
    pub fn new(
        name: String,
        block_size: usize,
        hit_time: u32,
        repl: Box<dyn Replace>,
    ) -> Self {
        CacheLevel {
            name,
            block_size,
            hit_time,
            repl,
        }
    }

    pub fn from_config(
        idx: usize,
        cc: &CacheConfig,
        policy: Policy,
        block_size: usize,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        // Distinct streams per level so seeded levels do not evict in lockstep.
        let seed = seed.map(|s| s.wrapping_add(idx as u64));
        let repl = policy.build(cc.size, seed)?;
        Ok(CacheLevel::new(
            format!("L{}", idx + 1),
            block_size,
            cc.hit_time,
            repl,
        ))
    }

    pub fn block_of(&self, addr: usize) -> Block {
        Block::of(addr, self.block_size)
    }

    /// A level hits when any address of the block is resident. Probing stops at
    /// the first resident address, so only that one sees the probe side effect.
    pub fn lookup(&mut self, addr: usize) -> bool {
        let block = self.block_of(addr);
        block.addrs().any(|a| self.repl.probe(a))
    }

    pub fn fill(&mut self, addr: usize) {
        let block = self.block_of(addr);
        self.repl.fill(block);
    }

    pub fn clear(&mut self) {
        self.repl.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(policy: Policy, size: usize, block_size: usize) -> CacheLevel {
        let cc = CacheConfig { size, hit_time: 4 };
        CacheLevel::from_config(0, &cc, policy, block_size, Some(1)).unwrap()
    }

    #[test]
    fn named_by_depth() {
        let cc = CacheConfig { size: 8, hit_time: 20 };
        let l2 = CacheLevel::from_config(1, &cc, Policy::Fifo, 4, None).unwrap();
        assert_eq!(l2.name, "L2");
        assert_eq!(l2.hit_time, 20);
        assert_eq!(l2.repl.capacity(), 8);
    }

    #[test]
    fn any_resident_address_hits_the_block() {
        let mut l1 = level(Policy::Lru, 2, 4);
        l1.fill(0);
        // capacity two keeps only the tail of [0, 3]
        assert_eq!(l1.repl.len(), 2);
        assert!(l1.lookup(0));
        assert!(l1.lookup(1));
        assert!(!l1.lookup(4));
    }

    #[test]
    fn fill_uses_the_whole_block() {
        let mut l1 = level(Policy::Fifo, 16, 8);
        l1.fill(13);
        let mut resident = l1.repl.resident();
        resident.sort_unstable();
        assert_eq!(resident, (8..16).collect::<Vec<_>>());
    }
}
