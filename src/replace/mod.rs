pub mod fifo;
pub mod frequency;
pub mod lfru;
pub mod lru;
pub mod random;
pub mod round_robin;
pub mod second_chance;

use std::{fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{block::Block, error::ConfigError};

use self::{
    fifo::Fifo,
    frequency::{Lfu, Mfu},
    lfru::Lfru,
    lru::Lru,
    random::Random,
    round_robin::RoundRobin,
    second_chance::SecondChance,
};

/// A bounded store of resident addresses with its own eviction rule.
///
/// Capacity counts addresses, not blocks: filling a block of eight addresses
/// into a store of capacity four leaves only the last four resident.
pub trait Replace: fmt::Debug {
    /// Checks residency. Some policies update their recency or frequency
    /// bookkeeping on a hit.
    fn probe(&mut self, addr: usize) -> bool;

    /// Makes `addr` resident, returning the evicted address if the store was
    /// full. Inserting a resident address only touches it, as `probe` would.
    fn insert(&mut self, addr: usize) -> Option<usize>;

    /// Membership without any bookkeeping side effect.
    fn contains(&self, addr: usize) -> bool;

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    /// Resident addresses, in the policy's own internal order.
    fn resident(&self) -> Vec<usize>;

    /// Drops every resident address and all bookkeeping, as if just built.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fill(&mut self, block: Block) {
        for addr in block.addrs() {
            if let Some(victim) = self.insert(addr) {
                trace!("evict {victim} for {addr}");
            }
        }
    }
}

/// The closed set of replacement policies a hierarchy can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Policy {
    Lru,
    Fifo,
    Random,
    Lfu,
    Mfu,
    Lfru,
    SecondChance,
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 8] = [
        Policy::Lru,
        Policy::Fifo,
        Policy::Random,
        Policy::Lfu,
        Policy::Mfu,
        Policy::Lfru,
        Policy::SecondChance,
        Policy::RoundRobin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Policy::Lru => "LRU",
            Policy::Fifo => "FIFO",
            Policy::Random => "Random",
            Policy::Lfu => "LFU",
            Policy::Mfu => "MFU",
            Policy::Lfru => "LFRU",
            Policy::SecondChance => "SecondChance",
            Policy::RoundRobin => "RoundRobin",
        }
    }

    /// Builds a store of this policy. `seed` only matters for `Random`; without
    /// one the generator is seeded from entropy.
    pub fn build(
        self,
        capacity: usize,
        seed: Option<u64>,
    ) -> Result<Box<dyn Replace>, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity { what: self.name() });
        }
        Ok(match self {
            Policy::Lru => Box::new(Lru::new(capacity)) as Box<dyn Replace>,
            Policy::Fifo => Box::new(Fifo::new(capacity)) as Box<dyn Replace>,
            Policy::Random => Box::new(Random::new(capacity, seed)) as Box<dyn Replace>,
            Policy::Lfu => Box::new(Lfu::new(capacity)) as Box<dyn Replace>,
            Policy::Mfu => Box::new(Mfu::new(capacity)) as Box<dyn Replace>,
            Policy::Lfru => Box::new(Lfru::new(capacity)) as Box<dyn Replace>,
            Policy::SecondChance => Box::new(SecondChance::new(capacity)) as Box<dyn Replace>,
            Policy::RoundRobin => Box::new(RoundRobin::new(capacity)) as Box<dyn Replace>,
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "lru" => Ok(Policy::Lru),
            "fifo" => Ok(Policy::Fifo),
            "random" => Ok(Policy::Random),
            "lfu" => Ok(Policy::Lfu),
            "mfu" => Ok(Policy::Mfu),
            "lfru" => Ok(Policy::Lfru),
            "secondchance" => Ok(Policy::SecondChance),
            "roundrobin" | "rr" => Ok(Policy::RoundRobin),
            _ => Err(ConfigError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Policy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Policy> for String {
    fn from(policy: Policy) -> Self {
        policy.name().to_owned()
    }
}
