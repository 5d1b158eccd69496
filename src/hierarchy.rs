use log::{debug, trace};
use serde::Serialize;

use crate::{
    cache::CacheLevel,
    config::Config,
    error::ConfigError,
    memory::{Disk, MainMemory},
    stats::{Counters, PerformanceSnapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "hit")]
    Hit,
    #[serde(rename = "hit(RAM)")]
    HitRam,
    #[serde(rename = "miss")]
    Miss,
}

/// Outcome of one address. `level` indexes the counters: cache levels first,
/// then RAM, then Disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessResult {
    pub address: usize,
    pub status: Status,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub results: Vec<AccessResult>,
    pub stats: PerformanceSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled {
    /// Addresses processed before the stop was observed.
    pub processed: usize,
}

#[derive(Debug)]
pub struct MemoryHierarchy {
    pub caches: Vec<CacheLevel>,
    pub ram: MainMemory,
    pub disk: Disk,
    pub counters: Counters,
    results: Vec<AccessResult>,
}

impl MemoryHierarchy {
    /// Builds fresh levels from `config`. Nothing is shared with any previous
    /// hierarchy built from the same config.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let caches = config
            .caches
            .iter()
            .enumerate()
            .map(|(idx, cc)| {
                CacheLevel::from_config(idx, cc, config.policy, config.block_size, config.seed)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ram = MainMemory::new(config.ram_size, config.ram_access_time)?;
        debug!(
            "Built hierarchy: {} cache level(s), policy {}, block size {}, RAM {} @ {}, disk @ {}",
            caches.len(),
            config.policy,
            config.block_size,
            config.ram_size,
            config.ram_access_time,
            config.disk_access_time,
        );
        Ok(MemoryHierarchy {
            counters: Counters::new(caches.len()),
            caches,
            ram,
            disk: Disk {
                access_time: config.disk_access_time,
            },
            results: Vec::new(),
        })
    }

    pub fn results(&self) -> &[AccessResult] {
        &self.results
    }

    /// Empties every level, RAM, the counters and the recorded outcomes.
    pub fn reset(&mut self) {
        for cache in &mut self.caches {
            cache.clear();
        }
        self.ram.clear();
        self.counters.clear();
        self.results.clear();
    }

    pub fn access(&mut self, address: usize) -> AccessResult {
        let cache_hit = self
            .caches
            .iter_mut()
            .position(|cache| cache.lookup(address));

        let result = match cache_hit {
            Some(level) => AccessResult {
                address,
                status: Status::Hit,
                level,
            },
            None => {
                let result = if self.ram.probe(address) {
                    AccessResult {
                        address,
                        status: Status::HitRam,
                        level: self.counters.ram_idx(),
                    }
                } else {
                    if let Some(victim) = self.ram.install(address) {
                        trace!("RAM: evict {victim} for {address}");
                    }
                    AccessResult {
                        address,
                        status: Status::Miss,
                        level: self.counters.disk_idx(),
                    }
                };
                for cache in &mut self.caches {
                    cache.fill(address);
                }
                result
            }
        };

        self.counters.record(result.level);
        trace!("{address}: {:?} at level {}", result.status, result.level);
        self.results.push(result);
        result
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        let hit_times: Vec<u32> = self.caches.iter().map(|c| c.hit_time).collect();
        PerformanceSnapshot::compute(
            &self.counters,
            &hit_times,
            self.ram.access_time,
            self.disk.access_time,
        )
    }

    fn finish(&self) -> Simulation {
        Simulation {
            results: self.results.clone(),
            stats: self.snapshot(),
        }
    }

    /// Runs every address in order from a cold hierarchy and derives the
    /// statistics once at the end. State left by earlier runs is dropped first.
    pub fn simulate(&mut self, addresses: &[usize]) -> Simulation {
        self.reset();
        for &address in addresses {
            self.access(address);
        }
        self.finish()
    }

    /// Like `simulate`, checking `should_stop` before each address. A stopped
    /// run leaves the hierarchy cold and yields no snapshot.
    pub fn simulate_with_cancel(
        &mut self,
        addresses: &[usize],
        mut should_stop: impl FnMut() -> bool,
    ) -> Result<Simulation, Cancelled> {
        self.reset();
        for (processed, &address) in addresses.iter().enumerate() {
            if should_stop() {
                debug!("Simulation stopped after {processed} addresses");
                self.reset();
                return Err(Cancelled { processed });
            }
            self.access(address);
        }
        Ok(self.finish())
    }
}

/// Builds a fresh hierarchy from `config` and runs `addresses` through it.
pub fn simulate(config: &Config, addresses: &[usize]) -> Result<Simulation, ConfigError> {
    Ok(MemoryHierarchy::new(config)?.simulate(addresses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::CacheConfig,
        replace::{Policy, Replace},
    };

    fn config(levels: &[(usize, u32)], policy: Policy, block_size: usize) -> Config {
        Config {
            caches: levels
                .iter()
                .map(|&(size, hit_time)| CacheConfig { size, hit_time })
                .collect(),
            policy,
            block_size,
            seed: Some(0),
            ..Config::default()
        }
    }

    #[test]
    fn first_touch_misses_then_hits() {
        let mut mh = MemoryHierarchy::new(&config(&[(8, 1)], Policy::Lru, 4)).unwrap();
        assert_eq!(mh.access(5).status, Status::Miss);
        let again = mh.access(6);
        assert_eq!(again.status, Status::Hit);
        assert_eq!(again.level, 0);
    }

    #[test]
    fn miss_fills_every_level() {
        let mut mh = MemoryHierarchy::new(&config(&[(4, 1), (8, 10)], Policy::Fifo, 4)).unwrap();
        mh.access(0);
        assert!(mh.caches.iter().all(|c| c.repl.contains(0) && c.repl.contains(3)));
        assert!(mh.ram.probe(0));
        assert!(!mh.ram.probe(1));
    }

    #[test]
    fn deeper_level_hit_leaves_shallower_alone() {
        // L1 holds one block, L2 holds two
        let mut mh = MemoryHierarchy::new(&config(&[(2, 1), (4, 10)], Policy::Fifo, 2)).unwrap();
        mh.access(0);
        mh.access(2);
        let res = mh.access(0);
        assert_eq!(res.status, Status::Hit);
        assert_eq!(res.level, 1);
        assert!(!mh.caches[0].repl.contains(0));
        assert_eq!(mh.counters.accesses, vec![3, 3, 2, 2]);
        assert_eq!(mh.counters.hits, vec![0, 1, 0, 2]);
    }

    #[test]
    fn ram_hit_backfills_caches() {
        let mut mh = MemoryHierarchy::new(&config(&[(1, 1)], Policy::Lru, 1)).unwrap();
        mh.access(0);
        mh.access(1);
        let res = mh.access(0);
        assert_eq!(res.status, Status::HitRam);
        assert_eq!(res.level, 1);
        assert!(mh.caches[0].repl.contains(0));
        assert_eq!(mh.counters.accesses, vec![3, 3, 2]);
        assert_eq!(mh.counters.hits, vec![0, 1, 2]);
    }

    #[test]
    fn results_are_in_input_order() {
        let sim = simulate(&config(&[(16, 5)], Policy::Lfu, 8), &[3, 100, 4, 9]).unwrap();
        let addrs: Vec<_> = sim.results.iter().map(|r| r.address).collect();
        assert_eq!(addrs, vec![3, 100, 4, 9]);
        assert_eq!(sim.results[2].status, Status::Hit);
    }

    #[test]
    fn bad_config_builds_nothing() {
        let err = MemoryHierarchy::new(&config(&[], Policy::Lru, 4)).unwrap_err();
        assert_eq!(err, ConfigError::NoCacheLevels);
    }

    #[test]
    fn cancel_stops_between_addresses() {
        let mut mh = MemoryHierarchy::new(&config(&[(4, 1)], Policy::Lru, 1)).unwrap();
        let mut budget = 2;
        let res = mh.simulate_with_cancel(&[1, 2, 3, 4], || {
            if budget == 0 {
                true
            } else {
                budget -= 1;
                false
            }
        });
        assert_eq!(res, Err(Cancelled { processed: 2 }));
        assert!(mh.results().is_empty());
        assert_eq!(mh.counters, Counters::new(1));
        assert!(mh.ram.is_empty());
        assert!(mh.caches[0].repl.is_empty());
    }

    #[test]
    fn run_after_cancel_sees_only_its_own_addresses() {
        let mut mh = MemoryHierarchy::new(&config(&[(8, 1)], Policy::Lru, 4)).unwrap();
        let mut left = 2;
        let res = mh.simulate_with_cancel(&[0, 4, 8], || {
            if left == 0 {
                return true;
            }
            left -= 1;
            false
        });
        assert!(res.is_err());

        let sim = mh.simulate(&[12]);
        assert_eq!(sim.results.len(), 1);
        assert_eq!(sim.results[0].status, Status::Miss);
        assert_eq!(mh.counters.accesses, vec![1, 1, 1]);
    }

    #[test]
    fn repeated_runs_on_one_hierarchy_match() {
        for policy in Policy::ALL {
            let mut mh = MemoryHierarchy::new(&config(&[(8, 1), (16, 6)], policy, 4)).unwrap();
            let addrs = [0, 1, 9, 33, 0, 17, 64, 1];
            let first = mh.simulate(&addrs);
            let second = mh.simulate(&addrs);
            assert_eq!(first, second, "{policy}");
            assert_eq!(second.results.len(), addrs.len());
        }
    }

    #[test]
    fn reuse_starts_cold() {
        let mut mh = MemoryHierarchy::new(&config(&[(8, 1)], Policy::Lru, 4)).unwrap();
        let first = mh.simulate(&[0, 1]);
        assert!((first.stats.hit_rate - 50.0).abs() < 1e-9);
        let second = mh.simulate(&[0, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn status_serializes_like_the_report() {
        let json = serde_json::to_string(&AccessResult {
            address: 4,
            status: Status::HitRam,
            level: 1,
        })
        .unwrap();
        assert_eq!(json, r#"{"address":4,"status":"hit(RAM)","level":1}"#);
    }
}
