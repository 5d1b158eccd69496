use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, MAX_CACHE_LEVELS},
    replace::Policy,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Capacity in addresses.
    pub size: usize,
    #[serde(default)]
    pub hit_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub caches: Vec<CacheConfig>,
    pub policy: Policy,
    pub block_size: usize,
    pub address_size: usize,
    /// RAM capacity in addresses.
    pub ram_size: usize,
    pub ram_access_time: u32,
    pub disk_access_time: u32,
    /// Seeds the `Random` policy. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            caches: vec![CacheConfig {
                size: 16,
                hit_time: 5,
            }],
            policy: Policy::Lru,
            block_size: 8,
            address_size: 8192,
            ram_size: 8192,
            ram_access_time: 300,
            disk_access_time: 15000,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.caches.is_empty() {
            return Err(ConfigError::NoCacheLevels);
        }
        if self.caches.len() > MAX_CACHE_LEVELS {
            return Err(ConfigError::TooManyCacheLevels(self.caches.len()));
        }
        if self.caches.iter().any(|cc| cc.size == 0) {
            return Err(ConfigError::ZeroCapacity { what: "cache level" });
        }
        if self.ram_size == 0 {
            return Err(ConfigError::ZeroCapacity { what: "RAM" });
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.address_size == 0 {
            return Err(ConfigError::ZeroAddressSize);
        }
        if self.block_size > self.address_size {
            return Err(ConfigError::BlockLargerThanAddressSpace {
                block_size: self.block_size,
                address_size: self.address_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_config() {
        let config = Config::from_json(
            r#"{
                "caches": [{"size": 32, "hit_time": 2}, {"size": 128, "hit_time": 10}],
                "policy": "Second Chance",
                "block_size": 4,
                "address_size": 1024,
                "ram_size": 512,
                "ram_access_time": 100,
                "disk_access_time": 5000,
                "seed": 3
            }"#,
        )
        .unwrap();
        assert_eq!(config.caches.len(), 2);
        assert_eq!(config.caches[1].hit_time, 10);
        assert_eq!(config.policy, Policy::SecondChance);
        assert_eq!(config.ram_size, 512);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn unknown_policy_fails_to_parse() {
        assert!(Config::from_json(r#"{"policy": "MRU"}"#).is_err());
    }

    #[test]
    fn validation_errors() {
        let mut config = Config::default();
        config.caches.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoCacheLevels));

        config.caches = vec![CacheConfig { size: 4, hit_time: 1 }; 4];
        assert_eq!(config.validate(), Err(ConfigError::TooManyCacheLevels(4)));

        config.caches = vec![CacheConfig { size: 0, hit_time: 1 }];
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity { .. })));

        let config = Config {
            block_size: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlockSize));

        let config = Config {
            ram_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity { what: "RAM" })));
    }

    #[test]
    fn block_must_fit_address_space() {
        let config = Config {
            block_size: 1 << 40,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlockLargerThanAddressSpace {
                block_size: 1 << 40,
                address_size: 8192,
            })
        );

        let config = Config {
            block_size: 8192,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn policy_serializes_by_name() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains(r#""policy":"LRU""#));
    }
}
