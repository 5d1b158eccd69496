use std::{error::Error, fmt};

pub const MAX_CACHE_LEVELS: usize = 3;

/// Rejected hierarchy configuration. Raised before any address is simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownPolicy(String),
    NoCacheLevels,
    TooManyCacheLevels(usize),
    ZeroCapacity { what: &'static str },
    ZeroBlockSize,
    ZeroAddressSize,
    BlockLargerThanAddressSpace {
        block_size: usize,
        address_size: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownPolicy(name) => {
                write!(f, "Unrecognized replacement policy: {name}")
            }
            ConfigError::NoCacheLevels => write!(f, "at least one cache level is required"),
            ConfigError::TooManyCacheLevels(n) => write!(
                f,
                "{n} cache levels configured, at most {MAX_CACHE_LEVELS} are allowed"
            ),
            ConfigError::ZeroCapacity { what } => write!(f, "{what} must have a non-zero size"),
            ConfigError::ZeroBlockSize => write!(f, "block size must be non-zero"),
            ConfigError::ZeroAddressSize => write!(f, "address size must be non-zero"),
            ConfigError::BlockLargerThanAddressSpace {
                block_size,
                address_size,
            } => write!(
                f,
                "block size {block_size} exceeds the address space of {address_size}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// A rejected address batch. The whole batch is refused, never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Malformed(String),
    OutOfRange { addr: usize, address_size: usize },
    Empty,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Malformed(token) => write!(f, "`{token}` is not a valid address"),
            InputError::OutOfRange { addr, address_size } => write!(
                f,
                "address {addr} is outside the address space [0, {address_size})"
            ),
            InputError::Empty => write!(f, "no addresses given"),
        }
    }
}

impl Error for InputError {}
