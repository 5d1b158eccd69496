use crate::{
    error::ConfigError,
    replace::{fifo::Fifo, Replace},
};

/// The RAM stage: bounded, evicts the oldest installed address.
#[derive(Debug)]
pub struct MainMemory {
    pub access_time: u32,
    store: Fifo,
}

impl MainMemory {
    pub fn new(size: usize, access_time: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroCapacity { what: "RAM" });
        }
        Ok(MainMemory {
            access_time,
            store: Fifo::new(size),
        })
    }

    pub fn probe(&mut self, addr: usize) -> bool {
        self.store.probe(addr)
    }

    pub fn install(&mut self, addr: usize) -> Option<usize> {
        self.store.insert(addr)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}

/// Backing store. Unbounded, always serves the request.
#[derive(Debug, Clone, Copy)]
pub struct Disk {
    pub access_time: u32,
}
