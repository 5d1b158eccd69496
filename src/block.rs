use std::ops::RangeInclusive;

/// An aligned run of `block_size` addresses, fetched into a level together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    /// Maps `addr` to the block containing it. `block_size` must be non-zero,
    /// which the config layer guarantees.
    pub fn of(addr: usize, block_size: usize) -> Self {
        let start = (addr / block_size) * block_size;
        Block {
            start,
            end: start + block_size - 1,
        }
    }

    pub fn addrs(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_to_block_start() {
        assert_eq!(Block::of(0, 4), Block { start: 0, end: 3 });
        assert_eq!(Block::of(3, 4), Block { start: 0, end: 3 });
        assert_eq!(Block::of(4, 4), Block { start: 4, end: 7 });
        assert_eq!(Block::of(13, 8), Block { start: 8, end: 15 });
    }

    #[test]
    fn block_size_one_is_the_address() {
        let block = Block::of(42, 1);
        assert_eq!(block.start, 42);
        assert_eq!(block.end, 42);
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn non_power_of_two_sizes() {
        assert_eq!(Block::of(10, 3), Block { start: 9, end: 11 });
        assert_eq!(Block::of(10, 3).addrs().collect::<Vec<_>>(), vec![9, 10, 11]);
    }
}
