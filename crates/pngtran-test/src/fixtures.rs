//! Deterministic row fixtures
//!
//! Rows are generated rather than loaded, so every test states its input in
//! code.

/// Linear congruential generator with the classic ANSI C constants.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Lcg { state: seed }
    }

    /// Next 15-bit value.
    pub fn next_u15(&mut self) -> u16 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ((self.state >> 16) & 0x7fff) as u16
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u15() >> 7) as u8
    }

    pub fn next_u16(&mut self) -> u16 {
        let hi = u16::from(self.next_u8());
        let lo = u16::from(self.next_u8());
        (hi << 8) | lo
    }
}

/// `len` pseudo-random bytes.
pub fn random_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut lcg = Lcg::new(seed);
    (0..len).map(|_| lcg.next_u8()).collect()
}

/// `len` pseudo-random samples in `0..=max`.
pub fn random_samples(len: usize, max: u8, seed: u32) -> Vec<u8> {
    let mut lcg = Lcg::new(seed);
    let modulus = u16::from(max) + 1;
    (0..len).map(|_| (lcg.next_u15() % modulus) as u8).collect()
}

/// 8-bit ramp: `0, 1, 2, ...` wrapping at 256.
pub fn ramp8(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// 16-bit samples spread evenly from 0 to 65535, big-endian.
pub fn ramp16(len: usize) -> Vec<u8> {
    let last = len.saturating_sub(1).max(1) as u64;
    let samples: Vec<u16> = (0..len as u64)
        .map(|i| (i * 65_535 / last) as u16)
        .collect();
    to_be_bytes(&samples)
}

/// Encode samples big-endian, the row order for 16-bit data.
pub fn to_be_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}

/// Decode big-endian 16-bit samples.
pub fn from_be_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcg_is_deterministic() {
        assert_eq!(random_bytes(16, 7), random_bytes(16, 7));
        assert_ne!(random_bytes(16, 7), random_bytes(16, 8));
    }

    #[test]
    fn test_random_samples_in_range() {
        assert!(random_samples(200, 3, 1).iter().all(|&s| s <= 3));
    }

    #[test]
    fn test_ramp16_endpoints() {
        let samples = from_be_bytes(&ramp16(5));
        assert_eq!(samples, vec![0, 16383, 32767, 49151, 65535]);
    }
}
