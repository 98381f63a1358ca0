//! Pretend RNGs for test purposes.

use crate::{CryptoRng, RngCore, RngError};
use sha2::{Sha512, Digest};

// Deterministic generator from a given seed: the output is the first
// half of a chain of SHA-512 outputs.
pub(crate) struct DRNG {
    buf: [u8; 64],
    ptr: usize,
}

impl DRNG {

    pub(crate) fn from_seed(seed: &[u8]) -> Self {
        let mut d = Self {
            buf: [0u8; 64],
            ptr: 0,
        };
        let mut sh = Sha512::new();
        sh.update(seed);
        d.buf[..].copy_from_slice(&sh.finalize());
        d
    }
}

impl RngCore for DRNG {

    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let len = dest.len();
        let mut off = 0;
        while off < len {
            let mut clen = 32 - self.ptr;
            if clen > (len - off) {
                clen = len - off;
            }
            dest[off .. off + clen].copy_from_slice(
                &self.buf[self.ptr .. self.ptr + clen]);
            self.ptr += clen;
            off += clen;
            if self.ptr == 32 {
                let mut sh = Sha512::new();
                sh.update(&self.buf);
                self.buf[..].copy_from_slice(&sh.finalize());
                self.ptr = 0;
            }
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8])
        -> Result<(), RngError>
    {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for DRNG { }

// Replays a fixed list of 32-byte blocks, one per fill_bytes() call
// (calls MUST request exactly 32 bytes); counts the calls.
pub(crate) struct SeqRng {
    blocks: [[u8; 32]; 8],
    len: usize,
    ptr: usize,
}

impl SeqRng {

    pub(crate) fn new(blocks: &[[u8; 32]]) -> Self {
        assert!(blocks.len() <= 8);
        let mut r = Self {
            blocks: [[0u8; 32]; 8],
            len: blocks.len(),
            ptr: 0,
        };
        r.blocks[..blocks.len()].copy_from_slice(blocks);
        r
    }

    pub(crate) fn draws(&self) -> usize {
        self.ptr
    }
}

impl RngCore for SeqRng {

    fn next_u32(&mut self) -> u32 {
        unimplemented!();
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!();
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        assert!(dest.len() == 32 && self.ptr < self.len);
        dest.copy_from_slice(&self.blocks[self.ptr]);
        self.ptr += 1;
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8])
        -> Result<(), RngError>
    {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for SeqRng { }
