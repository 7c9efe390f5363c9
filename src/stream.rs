//======================================================================
// src/stream.rs
// Counter-mode core: evaluates the block transform over an
// incrementing 128-bit counter.
//======================================================================

use cipher::{consts::U16, BlockSizeUser, StreamCipherCore, StreamCipherSeekCore};

use crate::backends::Backend;
use crate::spn::CipherMaterial;

/// The core engine of the counter-mode keystream.
///
/// All cipher material is immutable after construction; the counter is
/// the only mutable state. Block N of the stream is always the
/// encryption of counter value N.
pub struct TopoCtrCore {
    pub(crate) material: CipherMaterial,
    /// The 128-bit block counter, big-endian encoded into the state.
    pub(crate) counter: u128,
}

impl TopoCtrCore {
    pub(crate) fn new(material: CipherMaterial) -> Self {
        Self { material, counter: 0 }
    }
}

impl BlockSizeUser for TopoCtrCore {
    type BlockSize = U16; // 128-bit blocks
}

impl StreamCipherCore for TopoCtrCore {
    fn remaining_blocks(&self) -> Option<usize> {
        // The counter wraps mod 2^128; the stream is unbounded.
        None
    }

    /// Processes data by applying the keystream, delegating block
    /// generation to the software backend.
    fn process_with_backend(&mut self, f: impl cipher::StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(self));
    }
}

impl StreamCipherSeekCore for TopoCtrCore {
    type Counter = u128;

    /// Gets the current block position (counter).
    fn get_block_pos(&self) -> Self::Counter {
        self.counter
    }

    /// Sets the block position (counter).
    fn set_block_pos(&mut self, pos: Self::Counter) {
        self.counter = pos;
    }
}
