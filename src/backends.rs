//======================================================================
// src/backends.rs
// The software (scalar) keystream backend.
//======================================================================

use cipher::{
    consts::{U1, U16},
    Block, BlockSizeUser, ParBlocksSizeUser, StreamBackend,
};

use crate::spn;
use crate::stream::TopoCtrCore;

/// Software backend generating one block per call.
pub(crate) struct Backend<'a>(pub(crate) &'a mut TopoCtrCore);

impl<'a> BlockSizeUser for Backend<'a> {
    type BlockSize = U16;
}

impl<'a> ParBlocksSizeUser for Backend<'a> {
    type ParBlocksSize = U1;
}

impl<'a> StreamBackend for Backend<'a> {
    #[inline]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let mut state = self.0.counter.to_be_bytes();
        spn::encrypt_block(&mut state, &self.0.material);
        block.copy_from_slice(&state);
        self.0.counter = self.0.counter.wrapping_add(1);
    }
}
