//======================================================================
// src/spn.rs
// The 12-round substitution-permutation network over 16-byte states.
// State layout is column-major: byte k sits at row k % 4, column k / 4.
//======================================================================

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{NUM_ROUNDS, ROUND_KEY_COUNT, STATE_BYTES, STATE_COLS, STATE_ROWS};
use crate::gf256::{MUL2, MUL3};
use crate::permutation::BitPermutation;

/// Immutable cipher material derived once at construction. The S-box
/// and round keys are wiped on drop; the permutation tables hold bit
/// indices, not key bytes, and are left alone.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CipherMaterial {
    pub(crate) sbox: [u8; 256],
    #[zeroize(skip)]
    pub(crate) pi: BitPermutation,
    pub(crate) round_keys: [[u8; STATE_BYTES]; ROUND_KEY_COUNT],
}

#[inline]
fn sub_bytes(state: &mut [u8; STATE_BYTES], sbox: &[u8; 256]) {
    for byte in state.iter_mut() {
        *byte = sbox[*byte as usize];
    }
}

/// Row r is rotated left by r positions: byte (r, c) takes the value
/// of byte (r, (c + r) % 4).
#[inline]
fn shift_rows(state: &mut [u8; STATE_BYTES]) {
    let old = *state;
    for r in 0..STATE_ROWS {
        for c in 0..STATE_COLS {
            state[r + 4 * c] = old[r + 4 * ((c + r) % STATE_COLS)];
        }
    }
}

/// The AES (2 3 1 1) circulant applied to each column over GF(2^8).
#[inline]
fn mix_columns(state: &mut [u8; STATE_BYTES]) {
    for c in 0..STATE_COLS {
        let col = [state[4 * c], state[4 * c + 1], state[4 * c + 2], state[4 * c + 3]];
        state[4 * c] = MUL2[col[0] as usize] ^ MUL3[col[1] as usize] ^ col[2] ^ col[3];
        state[4 * c + 1] = col[0] ^ MUL2[col[1] as usize] ^ MUL3[col[2] as usize] ^ col[3];
        state[4 * c + 2] = col[0] ^ col[1] ^ MUL2[col[2] as usize] ^ MUL3[col[3] as usize];
        state[4 * c + 3] = MUL3[col[0] as usize] ^ col[1] ^ col[2] ^ MUL2[col[3] as usize];
    }
}

#[inline]
fn add_round_key(state: &mut [u8; STATE_BYTES], key: &[u8; STATE_BYTES]) {
    for (byte, k) in state.iter_mut().zip(key.iter()) {
        *byte ^= k;
    }
}

/// The full block transform E, in place.
///
/// Whitening, 11 full rounds (SubBytes, ShiftRows, BitPermutation,
/// MixColumns, AddRoundKey), then a final round without MixColumns.
pub fn encrypt_block(state: &mut [u8; STATE_BYTES], material: &CipherMaterial) {
    add_round_key(state, &material.round_keys[0]);

    for r in 1..NUM_ROUNDS {
        sub_bytes(state, &material.sbox);
        shift_rows(state);
        *state = material.pi.apply(state);
        mix_columns(state);
        add_round_key(state, &material.round_keys[r]);
    }

    sub_bytes(state, &material.sbox);
    shift_rows(state);
    *state = material.pi.apply(state);
    add_round_key(state, &material.round_keys[NUM_ROUNDS]);
}
