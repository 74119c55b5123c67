//! # ABI Word Encoding
//!
//! Static-type `abi.encode` helpers. Every value occupies one left-padded
//! (numbers) or right-padded (fixed bytes) 32-byte word.

use crate::entities::{Address, Hash, U256};

/// One ABI word.
pub type Word = [u8; 32];

pub fn encode_u256(value: U256) -> Word {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

pub fn encode_u64(value: u64) -> Word {
    encode_u256(U256::from(value))
}

pub fn encode_u32(value: u32) -> Word {
    encode_u256(U256::from(value))
}

pub fn encode_u8(value: u8) -> Word {
    encode_u256(U256::from(value))
}

pub fn encode_bool(value: bool) -> Word {
    encode_u8(value as u8)
}

pub fn encode_address(address: &Address) -> Word {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

pub fn encode_bytes32(value: &Hash) -> Word {
    *value
}

/// Reads a big-endian uint256 word.
pub fn decode_u256(word: &[u8]) -> U256 {
    U256::from_big_endian(word)
}

/// Concatenates words into one encoding.
pub fn concat(words: &[Word]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 32);
    for word in words {
        out.extend_from_slice(word);
    }
    out
}
