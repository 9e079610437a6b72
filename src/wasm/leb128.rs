//! Variable-length integer codec
//!
//! Every length, index and integer constant in a WASM binary is written as
//! LEB128. Lists are written as vectors: an unsigned LEB128 element count
//! followed by the elements.
//!
//! The helpers here always write into a `Vec<u8>`, so they cannot fail and
//! return plain bytes instead of `io::Result`. Section framing and names are
//! left to `wasm_encoder`; these cover the byte strings the encoder keeps
//! itself (instruction immediates, local groups and signature keys).

/// Longest unsigned LEB128 encoding of a u64
pub const MAX_U64_LEB_BYTES: usize = 10;

/// Encode an unsigned integer (indices, counts, sizes).
pub fn unsigned(value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_U64_LEB_BYTES);
    write_unsigned(&mut bytes, value);
    bytes
}

/// Append an unsigned integer to an existing buffer.
pub fn write_unsigned(bytes: &mut Vec<u8>, value: u64) {
    ::leb128::write::unsigned(bytes, value).expect("writing to a Vec cannot fail");
}

/// Append a signed integer to an existing buffer.
pub fn write_signed(bytes: &mut Vec<u8>, value: i64) {
    ::leb128::write::signed(bytes, value).expect("writing to a Vec cannot fail");
}

/// Length-prefix a flat byte sequence.
///
/// The prefix is the number of bytes, which is also the element count when
/// every element is a single byte (value types, for instance).
pub fn vector(elements: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(elements.len() + 1);
    write_unsigned(&mut bytes, elements.len() as u64);
    bytes.extend_from_slice(elements);
    bytes
}

/// Count-prefix a sequence of already encoded elements and concatenate them.
pub fn nested_vector<T: AsRef<[u8]>>(elements: &[T]) -> Vec<u8> {
    let payload_len: usize = elements.iter().map(|e| e.as_ref().len()).sum();
    let mut bytes = Vec::with_capacity(payload_len + 1);
    write_unsigned(&mut bytes, elements.len() as u64);
    for element in elements {
        bytes.extend_from_slice(element.as_ref());
    }
    bytes
}

#[cfg(test)]
#[path = "tests/leb128_tests.rs"]
mod tests;
