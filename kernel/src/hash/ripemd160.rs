//! RIPEMD-160, used for Bitcoin's HASH160 (`RIPEMD160(SHA256(x))`).
//!
//! Ported from the original dual-line construction: each 512-bit block
//! runs two independent five-round lines (different message-word
//! permutations, shift amounts, constants, and boolean functions), whose
//! results are combined into the running digest.

pub type Digest = [u8; 20];

const INITIAL: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

const RHO: [u8; 16] = [0x7, 0x4, 0xd, 0x1, 0xa, 0x6, 0xf, 0x3, 0xc, 0x0, 0x9, 0x5, 0x2, 0xe, 0xb, 0x8];

const SHIFTS: [u8; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    12, 13, 11, 15, 6, 9, 9, 7, 12, 15, 11, 13, 7, 8, 7, 7,
    13, 15, 14, 11, 7, 7, 6, 8, 13, 14, 13, 12, 5, 5, 6, 9,
    14, 11, 12, 14, 8, 6, 5, 5, 15, 12, 15, 14, 9, 9, 8, 6,
    15, 12, 13, 13, 9, 5, 8, 6, 14, 11, 12, 11, 8, 6, 5, 5,
];

const CONSTANTS_LEFT: [u32; 5] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xa953fd4e];
const CONSTANTS_RIGHT: [u32; 5] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x7a6d76e9, 0x00000000];

/// Which boolean mixing function a round uses, numbered as in the
/// original source (1..=5 rather than 0-indexed).
#[derive(Clone, Copy)]
enum RmdRound {
    Xor,
    Ch,
    OrNotXor,
    AndOrAndNot,
    XorOrNot,
}

const FNS_LEFT: [RmdRound; 5] =
    [RmdRound::Xor, RmdRound::Ch, RmdRound::OrNotXor, RmdRound::AndOrAndNot, RmdRound::XorOrNot];
const FNS_RIGHT: [RmdRound; 5] =
    [RmdRound::XorOrNot, RmdRound::AndOrAndNot, RmdRound::OrNotXor, RmdRound::Ch, RmdRound::Xor];

#[inline(always)]
fn rol(x: u32, n: u8) -> u32 {
    x.rotate_left(n as u32)
}

#[inline(always)]
fn apply(fn_: RmdRound, x: u32, y: u32, z: u32) -> u32 {
    match fn_ {
        RmdRound::Xor => x ^ y ^ z,
        RmdRound::Ch => (x & y) | (!x & z),
        RmdRound::OrNotXor => (x | !y) ^ z,
        RmdRound::AndOrAndNot => (x & z) | (y & !z),
        RmdRound::XorOrNot => x ^ (y | !z),
    }
}

fn compute_line(
    digest: &[u32; 5],
    chunk: &[u32; 16],
    mut index: [u8; 16],
    constants: &[u32; 5],
    fns: &[RmdRound; 5],
) -> [u32; 5] {
    let mut words = *digest;
    for round in 0..5 {
        let k = constants[round];
        let fn_ = fns[round];
        for i in 0..16 {
            let idx = index[i] as usize;
            let mut tmp = apply(fn_, words[1], words[2], words[3]);
            tmp = tmp.wrapping_add(words[0]).wrapping_add(chunk[idx]).wrapping_add(k);
            tmp = rol(tmp, SHIFTS[idx]).wrapping_add(words[4]);
            words[0] = words[4];
            words[4] = words[3];
            words[3] = rol(words[2], 10);
            words[2] = words[1];
            words[1] = tmp;
        }
        if round == 4 {
            break;
        }
        let permuted: [u8; 16] = std::array::from_fn(|i| RHO[index[i] as usize]);
        index = permuted;
    }
    words
}

fn update_digest(digest: &mut [u32; 5], chunk: &[u32; 16]) {
    let index_left: [u8; 16] = std::array::from_fn(|i| i as u8);
    let mut index_right = [0u8; 16];
    index_right[0] = 5;
    for i in 1..16 {
        index_right[i] = (index_right[i - 1] + 9) & 0x0f;
    }

    let words_left = compute_line(digest, chunk, index_left, &CONSTANTS_LEFT, &FNS_LEFT);
    let words_right = compute_line(digest, chunk, index_right, &CONSTANTS_RIGHT, &FNS_RIGHT);

    let new = [
        digest[1].wrapping_add(words_left[2]).wrapping_add(words_right[3]),
        digest[2].wrapping_add(words_left[3]).wrapping_add(words_right[4]),
        digest[3].wrapping_add(words_left[4]).wrapping_add(words_right[0]),
        digest[4].wrapping_add(words_left[0]).wrapping_add(words_right[1]),
        digest[0].wrapping_add(words_left[1]).wrapping_add(words_right[2]),
    ];
    *digest = new;
}

fn block_to_words(block: &[u8]) -> [u32; 16] {
    std::array::from_fn(|i| u32::from_le_bytes([block[i * 4], block[i * 4 + 1], block[i * 4 + 2], block[i * 4 + 3]]))
}

/// Compute RIPEMD-160 over an arbitrary byte slice.
pub fn ripemd160(data: &[u8]) -> Digest {
    let mut digest = INITIAL;

    let full_blocks = data.len() / 64;
    for block in data[..full_blocks * 64].chunks_exact(64) {
        update_digest(&mut digest, &block_to_words(block));
    }

    let tail = &data[full_blocks * 64..];
    let mut last_chunk = [0u8; 64];
    last_chunk[..tail.len()].copy_from_slice(tail);
    last_chunk[tail.len()] = 0x80;

    if tail.len() >= 56 {
        update_digest(&mut digest, &block_to_words(&last_chunk));
        last_chunk = [0u8; 64];
    }

    let bit_len = (data.len() as u64).wrapping_mul(8);
    last_chunk[56..64].copy_from_slice(&bit_len.to_le_bytes());
    update_digest(&mut digest, &block_to_words(&last_chunk));

    let mut out = [0u8; 20];
    for (i, word) in digest.iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_hex(s: &str) -> Digest {
        assert_eq!(s.len(), 40);
        let mut out = [0u8; 20];
        for i in 0..20 {
            out[i] = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).unwrap();
        }
        out
    }

    #[test]
    fn rfc_vector_empty_string() {
        assert_eq!(ripemd160(b""), from_hex("9c1185a5c5e9fc54612808977ee8f548b2258d31"));
    }

    #[test]
    fn rfc_vector_a() {
        assert_eq!(ripemd160(b"a"), from_hex("0bdc9d2d256b3ee9daae347be6f4dc835a467ffe"));
    }

    #[test]
    fn rfc_vector_abc() {
        assert_eq!(ripemd160(b"abc"), from_hex("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
    }

    #[test]
    fn rfc_vector_message_digest() {
        assert_eq!(
            ripemd160(b"message digest"),
            from_hex("5d0689ef49d2fae572b881b123a85ffa21595f36")
        );
    }

    #[test]
    fn long_message_crosses_multiple_blocks() {
        let msg = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(ripemd160(msg), from_hex("12a053384a9c0c88e405a06c27dcf49ada62eb2b"));
    }
}
