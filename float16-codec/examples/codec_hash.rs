use float16_codec::{decode, encode};

fn main() {
    // decode table: every pattern's f64 bits
    let mut decoded = Vec::with_capacity(65536 * 8);
    for bits in 0..=u16::MAX {
        decoded.extend_from_slice(&decode(bits).to_bits().to_le_bytes());
    }

    // encode table: a fixed sweep through the f64 range, including boundaries
    let mut encoded = Vec::new();
    let mut x = 1e-9f64;
    while x < 1e6 {
        for v in [x, -x] {
            encoded.extend_from_slice(&encode(v).to_le_bytes());
        }
        x *= 1.0009765625;
    }

    println!("F16_DECODE_HASH {}", sha256(&decoded));
    println!("F16_ENCODE_HASH {}", sha256(&encoded));
}

fn sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let out = hasher.finalize();
    hex::encode(out)
}
