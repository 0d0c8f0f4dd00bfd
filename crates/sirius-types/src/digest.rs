use ripemd::{Digest, Ripemd160};
use tiny_keccak::{Hasher, Sha3};

pub(crate) fn sha3_256(parts: &[&[u8]]) -> [u8; 32] {
    let mut sha3 = Sha3::v256();
    let mut output = [0u8; 32];
    for part in parts {
        sha3.update(part);
    }
    sha3.finalize(&mut output);
    output
}

pub(crate) fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let mut output = [0u8; 20];
    output.copy_from_slice(&hasher.finalize());
    output
}
