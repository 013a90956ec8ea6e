mod hash;
mod key;

pub use hash::{keccak256, Hash, HashError, HASH_SIZE};
pub use key::{Address, KeyError, PublicKey, ADDRESS_SIZE, PUBLIC_KEY_SIZE};
