//! Arweave deep hash.
//!
//! Hashes a tree of byte blobs with SHA-384, prefixing every node with its
//! kind and length so that differently shaped trees never collide.

use sha2::{Digest, Sha384};

/// Output of the deep hash: one SHA-384 digest.
pub type DeepHash = [u8; 48];

/// A node in the structure being hashed.
#[derive(Debug, Clone, Copy)]
pub enum Chunk<'a> {
    Blob(&'a [u8]),
    List(&'a [Chunk<'a>]),
}

/// Compute the deep hash of a chunk tree.
pub fn deep_hash(chunk: &Chunk<'_>) -> DeepHash {
    match chunk {
        Chunk::Blob(data) => {
            let tag = sha384(format!("blob{}", data.len()).as_bytes());
            let data = sha384(data);
            sha384_pair(&tag, &data)
        }
        Chunk::List(chunks) => {
            let mut acc = sha384(format!("list{}", chunks.len()).as_bytes());
            for chunk in chunks.iter() {
                acc = sha384_pair(&acc, &deep_hash(chunk));
            }
            acc
        }
    }
}

fn sha384(data: &[u8]) -> DeepHash {
    to_array(&Sha384::digest(data))
}

fn sha384_pair(left: &[u8], right: &[u8]) -> DeepHash {
    let mut hasher = Sha384::new();
    hasher.update(left);
    hasher.update(right);
    to_array(&hasher.finalize())
}

fn to_array(digest: &[u8]) -> DeepHash {
    let mut out = [0u8; 48];
    out.copy_from_slice(digest);
    out
}
