//! ANS-104 data item construction.
//!
//! # Responsibilities
//! - Encode tags as an Avro array of `{name, value}` byte pairs
//! - Compute the deep-hash signature data
//! - Lay out the signed item in its binary wire form
//!
//! # Layout
//! ```text
//! sig type (u16 LE) | signature | owner
//! | target flag (+32 bytes) | anchor flag (+32 bytes)
//! | tag count (u64 LE) | tag bytes length (u64 LE) | tag bytes | data
//! ```

use sha2::{Digest, Sha256};

use crate::ao::deep_hash::{deep_hash, Chunk, DeepHash};
use crate::ao::types::{decode_id, encode_b64url, AoError, AoResult, MessageId};
use crate::ao::wallet::DataItemSigner;
use crate::message::Tag;

/// Maximum number of tags on one data item.
pub const MAX_TAGS: usize = 128;

/// Maximum tag name length in bytes.
pub const MAX_TAG_NAME_BYTES: usize = 1024;

/// Maximum tag value length in bytes.
pub const MAX_TAG_VALUE_BYTES: usize = 3072;

/// Anchors are exactly this many bytes.
pub const ANCHOR_LENGTH: usize = 32;

/// Unsigned contents of a data item.
#[derive(Debug, Clone, Copy)]
pub struct DataItemFields<'a> {
    /// base64url id of the target process.
    pub target: Option<&'a str>,
    /// 32-byte anchor, taken as raw UTF-8.
    pub anchor: Option<&'a str>,
    pub tags: &'a [Tag],
    pub data: &'a [u8],
}

/// A signed data item ready for upload.
#[derive(Debug, Clone)]
pub struct DataItem {
    id: MessageId,
    bytes: Vec<u8>,
}

impl DataItem {
    /// Build and sign a data item.
    ///
    /// # Errors
    /// Fails if the target is not a 32-byte id, the anchor is not 32 bytes,
    /// the tags exceed ANS-104 limits, or the signer fails.
    pub fn sign(signer: &dyn DataItemSigner, fields: DataItemFields<'_>) -> AoResult<Self> {
        let target = fields
            .target
            .map(|target| decode_id("target", target))
            .transpose()?;
        let anchor = fields.anchor.map(encode_anchor).transpose()?;
        let tags = encode_tags(fields.tags)?;

        let owner = signer.owner();
        let signature_data = signature_data(
            signer.signature_type(),
            owner,
            target.as_ref().map(|t| t.as_slice()),
            anchor.as_ref().map(|a| a.as_slice()),
            &tags,
            fields.data,
        );
        let signature = signer.sign(&signature_data)?;

        let mut bytes = Vec::with_capacity(
            2 + signature.len() + owner.len() + 66 + 16 + tags.len() + fields.data.len(),
        );
        bytes.extend_from_slice(&signer.signature_type().to_le_bytes());
        bytes.extend_from_slice(&signature);
        bytes.extend_from_slice(owner);
        push_optional(&mut bytes, target.as_ref().map(|t| t.as_slice()));
        push_optional(&mut bytes, anchor.as_ref().map(|a| a.as_slice()));
        bytes.extend_from_slice(&(fields.tags.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&(tags.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&tags);
        bytes.extend_from_slice(fields.data);

        let id = MessageId(encode_b64url(&Sha256::digest(&signature)));
        Ok(Self { id, bytes })
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Deep hash over every signed field of a data item.
pub fn signature_data(
    signature_type: u16,
    owner: &[u8],
    target: Option<&[u8]>,
    anchor: Option<&[u8]>,
    tags: &[u8],
    data: &[u8],
) -> DeepHash {
    let signature_type = signature_type.to_string();
    let chunks = [
        Chunk::Blob(b"dataitem"),
        Chunk::Blob(b"1"),
        Chunk::Blob(signature_type.as_bytes()),
        Chunk::Blob(owner),
        Chunk::Blob(target.unwrap_or_default()),
        Chunk::Blob(anchor.unwrap_or_default()),
        Chunk::Blob(tags),
        Chunk::Blob(data),
    ];
    deep_hash(&Chunk::List(&chunks))
}

/// Avro-encode a tag list. An empty list encodes to no bytes at all.
pub fn encode_tags(tags: &[Tag]) -> AoResult<Vec<u8>> {
    if tags.len() > MAX_TAGS {
        return Err(AoError::InvalidTags(format!(
            "{} tags exceeds the limit of {}",
            tags.len(),
            MAX_TAGS
        )));
    }

    let mut buf = Vec::new();
    if tags.is_empty() {
        return Ok(buf);
    }

    write_long(&mut buf, tags.len() as i64);
    for tag in tags {
        if tag.name.len() > MAX_TAG_NAME_BYTES {
            return Err(AoError::InvalidTags(format!(
                "tag name '{}...' exceeds {} bytes",
                tag.name.chars().take(16).collect::<String>(),
                MAX_TAG_NAME_BYTES
            )));
        }
        if tag.value.len() > MAX_TAG_VALUE_BYTES {
            return Err(AoError::InvalidTags(format!(
                "value of tag '{}' exceeds {} bytes",
                tag.name, MAX_TAG_VALUE_BYTES
            )));
        }
        write_bytes(&mut buf, tag.name.as_bytes());
        write_bytes(&mut buf, tag.value.as_bytes());
    }
    // end of array
    buf.push(0);
    Ok(buf)
}

fn encode_anchor(anchor: &str) -> AoResult<[u8; ANCHOR_LENGTH]> {
    anchor
        .as_bytes()
        .try_into()
        .map_err(|_| AoError::InvalidId {
            field: "anchor",
            reason: format!("expected {} bytes, got {}", ANCHOR_LENGTH, anchor.len()),
        })
}

fn push_optional(buf: &mut Vec<u8>, value: Option<&[u8]>) {
    match value {
        Some(value) => {
            buf.push(1);
            buf.extend_from_slice(value);
        }
        None => buf.push(0),
    }
}

/// Zig-zag varint, as Avro encodes `long`.
fn write_long(buf: &mut Vec<u8>, n: i64) {
    let mut z = ((n << 1) ^ (n >> 63)) as u64;
    while z >= 0x80 {
        buf.push((z as u8 & 0x7f) | 0x80);
        z >>= 7;
    }
    buf.push(z as u8);
}

fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_long(buf, bytes.len() as i64);
    buf.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ao::types::{ARWEAVE_KEY_LENGTH, ARWEAVE_SIGNATURE_TYPE};
    use crate::ao::wallet::tests::fixture_signer;

    const PROCESS: &str = "drHuWPvnhCknt7ubyhv40Ad0fnb0adXodS5bXJfyays";

    #[test]
    fn test_encode_single_tag() {
        let tags = vec![Tag::new("Action", "Info")];
        let encoded = encode_tags(&tags).unwrap();

        let mut expected = vec![0x02, 0x0c];
        expected.extend_from_slice(b"Action");
        expected.push(0x08);
        expected.extend_from_slice(b"Info");
        expected.push(0x00);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_empty_tags() {
        assert!(encode_tags(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_long_length_uses_multiple_bytes() {
        let mut buf = Vec::new();
        write_long(&mut buf, 64);
        assert_eq!(buf, vec![0x80, 0x01]);

        buf.clear();
        write_long(&mut buf, 300);
        assert_eq!(buf, vec![0xd8, 0x04]);
    }

    #[test]
    fn test_too_many_tags() {
        let tags: Vec<Tag> = (0..=MAX_TAGS).map(|i| Tag::new("N", i.to_string())).collect();
        assert!(matches!(encode_tags(&tags), Err(AoError::InvalidTags(_))));
    }

    #[test]
    fn test_oversized_value() {
        let tags = vec![Tag::new("Big", "x".repeat(MAX_TAG_VALUE_BYTES + 1))];
        let err = encode_tags(&tags).unwrap_err();
        assert!(err.to_string().contains("value of tag 'Big'"));
    }

    #[test]
    fn test_bad_anchor_length() {
        let signer = fixture_signer();
        let err = DataItem::sign(
            &signer,
            DataItemFields {
                target: Some(PROCESS),
                anchor: Some("short"),
                tags: &[],
                data: b"",
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("anchor"));
    }

    #[test]
    fn test_signed_layout_and_signature() {
        let signer = fixture_signer();
        let tags = vec![Tag::new("Action", "Debug-Send-TokenOut-To-Pool")];
        let anchor = "0123456789abcdef0123456789abcdef";
        let item = DataItem::sign(
            &signer,
            DataItemFields {
                target: Some(PROCESS),
                anchor: Some(anchor),
                tags: &tags,
                data: b"1234",
            },
        )
        .unwrap();

        let bytes = item.as_bytes();
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), ARWEAVE_SIGNATURE_TYPE);

        let signature = &bytes[2..2 + ARWEAVE_KEY_LENGTH];
        let mut offset = 2 + ARWEAVE_KEY_LENGTH;
        assert_eq!(&bytes[offset..offset + ARWEAVE_KEY_LENGTH], signer.owner());
        offset += ARWEAVE_KEY_LENGTH;

        let target = decode_id("target", PROCESS).unwrap();
        assert_eq!(bytes[offset], 1);
        assert_eq!(&bytes[offset + 1..offset + 33], &target);
        offset += 33;

        assert_eq!(bytes[offset], 1);
        assert_eq!(&bytes[offset + 1..offset + 33], anchor.as_bytes());
        offset += 33;

        let encoded_tags = encode_tags(&tags).unwrap();
        let count = u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap());
        let tag_len = u64::from_le_bytes(bytes[offset + 8..offset + 16].try_into().unwrap());
        assert_eq!(count, 1);
        assert_eq!(tag_len as usize, encoded_tags.len());
        offset += 16;
        assert_eq!(&bytes[offset..offset + encoded_tags.len()], encoded_tags.as_slice());
        offset += encoded_tags.len();
        assert_eq!(&bytes[offset..], b"1234");

        let expected = signature_data(
            ARWEAVE_SIGNATURE_TYPE,
            signer.owner(),
            Some(target.as_slice()),
            Some(anchor.as_bytes()),
            &encoded_tags,
            b"1234",
        );
        assert!(signer.verify(&expected, signature));
        assert_eq!(item.id().0, encode_b64url(&Sha256::digest(signature)));
    }

    #[test]
    fn test_absent_target_and_anchor() {
        let signer = fixture_signer();
        let item = DataItem::sign(
            &signer,
            DataItemFields {
                target: None,
                anchor: None,
                tags: &[],
                data: b"",
            },
        )
        .unwrap();

        let bytes = item.into_bytes();
        // sig type, signature, owner, two presence bytes, two u64 counters
        assert_eq!(bytes.len(), 2 + 2 * ARWEAVE_KEY_LENGTH + 2 + 16);
        assert_eq!(bytes[2 + 2 * ARWEAVE_KEY_LENGTH], 0);
        assert_eq!(bytes[3 + 2 * ARWEAVE_KEY_LENGTH], 0);
    }
}
