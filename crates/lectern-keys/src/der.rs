//! Minimal DER serializer for the ASN.1 shapes in an RSA
//! `SubjectPublicKeyInfo` (RFC 5280).
//!
//! Only the node kinds that structure needs are modeled. Values are built
//! as a tree and serialized in one recursive pass, so inner lengths are
//! known before outer headers are written.

/// Content bytes of the `rsaEncryption` OBJECT IDENTIFIER,
/// `1.2.840.113549.1.1.1`.
pub const RSA_ENCRYPTION_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];

/// A DER value. `encode` produces the full tag-length-content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerNode {
    /// Constructed SEQUENCE (tag `0x30`).
    Sequence(Vec<DerNode>),
    /// INTEGER (tag `0x02`) holding a big-endian unsigned magnitude.
    ///
    /// Leading zero bytes are stripped; an empty or all-zero magnitude
    /// encodes as INTEGER 0. A `0x00` byte is prepended when the leading
    /// content byte has its high bit set, so the value stays non-negative.
    Integer(Vec<u8>),
    /// OBJECT IDENTIFIER (tag `0x06`) with pre-encoded content bytes.
    ObjectIdentifier(&'static [u8]),
    /// NULL (tag `0x05`).
    Null,
    /// BIT STRING (tag `0x03`) wrapping the encoding of the inner node,
    /// with the mandatory zero unused-bits octet.
    BitString(Box<DerNode>),
}

impl DerNode {
    /// Serialize this node to DER bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            DerNode::Sequence(children) => {
                let mut content = Vec::new();
                for child in children {
                    child.encode_into(&mut content);
                }
                out.push(0x30);
                push_length(out, content.len());
                out.extend_from_slice(&content);
            }
            DerNode::Integer(magnitude) => {
                let content = integer_content(magnitude);
                out.push(0x02);
                push_length(out, content.len());
                out.extend_from_slice(&content);
            }
            DerNode::ObjectIdentifier(body) => {
                out.push(0x06);
                push_length(out, body.len());
                out.extend_from_slice(body);
            }
            DerNode::Null => {
                out.push(0x05);
                out.push(0x00);
            }
            DerNode::BitString(inner) => {
                let encoded = inner.encode();
                out.push(0x03);
                push_length(out, encoded.len() + 1);
                out.push(0x00);
                out.extend_from_slice(&encoded);
            }
        }
    }
}

/// Normalize a big-endian unsigned magnitude into INTEGER content bytes.
fn integer_content(magnitude: &[u8]) -> Vec<u8> {
    let start = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    let trimmed = &magnitude[start..];
    if trimmed.is_empty() {
        return vec![0x00];
    }
    let mut content = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        content.push(0x00);
    }
    content.extend_from_slice(trimmed);
    content
}

/// Append a DER length: one byte below 128, otherwise `0x80 | n` followed
/// by the `n` big-endian bytes of the length.
fn push_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    let significant = &bytes[skip..];
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
}
