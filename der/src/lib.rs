//! Tag-length-value parsing for DER encoded data (ITU-T X.690).
//!
//! Only the subset needed for key containers is handled: low tag numbers,
//! definite lengths of at most four octets and a bounded nesting depth.
//! Malformed input of any shape yields an [`Error`], never a panic.

use nom::{Parser, number::complete::be_u8};
use shirushi::decoder::{DecodableFrom, Decoder};

pub mod error;

pub use error::{Error, Result};

pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_CLASS_MASK: u8 = 0xc0;
const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
const TAG_NUMBER_MASK: u8 = 0x1f;

const MAX_LENGTH_OCTETS: u8 = 4;
/// Deepest nesting of constructed values accepted by the parser.
pub const MAX_DEPTH: usize = 32;

type NomError<'a> = nom::error::Error<&'a [u8]>;

/// Sequence of top level TLVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        self.as_slice().decode()
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let mut elements = Vec::new();
        let mut input: &[u8] = self;
        while !input.is_empty() {
            let (rest, tlv) = Tlv::parse(input, 0)?;
            elements.push(tlv);
            input = rest;
        }
        Ok(Der { elements })
    }
}

/// Universal class tags this crate knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimitiveTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    Unimplemented(u8),
}

impl From<u8> for PrimitiveTag {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            _ => Self::Unimplemented(value),
        }
    }
}

impl From<&PrimitiveTag> for u8 {
    fn from(tag: &PrimitiveTag) -> Self {
        match tag {
            PrimitiveTag::Boolean => 0x01,
            PrimitiveTag::Integer => 0x02,
            PrimitiveTag::BitString => 0x03,
            PrimitiveTag::OctetString => 0x04,
            PrimitiveTag::Null => 0x05,
            PrimitiveTag::ObjectIdentifier => 0x06,
            PrimitiveTag::UTF8String => 0x0c,
            PrimitiveTag::Sequence => 0x30,
            PrimitiveTag::Set => 0x31,
            PrimitiveTag::PrintableString => 0x13,
            PrimitiveTag::IA5String => 0x16,
            PrimitiveTag::UTCTime => 0x17,
            PrimitiveTag::GeneralizedTime => 0x18,
            PrimitiveTag::Unimplemented(v) => *v,
        }
    }
}

/// Identifier octet of a TLV.
///
/// Everything outside the context-specific class lands in `Primitive`, with
/// the raw identifier octet kept alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Primitive(PrimitiveTag, u8),
    ContextSpecific { slot: u8, constructed: bool },
}

impl Tag {
    fn is_container(&self) -> bool {
        match self {
            Tag::Primitive(PrimitiveTag::Sequence | PrimitiveTag::Set, _) => true,
            Tag::Primitive(_, _) => false,
            Tag::ContextSpecific { constructed, .. } => *constructed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            value: Value::Data(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        Tlv {
            tag,
            value: Value::Tlv(tlvs),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Content octets of a primitive value.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Children of a constructed value.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    fn parse(input: &[u8], depth: usize) -> Result<(&[u8], Tlv)> {
        if depth >= MAX_DEPTH {
            return Err(Error::TooDeep(MAX_DEPTH));
        }
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        if input.len() < length {
            return Err(Error::Truncated {
                expected: length,
                actual: input.len(),
            });
        }
        let (input, data) = nom::bytes::complete::take::<_, _, NomError>(length).parse(input)?;

        if tag.is_container() {
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, v) = Self::parse(data, depth + 1)?;
                data = rest;
                tlvs.push(v);
            }
            return Ok((input, Tlv::new_constructed(tag, tlvs)));
        }

        Ok((input, Tlv::new_primitive(tag, data.to_vec())))
    }
}

fn parse_tag(input: &[u8]) -> Result<(&[u8], Tag)> {
    let (input, n) = be_u8::<_, NomError>(input)?;
    if n & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        return Err(Error::HighTagNumber);
    }
    let tag = if n & TAG_CLASS_MASK == TAG_CLASS_CONTEXT_SPECIFIC {
        Tag::ContextSpecific {
            slot: n & TAG_NUMBER_MASK,
            constructed: n & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
        }
    } else {
        Tag::Primitive(PrimitiveTag::from(n), n)
    };
    Ok((input, tag))
}

fn parse_length(input: &[u8]) -> Result<(&[u8], usize)> {
    let (input, n) = be_u8::<_, NomError>(input)?;
    if n & 0x80 == 0 {
        // short form: 0-127
        return Ok((input, usize::from(n)));
    }
    // long form
    // First 1 bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let octets = n & 0x7f;
    if octets == 0 {
        return Err(Error::IndefiniteLength);
    }
    if octets > MAX_LENGTH_OCTETS {
        return Err(Error::LengthTooLong(octets));
    }
    if input.len() < usize::from(octets) {
        return Err(Error::Truncated {
            expected: usize::from(octets),
            actual: input.len(),
        });
    }
    let (input, bs) = nom::bytes::complete::take::<_, _, NomError>(octets).parse(input)?;
    let n = bs.iter().fold(0u64, |n, &b| (n << 8) | u64::from(b));
    let n = usize::try_from(n).map_err(|_| Error::LengthTooLong(octets))?;
    Ok((input, n))
}
