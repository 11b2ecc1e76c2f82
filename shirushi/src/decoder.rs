//! Decoder trait for type-safe conversions.
//!
//! `Decoder<T, D>` is implemented on the source type `T` and produces the
//! destination type `D`. The destination must opt in through the
//! [`DecodableFrom<T>`] marker, so a conversion only exists when a crate
//! declares it explicitly:
//!
//! ```no_run
//! use shirushi::decoder::{DecodableFrom, Decoder};
//!
//! struct Octets(Vec<u8>);
//! struct Length(usize);
//!
//! impl DecodableFrom<Octets> for Length {}
//!
//! impl Decoder<Octets, Length> for Octets {
//!     type Error = std::convert::Infallible;
//!
//!     fn decode(&self) -> Result<Length, Self::Error> {
//!         Ok(Length(self.0.len()))
//!     }
//! }
//! ```
//!
//! A source type usually implements several decoders (a `Pem` decodes into
//! raw bytes, a `Der` tree or a `PrivateKey`), so call sites pick the target
//! with a type annotation:
//!
//! ```ignore
//! let bytes: Vec<u8> = pem.decode()?;
//! let key: PrivateKey = pem.decode()?;
//! ```

/// Converts `self` (of type `T`) into `D`.
///
/// Implementations must be pure: no I/O and no shared state, so the same
/// input always produces the same result and decoders can be called from
/// any number of threads at once.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not a valid encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait declaring that `Self` can be decoded from `T`.
pub trait DecodableFrom<T> {}
