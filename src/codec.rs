//! Big-endian field readers and length-prefix writers shared by the extension codec.
//!
//! Readers wrap the `nom` number parsers and translate their failures into
//! [`FormatError`](crate::FormatError) values that name the structure being
//! decoded. Length prefixes are checked against the remaining input before
//! anything is taken, so an overrun is reported as such and not as a plain
//! truncation.

use nom::bytes::complete::take;
use nom::number::complete::{be_u16, be_u32, be_u8};

use crate::error::{Error, FormatErrorKind};

type NomError<'a> = nom::error::Error<&'a [u8]>;

pub(crate) fn read_u8<'a>(input: &'a [u8], ctx: &'static str) -> Result<(&'a [u8], u8), Error> {
    be_u8::<_, NomError>(input).map_err(|_| Error::truncated(ctx))
}

pub(crate) fn read_u16<'a>(input: &'a [u8], ctx: &'static str) -> Result<(&'a [u8], u16), Error> {
    be_u16::<_, NomError>(input).map_err(|_| Error::truncated(ctx))
}

pub(crate) fn read_u32<'a>(input: &'a [u8], ctx: &'static str) -> Result<(&'a [u8], u32), Error> {
    be_u32::<_, NomError>(input).map_err(|_| Error::truncated(ctx))
}

fn take_checked<'a>(
    input: &'a [u8],
    len: usize,
    ctx: &'static str,
) -> Result<(&'a [u8], &'a [u8]), Error> {
    if len > input.len() {
        trace!("{}: length {} exceeds {} remaining", ctx, len, input.len());
        return Err(Error::format(
            FormatErrorKind::LengthOverrun {
                declared: len,
                remaining: input.len(),
            },
            ctx,
        ));
    }
    take::<_, _, NomError>(len)(input).map_err(|_| Error::truncated(ctx))
}

/// Read an 8-bit length prefix and the bytes it covers.
pub(crate) fn read_u8_prefixed<'a>(
    input: &'a [u8],
    ctx: &'static str,
) -> Result<(&'a [u8], &'a [u8]), Error> {
    let (input, len) = read_u8(input, ctx)?;
    take_checked(input, len as usize, ctx)
}

/// Read a 16-bit length prefix and the bytes it covers.
pub(crate) fn read_u16_prefixed<'a>(
    input: &'a [u8],
    ctx: &'static str,
) -> Result<(&'a [u8], &'a [u8]), Error> {
    let (input, len) = read_u16(input, ctx)?;
    take_checked(input, len as usize, ctx)
}

/// Split a list body into big-endian 16-bit values.
pub(crate) fn u16_values(body: &[u8], ctx: &'static str) -> Result<Vec<u16>, Error> {
    if body.len() % 2 != 0 {
        return Err(Error::format(FormatErrorKind::OddLength(body.len()), ctx));
    }
    Ok(body
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect())
}

/// Fail unless the whole input was consumed.
pub(crate) fn expect_empty(rest: &[u8], ctx: &'static str) -> Result<(), Error> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::format(FormatErrorKind::TrailingData(rest.len()), ctx))
    }
}

/// Write a 16-bit length prefix followed by whatever `f` appends.
///
/// Fails with [`Error::InvalidArgument`] if the appended body does not fit
/// the prefix. `out` is left as it was on failure.
pub(crate) fn write_u16_prefixed(
    out: &mut Vec<u8>,
    ctx: &'static str,
    f: impl FnOnce(&mut Vec<u8>) -> Result<(), Error>,
) -> Result<(), Error> {
    let start = out.len();
    out.extend_from_slice(&[0, 0]);
    let len = match f(out) {
        Ok(()) => out.len() - start - 2,
        Err(e) => {
            out.truncate(start);
            return Err(e);
        }
    };
    let Ok(len) = u16::try_from(len) else {
        out.truncate(start);
        return Err(overflow(ctx, len, u16::MAX as usize));
    };
    out[start..start + 2].copy_from_slice(&len.to_be_bytes());
    Ok(())
}

/// Write an 8-bit length prefix followed by whatever `f` appends.
pub(crate) fn write_u8_prefixed(
    out: &mut Vec<u8>,
    ctx: &'static str,
    f: impl FnOnce(&mut Vec<u8>) -> Result<(), Error>,
) -> Result<(), Error> {
    let start = out.len();
    out.push(0);
    let len = match f(out) {
        Ok(()) => out.len() - start - 1,
        Err(e) => {
            out.truncate(start);
            return Err(e);
        }
    };
    let Ok(len) = u8::try_from(len) else {
        out.truncate(start);
        return Err(overflow(ctx, len, u8::MAX as usize));
    };
    out[start] = len;
    Ok(())
}

fn overflow(ctx: &'static str, len: usize, max: usize) -> Error {
    trace!("{}: {} bytes exceed length prefix maximum {}", ctx, len, max);
    Error::InvalidArgument(format!(
        "{}: {} bytes do not fit a length prefix of at most {}",
        ctx, len, max
    ))
}
