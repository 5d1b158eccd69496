use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use xz2::read::XzDecoder;

use crate::error::InputError;

/// Reads an address trace, decompressing it first when the file ends in `.xz`.
pub fn read_trace(path: &Path) -> io::Result<String> {
    let stream = fs::File::open(path)?;
    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "xz") {
        XzDecoder::new(stream).read_to_string(&mut text)?;
    } else {
        io::BufReader::new(stream).read_to_string(&mut text)?;
    }
    Ok(text)
}

/// Parses a comma or whitespace separated list of decimal addresses. Any bad
/// token, or any address outside `[0, address_size)`, rejects the whole batch.
pub fn parse_addresses(text: &str, address_size: usize) -> Result<Vec<usize>, InputError> {
    let addrs = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            let addr: usize = tok
                .parse()
                .map_err(|_| InputError::Malformed(tok.to_owned()))?;
            if addr >= address_size {
                return Err(InputError::OutOfRange { addr, address_size });
            }
            Ok(addr)
        })
        .collect::<Result<Vec<_>, _>>()?;
    if addrs.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(addrs)
}
