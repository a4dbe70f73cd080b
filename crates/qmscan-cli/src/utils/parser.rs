use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid atom '{0}'. Atoms are 1-based serial numbers.")]
    InvalidAtom(String),

    #[error("Invalid atom range '{0}'. Expected 'first-last' with first <= last (e.g., '10-12').")]
    InvalidAtomRange(String),

    #[error("Atom list '{0}' selects no atoms.")]
    EmptyAtomList(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Expands an atom list such as `123,128` or `10-12,15` into serial numbers, in the
/// order written.
pub fn parse_atom_list(input: &str) -> Result<Vec<usize>, ParseError> {
    let mut atoms = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((first, last)) => {
                let first = parse_serial(first.trim())
                    .map_err(|_| ParseError::InvalidAtomRange(part.to_string()))?;
                let last = parse_serial(last.trim())
                    .map_err(|_| ParseError::InvalidAtomRange(part.to_string()))?;
                if first > last {
                    return Err(ParseError::InvalidAtomRange(part.to_string()));
                }
                atoms.extend(first..=last);
            }
            None => atoms.push(parse_serial(part)?),
        }
    }
    if atoms.is_empty() {
        return Err(ParseError::EmptyAtomList(input.to_string()));
    }
    Ok(atoms)
}

fn parse_serial(token: &str) -> Result<usize, ParseError> {
    match token.parse::<usize>() {
        Ok(serial) if serial > 0 => Ok(serial),
        _ => Err(ParseError::InvalidAtom(token.to_string())),
    }
}

/// Splits `section.key=value` at the first `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(input.to_string())),
    }
}
