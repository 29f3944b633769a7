//! Output syntax selection.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Assembly listing convention.
///
/// The syntax is plain configuration: decoders take it by value for every
/// call, so one decoder can serve both listings concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Syntax {
    /// Destination first, bare registers, `size ptr seg:[...]` memory.
    #[default]
    Intel,
    /// Source first, `%`-prefixed registers, `$` immediates, `disp(base,index,scale)`.
    Att,
}

impl Syntax {
    pub fn is_intel(&self) -> bool {
        matches!(self, Self::Intel)
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intel => f.write_str("intel"),
            Self::Att => f.write_str("att"),
        }
    }
}

impl FromStr for Syntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intel" => Ok(Self::Intel),
            "att" | "at&t" | "gas" => Ok(Self::Att),
            _ => Err(Error::UnknownSyntax(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_round_trip_names() {
        for syntax in [Syntax::Intel, Syntax::Att] {
            assert_eq!(syntax.to_string().parse::<Syntax>().unwrap(), syntax);
        }
        assert_eq!("AT&T".parse::<Syntax>().unwrap(), Syntax::Att);
        assert!("masm".parse::<Syntax>().is_err());
    }
}
