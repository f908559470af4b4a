//! Connection spacing specifications
//!
//! Absolute connections carry a plain signed number. Relative connections
//! carry `P[+|-]C`: place the target at `P` percent of the way along the
//! reference segment, then shift it by `C` percent of its own extent.

use crate::error::{DrawingError, Result};
use nom::character::complete::{one_of, space0};
use nom::combinator::{all_consuming, map, opt};
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

/// Parsed relative spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeSpacing {
    /// Interpolation between the two reference lines, in percent
    pub percent: f64,
    /// Shift in percent of the target's extent along the axis
    pub correction: f64,
}

fn signed_correction(input: &str) -> IResult<&str, f64> {
    map(
        pair(delimited(space0, one_of("+-"), space0), double),
        |(sign, value)| if sign == '-' { -value } else { value },
    )(input)
}

fn relative_spacing(input: &str) -> IResult<&str, RelativeSpacing> {
    let (input, percent) = preceded(space0, double)(input)?;
    let (input, correction) = opt(signed_correction)(input)?;
    let (input, _) = space0(input)?;
    Ok((
        input,
        RelativeSpacing {
            percent,
            correction: correction.unwrap_or(0.0),
        },
    ))
}

/// Parse a relative spacing such as `"50+0"`, `"33.3-10"` or `"100"`
pub fn parse_relative(space: &str) -> Result<RelativeSpacing> {
    let (_, spacing) = all_consuming(relative_spacing)(space)
        .map_err(|e| DrawingError::FormatError(format!("invalid relative spacing `{space}`: {e}")))?;
    if !spacing.percent.is_finite() || !spacing.correction.is_finite() {
        return Err(DrawingError::FormatError(format!(
            "relative spacing `{space}` is not finite"
        )));
    }
    Ok(spacing)
}

/// Numeric value of an absolute spacing, `None` when it is not a finite number
pub fn parse_absolute(space: &str) -> Option<f64> {
    space.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        assert_eq!(
            parse_relative("50+0").unwrap(),
            RelativeSpacing { percent: 50.0, correction: 0.0 }
        );
        assert_eq!(
            parse_relative(" 33.5 - 10 ").unwrap(),
            RelativeSpacing { percent: 33.5, correction: -10.0 }
        );
        assert_eq!(parse_relative("100").unwrap().correction, 0.0);
        assert_eq!(parse_relative("-25+5").unwrap().percent, -25.0);
    }

    #[test]
    fn test_parse_relative_rejects_garbage() {
        for bad in ["", "abc", "50*2", "50+", "50 10", "50+10%"] {
            assert!(
                matches!(parse_relative(bad), Err(DrawingError::FormatError(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_absolute() {
        assert_eq!(parse_absolute(" -12.5 "), Some(-12.5));
        assert_eq!(parse_absolute("20"), Some(20.0));
        assert_eq!(parse_absolute("wide"), None);
        assert_eq!(parse_absolute("NaN"), None);
    }
}
