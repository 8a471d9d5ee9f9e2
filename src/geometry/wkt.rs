//! Well-known-text reading and writing for [`LineString`].
//!
//! Only the `LINESTRING` tag is understood, with optional `Z`.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::math::Point3;

use super::line_string::LineString;

impl fmt::Display for LineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_z() {
            write!(f, "LINESTRING Z(")?;
        } else {
            write!(f, "LINESTRING(")?;
        }
        for (i, p) in self.points().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if self.has_z() {
                write!(f, "{} {} {}", p.x, p.y, p.z)?;
            } else {
                write!(f, "{} {}", p.x, p.y)?;
            }
        }
        write!(f, ")")
    }
}

impl FromStr for LineString {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let upper = text.to_ascii_uppercase();
        let Some(rest) = upper.strip_prefix("LINESTRING") else {
            return Err(ParseError::Wkt(format!("expected LINESTRING, got `{text}`")));
        };
        let rest = rest.trim_start();
        let (has_z, rest) = match rest.strip_prefix('Z') {
            Some(r) => (true, r.trim_start()),
            None => (false, rest),
        };
        let body = rest
            .strip_prefix('(')
            .and_then(|r| r.trim_end().strip_suffix(')'))
            .ok_or_else(|| ParseError::Wkt(format!("unbalanced parentheses in `{text}`")))?;

        let points = body
            .split(',')
            .map(|coord| parse_coordinate(coord, has_z))
            .collect::<Result<Vec<_>, _>>()?;

        LineString::with_dimension(points, has_z).map_err(|e| ParseError::Wkt(e.to_string()))
    }
}

fn parse_coordinate(text: &str, has_z: bool) -> Result<Point3, ParseError> {
    let values = text
        .split_whitespace()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| ParseError::Wkt(format!("invalid number `{v}`")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match (values.as_slice(), has_z) {
        ([x, y], false) => Ok(Point3::new(*x, *y, 0.0)),
        ([x, y, z], true) => Ok(Point3::new(*x, *y, *z)),
        _ => Err(ParseError::Wkt(format!(
            "expected {} ordinates, got `{}`",
            if has_z { 3 } else { 2 },
            text.trim()
        ))),
    }
}
