//! WKT (Well-Known Text) decoding and encoding.
//!
//! Decoding runs in two passes. A small tokenizer and recursive-descent
//! parser turn the parenthesized content into a generic nested list of
//! coordinate pairs, and that list is then mapped onto the [`Geometry`]
//! variant named by the leading keyword. Nesting is tracked by the parser,
//! so members of multi-geometries are only ever split on commas at their
//! own depth.
//!
//! Supports:
//! - POINT (x y)
//! - LINESTRING (x y, x y, ...)
//! - POLYGON ((x y, ..., x y), (hole coords), ...)
//! - MULTIPOINT ((x y), (x y), ...) or MULTIPOINT (x y, x y, ...)
//! - MULTILINESTRING ((x y, x y, ...), (x y, x y, ...), ...)
//! - MULTIPOLYGON (((x y, ..., x y)), ((x y, ..., x y), (hole)), ...)

use std::fmt::{self, Display, Write};
use std::str::FromStr;

use crate::errors::{GeometryError, GeometryResult};
use crate::geometry::{Coordinate, Geometry, GeometryKind};

/// Parses WKT text into a [`Geometry`].
///
/// The type keyword is matched case-insensitively.
///
/// # Errors
/// Returns [`GeometryError::InvalidWkt`] when the text does not follow the
/// `TYPE (content)` pattern, the keyword is unknown, a numeric token does
/// not parse, or the nesting does not fit the geometry kind.
///
/// # Example
///
/// ```rust
/// use farm_geometry::{wkt_to_geometry, Geometry};
///
/// let point = wkt_to_geometry("point (10 20)").unwrap();
/// assert_eq!(point, Geometry::point(10.0, 20.0));
/// ```
pub fn wkt_to_geometry(text: &str) -> GeometryResult<Geometry> {
    let text = text.trim();

    let open = text.find('(').ok_or_else(|| {
        GeometryError::invalid_wkt(format!("expected 'TYPE (content)', got '{}'", text))
    })?;
    if !text.ends_with(')') {
        return Err(GeometryError::invalid_wkt(format!(
            "missing closing parenthesis in '{}'",
            text
        )));
    }

    let keyword = text[..open].trim();
    if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GeometryError::invalid_wkt(format!(
            "expected a geometry type keyword, got '{}'",
            keyword
        )));
    }
    let kind = GeometryKind::from_wkt_keyword(keyword).ok_or_else(|| {
        GeometryError::invalid_wkt(format!("unsupported geometry type '{}'", keyword))
    })?;

    let tokens = tokenize(&text[open..])?;
    let content = Parser::new(tokens).parse()?;
    let geometry = build_geometry(kind, content)?;

    geometry
        .validate()
        .map_err(|e| GeometryError::invalid_wkt(e.to_string()))?;
    log::debug!("Decoded {} with {} coordinates", kind, geometry.num_coords());
    Ok(geometry)
}

/// Serializes a [`Geometry`] to WKT.
///
/// The keyword is uppercase and followed by a single space. Coordinates are
/// written with the shortest representation that reads back to the same
/// `f64`, so no precision is lost.
pub fn geometry_to_wkt(geometry: &Geometry) -> String {
    let mut out = String::new();
    out.push_str(geometry.kind().wkt_keyword());
    out.push(' ');

    match geometry {
        Geometry::Point(coord) => write_list(&mut out, std::slice::from_ref(coord), write_pair),
        Geometry::LineString(coords) => write_list(&mut out, coords, write_pair),
        Geometry::Polygon(rings) => write_list(&mut out, rings, write_ring),
        Geometry::MultiPoint(points) => write_list(&mut out, points, |out, coord| {
            out.push('(');
            write_pair(out, coord);
            out.push(')');
        }),
        Geometry::MultiLineString(lines) => write_list(&mut out, lines, write_ring),
        Geometry::MultiPolygon(polygons) => write_list(&mut out, polygons, |out, rings| {
            write_list(out, rings, write_ring)
        }),
    }
    out
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&geometry_to_wkt(self))
    }
}

impl FromStr for Geometry {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wkt_to_geometry(s)
    }
}

// ============================================================================
// Encoding helpers
// ============================================================================

fn write_pair(out: &mut String, coord: &Coordinate) {
    // Writing into a String cannot fail
    let _ = write!(out, "{} {}", coord.x, coord.y);
}

fn write_ring(out: &mut String, ring: &Vec<Coordinate>) {
    write_list(out, ring, write_pair)
}

fn write_list<T, F>(out: &mut String, items: &[T], mut write_item: F)
where
    F: FnMut(&mut String, &T),
{
    out.push('(');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_item(out, item);
    }
    out.push(')');
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Open,
    Close,
    Comma,
    Number(f64),
}

fn tokenize(s: &str) -> GeometryResult<Vec<Token>> {
    let mut tokens = vec![];
    let mut word = String::new();

    for ch in s.chars() {
        match ch {
            '(' | ')' | ',' => {
                flush_number(&mut word, &mut tokens)?;
                tokens.push(match ch {
                    '(' => Token::Open,
                    ')' => Token::Close,
                    _ => Token::Comma,
                });
            }
            c if c.is_whitespace() => flush_number(&mut word, &mut tokens)?,
            c => word.push(c),
        }
    }
    flush_number(&mut word, &mut tokens)?;
    Ok(tokens)
}

fn flush_number(word: &mut String, tokens: &mut Vec<Token>) -> GeometryResult<()> {
    if word.is_empty() {
        return Ok(());
    }
    let value: f64 = word
        .parse()
        .map_err(|_| GeometryError::invalid_wkt(format!("invalid number '{}'", word)))?;
    if !value.is_finite() {
        return Err(GeometryError::invalid_wkt(format!("non-finite number '{}'", word)));
    }
    tokens.push(Token::Number(value));
    word.clear();
    Ok(())
}

// ============================================================================
// Nested list parser
// ============================================================================

/// Generic nested-list form of WKT content.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Pair(Coordinate),
    List(Vec<Node>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> GeometryResult<Node> {
        let node = self.parse_list()?;
        if self.pos != self.tokens.len() {
            return Err(GeometryError::invalid_wkt(
                "unexpected content after closing parenthesis",
            ));
        }
        Ok(node)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn parse_list(&mut self) -> GeometryResult<Node> {
        if self.next() != Some(Token::Open) {
            return Err(GeometryError::invalid_wkt("expected '('"));
        }

        let mut items = vec![];
        loop {
            items.push(self.parse_item()?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::Close) => break,
                Some(token) => {
                    return Err(GeometryError::invalid_wkt(format!(
                        "expected ',' or ')', got {:?}",
                        token
                    )))
                }
                None => return Err(GeometryError::invalid_wkt("unbalanced parentheses")),
            }
        }
        Ok(Node::List(items))
    }

    fn parse_item(&mut self) -> GeometryResult<Node> {
        match self.peek() {
            Some(Token::Open) => self.parse_list(),
            Some(Token::Number(x)) => {
                self.pos += 1;
                let y = match self.next() {
                    Some(Token::Number(y)) => y,
                    _ => {
                        return Err(GeometryError::invalid_wkt(
                            "coordinate pair requires two numbers",
                        ))
                    }
                };
                if let Some(Token::Number(_)) = self.peek() {
                    return Err(GeometryError::invalid_wkt(
                        "only two-dimensional coordinates are supported",
                    ));
                }
                Ok(Node::Pair(Coordinate::new(x, y)))
            }
            Some(Token::Close) => Err(GeometryError::invalid_wkt("empty coordinate list")),
            _ => Err(GeometryError::invalid_wkt("expected a coordinate or '('")),
        }
    }
}

// ============================================================================
// Nested list -> Geometry
// ============================================================================

fn build_geometry(kind: GeometryKind, content: Node) -> GeometryResult<Geometry> {
    let geometry = match kind {
        GeometryKind::Point => {
            let mut coords = pairs(content)?;
            if coords.len() != 1 {
                return Err(GeometryError::invalid_wkt(
                    "POINT must have exactly one coordinate",
                ));
            }
            Geometry::Point(coords.remove(0))
        }
        GeometryKind::LineString => Geometry::LineString(pairs(content)?),
        GeometryKind::Polygon => Geometry::Polygon(rings(content)?),
        GeometryKind::MultiPoint => {
            let points = members(content)?
                .into_iter()
                .map(|member| match member {
                    Node::Pair(coord) => Ok(coord),
                    list => {
                        let mut coords = pairs(list)?;
                        if coords.len() != 1 {
                            return Err(GeometryError::invalid_wkt(
                                "MULTIPOINT members must have exactly one coordinate",
                            ));
                        }
                        Ok(coords.remove(0))
                    }
                })
                .collect::<GeometryResult<Vec<_>>>()?;
            Geometry::MultiPoint(points)
        }
        GeometryKind::MultiLineString => Geometry::MultiLineString(rings(content)?),
        GeometryKind::MultiPolygon => Geometry::MultiPolygon(
            members(content)?
                .into_iter()
                .map(rings)
                .collect::<GeometryResult<Vec<_>>>()?,
        ),
    };
    Ok(geometry)
}

fn members(node: Node) -> GeometryResult<Vec<Node>> {
    match node {
        Node::List(items) => Ok(items),
        Node::Pair(_) => Err(GeometryError::invalid_wkt(
            "expected a parenthesized list, got a coordinate",
        )),
    }
}

fn pairs(node: Node) -> GeometryResult<Vec<Coordinate>> {
    members(node)?
        .into_iter()
        .map(|item| match item {
            Node::Pair(coord) => Ok(coord),
            Node::List(_) => Err(GeometryError::invalid_wkt(
                "unexpected nested list in coordinate sequence",
            )),
        })
        .collect()
}

fn rings(node: Node) -> GeometryResult<Vec<Vec<Coordinate>>> {
    members(node)?.into_iter().map(pairs).collect()
}
