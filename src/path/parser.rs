//! JSONPath query string parser.
//!
//! Produces the element list only; root placement and the other path-level
//! invariants are checked when the list is turned into a [`JsonPath`].
//!
//! [`JsonPath`]: super::sequence::JsonPath

use super::element::PathElement;
use super::error::ParseError;

/// Parser for JSONPath query strings.
pub struct Parser {
    input: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given query string.
    pub fn new(query: &str) -> Self {
        Self {
            input: query.chars().collect(),
            position: 0,
        }
    }

    /// Parses the query string into its elements.
    pub fn parse(query: &str) -> Result<Vec<PathElement>, ParseError> {
        let mut parser = Parser::new(query);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Vec<PathElement>, ParseError> {
        let mut elements = Vec::new();

        if self.is_eof() {
            return Err(ParseError::UnexpectedEnd {
                expected: "JSONPath expression".to_string(),
            });
        }

        // Root ($) only counts when it is a complete first token
        if self.peek() == Some('$') && matches!(self.peek_at(1), None | Some('.') | Some('[')) {
            self.next();
            elements.push(PathElement::Root);
        } else if !matches!(self.peek(), Some('.') | Some('[')) {
            elements.push(self.parse_name_token(false)?);
        }

        let mut descent = false;
        while let Some(ch) = self.peek() {
            match ch {
                '.' => {
                    if descent {
                        return Err(self.unexpected("expression element after recursive descent"));
                    }
                    self.next();
                    if self.peek() == Some('.') {
                        self.next();
                        descent = true;
                    }
                    match self.peek() {
                        None if descent => {
                            return Err(ParseError::UnexpectedEnd {
                                expected: "expression element after recursive descent".to_string(),
                            })
                        }
                        None => {
                            return Err(ParseError::InvalidSyntax {
                                message: "expression ends with dot".to_string(),
                            })
                        }
                        Some('.') => {
                            return Err(self.unexpected("expression element after recursive descent"))
                        }
                        Some('[') => {}
                        Some(_) => {
                            elements.push(self.parse_name_token(descent)?);
                            descent = false;
                        }
                    }
                }
                '[' => {
                    let element = self.parse_bracket_expression()?;
                    elements.push(wrap(element, descent)?);
                    descent = false;
                }
                _ => return Err(self.unexpected("'.' or '['")),
            }
        }

        Ok(elements)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Checks if we've reached the end of input.
    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(ch) => ParseError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: expected.to_string(),
            },
            None => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            },
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(ParseError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses a dot-notation token: a property name or `*`.
    fn parse_name_token(&mut self, descent: bool) -> Result<PathElement, ParseError> {
        let start = self.position;
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '.' | '[' => break,
                ']' => return Err(self.unexpected("property name")),
                _ => {
                    name.push(ch);
                    self.next();
                }
            }
        }
        if name.is_empty() {
            return Err(ParseError::InvalidSyntax {
                message: format!("expected property name at position {}", start),
            });
        }

        let element = if name == "*" {
            PathElement::AnyProperty
        } else {
            PathElement::property(name)?
        };
        wrap(element, descent)
    }

    /// Parses bracket expression: `[*]`, `['a','b']`, `[(expr)]`,
    /// `[?(expr)]`, `[1,2]`, `[start:end:step]` or `[index]`.
    fn parse_bracket_expression(&mut self) -> Result<PathElement, ParseError> {
        self.expect('[')?;
        self.skip_whitespace();

        match self.peek() {
            Some('*') => {
                self.next();
                self.expect(']')?;
                Ok(PathElement::AnyArrayIndex)
            }
            Some('\'') => {
                let mut names = self.parse_quoted_names()?;
                self.expect(']')?;
                if names.len() == 1 {
                    let name = names.pop().unwrap_or_default();
                    Ok(PathElement::property(name)?)
                } else {
                    Ok(PathElement::property_list(names)?)
                }
            }
            Some('(') => {
                let expression = self.parse_parenthesized()?;
                self.expect(']')?;
                Ok(PathElement::expression(expression)?)
            }
            Some('?') => {
                self.next();
                self.skip_whitespace();
                if self.peek() != Some('(') {
                    return Err(self.unexpected("'(' after '?'"));
                }
                let expression = self.parse_parenthesized()?;
                self.expect(']')?;
                Ok(PathElement::filter_expression(expression)?)
            }
            Some(']') => Err(ParseError::InvalidSyntax {
                message: "no content inside square brackets".to_string(),
            }),
            Some(_) => {
                let token = self.parse_raw_token()?;
                self.expect(']')?;
                parse_index_token(token.trim())
            }
            None => Err(ParseError::UnexpectedEnd {
                expected: "bracket content".to_string(),
            }),
        }
    }

    /// Parses `'a'` or `'a', 'b', ...`; names cannot contain quotes.
    fn parse_quoted_names(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() != Some('\'') {
                return Err(self.unexpected("quoted property name"));
            }
            self.next();

            let mut value = String::new();
            loop {
                match self.next() {
                    Some('\'') => break,
                    Some(ch) => value.push(ch),
                    None => {
                        return Err(ParseError::UnexpectedEnd {
                            expected: "closing quote '''".to_string(),
                        })
                    }
                }
            }
            names.push(value);

            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.next();
            } else {
                break;
            }
        }
        Ok(names)
    }

    /// Parses `( ... )` up to the balancing parenthesis, skipping over
    /// quoted strings. Returns the text between the outer parentheses.
    fn parse_parenthesized(&mut self) -> Result<String, ParseError> {
        self.expect('(')?;
        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        let mut text = String::new();

        loop {
            let Some(ch) = self.next() else {
                return Err(ParseError::UnexpectedEnd {
                    expected: "closing ')'".to_string(),
                });
            };
            match (quote, ch) {
                (Some(open), _) if ch == open => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(ch),
                (None, '(') => depth += 1,
                (None, ')') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text);
                    }
                }
                (None, _) => {}
            }
            text.push(ch);
        }
    }

    /// Reads everything up to (not including) the closing bracket.
    fn parse_raw_token(&mut self) -> Result<String, ParseError> {
        let mut token = String::new();
        while let Some(ch) = self.peek() {
            if ch == ']' {
                return Ok(token);
            }
            token.push(ch);
            self.next();
        }
        Err(ParseError::UnexpectedEnd {
            expected: "']'".to_string(),
        })
    }
}

fn wrap(element: PathElement, descent: bool) -> Result<PathElement, ParseError> {
    if descent {
        Ok(PathElement::recursive_descent(element)?)
    } else {
        Ok(element)
    }
}

/// Parses the numeric bracket forms: slice, index list, or single index.
fn parse_index_token(token: &str) -> Result<PathElement, ParseError> {
    if token.contains(':') {
        let parts: Vec<&str> = token.split(':').map(str::trim).collect();
        if parts.len() > 3 {
            return Err(ParseError::InvalidSyntax {
                message: format!("array slice has too many parts: {}", parts.len()),
            });
        }
        let start = parse_optional_number(parts[0])?;
        let end = parts.get(1).map_or(Ok(None), |part| parse_optional_number(part))?;
        let step = parts
            .get(2)
            .map_or(Ok(None), |part| parse_optional_number(part))?
            .unwrap_or(1);
        return Ok(PathElement::array_slice(start, end, step)?);
    }

    if token.contains(',') {
        let parts: Vec<&str> = token.split(',').map(str::trim).collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(ParseError::InvalidSyntax {
                message: "empty entry inside array index list".to_string(),
            });
        }
        let indexes = parts
            .into_iter()
            .map(parse_number)
            .collect::<Result<Vec<isize>, _>>()?;
        return Ok(PathElement::array_index_list(indexes)?);
    }

    Ok(PathElement::array_index(parse_number(token)?)?)
}

fn parse_optional_number(part: &str) -> Result<Option<isize>, ParseError> {
    if part.is_empty() {
        Ok(None)
    } else {
        parse_number(part).map(Some)
    }
}

fn parse_number(part: &str) -> Result<isize, ParseError> {
    part.parse::<isize>().map_err(|_| ParseError::InvalidSyntax {
        message: format!("invalid number: {}", part),
    })
}
