//! Declaration parser.
//!
//! Turns a [`RawFragment`] into a [`Declaration`]. Fragments arrive already
//! normalized by the scanner (no comments, single spaces outside literals),
//! so parsing is a matter of peeling keywords and delimiters off the front
//! of the text.

use plspec_foundation::{Direction, Error, Result};
use tracing::trace;

use crate::declaration::{Argument, ConstantDecl, Declaration, FunctionDecl, ProcedureDecl};
use crate::scanner::{FragmentKind, RawFragment};
use crate::splitter::{
    find_keyword, find_top_level, is_balanced, is_word_byte, matching_paren, split_top_level,
};

/// Function modifiers that may follow the return type and carry no
/// marshalling information.
const RETURN_MODIFIERS: [&str; 4] = ["deterministic", "pipelined", "parallel_enable", "result_cache"];

/// Parses one scanned fragment into a declaration.
///
/// # Errors
/// Returns `UnbalancedParentheses` if the fragment's parentheses do not
/// balance, and `MalformedDeclaration` if its name, type, or argument
/// structure cannot be located.
pub fn parse(fragment: &RawFragment) -> Result<Declaration> {
    let text = fragment.text.as_str();
    if !is_balanced(text) {
        return Err(Error::unbalanced(text));
    }
    if !fragment.terminated {
        return Err(Error::malformed("missing terminating semicolon", text));
    }

    let body = text.strip_suffix(';').unwrap_or(text).trim();
    let declaration = match fragment.kind {
        FragmentKind::Function => parse_function(body, text)?,
        FragmentKind::Procedure => parse_procedure(body, text)?,
        FragmentKind::Constant => parse_constant(body, text)?,
    };
    trace!(%declaration, "parsed declaration");
    Ok(declaration)
}

/// A routine header split into its pieces.
struct Signature<'a> {
    name: String,
    arguments: Vec<Argument>,
    rest: &'a str,
}

fn parse_function(body: &str, fragment: &str) -> Result<Declaration> {
    let signature = parse_signature(body, "function", fragment)?;

    let Some(rest) = strip_keyword(signature.rest, "return") else {
        return Err(Error::malformed(
            format!("function {} has no return clause", signature.name),
            fragment,
        ));
    };
    let return_type = strip_modifiers(rest);
    if return_type.is_empty() {
        return Err(Error::malformed(
            format!("function {} has no return type", signature.name),
            fragment,
        ));
    }

    Ok(Declaration::Function(FunctionDecl {
        name: signature.name,
        return_type: return_type.to_string(),
        arguments: signature.arguments,
    }))
}

fn parse_procedure(body: &str, fragment: &str) -> Result<Declaration> {
    let signature = parse_signature(body, "procedure", fragment)?;
    if !signature.rest.is_empty() {
        return Err(Error::malformed(
            format!(
                "unexpected `{}` after procedure {}",
                signature.rest, signature.name
            ),
            fragment,
        ));
    }

    Ok(Declaration::Procedure(ProcedureDecl {
        name: signature.name,
        arguments: signature.arguments,
    }))
}

/// Parses `<keyword> NAME [ ( arglist ) ]`, returning whatever follows.
fn parse_signature<'a>(body: &'a str, keyword: &str, fragment: &str) -> Result<Signature<'a>> {
    let rest = strip_keyword(body, keyword)
        .ok_or_else(|| Error::malformed(format!("expected `{keyword}`"), fragment))?;
    let (name, rest) = take_identifier(rest)
        .ok_or_else(|| Error::malformed(format!("{keyword} has no name"), fragment))?;

    let rest = rest.trim_start();
    if !rest.starts_with('(') {
        return Ok(Signature {
            name,
            arguments: Vec::new(),
            rest: rest.trim(),
        });
    }

    let close = matching_paren(rest, 0).ok_or_else(|| Error::unbalanced(fragment))?;
    let arguments = split_top_level(&rest[1..close], b',')
        .map_err(|_| Error::unbalanced(fragment))?
        .into_iter()
        .map(|param| parse_argument(param, fragment))
        .collect::<Result<Vec<_>>>()?;

    Ok(Signature {
        name,
        arguments,
        rest: rest[close + 1..].trim(),
    })
}

/// Parses one parameter: `NAME [in out | in | out] [nocopy] TYPE [default]`.
///
/// Direction keywords are only recognized directly after the name, longest
/// match first.
///
/// # Errors
/// Returns `MalformedDeclaration` if the name or type is missing.
pub fn parse_argument(param: &str, fragment: &str) -> Result<Argument> {
    let (name, rest) = take_identifier(param)
        .ok_or_else(|| Error::malformed("argument has no name", fragment))?;
    let mut rest = rest.trim_start();

    let mut direction = Direction::In;
    let mut explicit_direction = false;
    if let Some(after_in) = strip_keyword(rest, "in") {
        explicit_direction = true;
        if let Some(after_out) = strip_keyword(after_in, "out") {
            direction = Direction::InOut;
            rest = after_out;
        } else {
            rest = after_in;
        }
    } else if let Some(after_out) = strip_keyword(rest, "out") {
        explicit_direction = true;
        direction = Direction::Out;
        rest = after_out;
    }
    if direction.produces_output() {
        rest = strip_keyword(rest, "nocopy").unwrap_or(rest);
    }

    let (type_text, default_value) = split_default(rest);
    if type_text.is_empty() {
        return Err(Error::malformed(
            format!("argument {name} has no type"),
            fragment,
        ));
    }
    let default_value = match default_value {
        Some("") => {
            return Err(Error::malformed(
                format!("argument {name} has an empty default"),
                fragment,
            ));
        }
        other => other.map(str::to_string),
    };

    Ok(Argument {
        name,
        direction,
        explicit_direction,
        type_name: type_text.to_string(),
        default_value,
    })
}

fn parse_constant(body: &str, fragment: &str) -> Result<Declaration> {
    let (name, rest) =
        take_identifier(body).ok_or_else(|| Error::malformed("constant has no name", fragment))?;
    let rest = strip_keyword(rest.trim_start(), "constant")
        .ok_or_else(|| Error::malformed(format!("expected `constant` after {name}"), fragment))?;

    let (type_text, value) = split_default(rest);
    if type_text.is_empty() {
        return Err(Error::malformed(
            format!("constant {name} has no type"),
            fragment,
        ));
    }
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            return Err(Error::malformed(
                format!("constant {name} has no value"),
                fragment,
            ));
        }
    };

    Ok(Declaration::Constant(ConstantDecl {
        name,
        type_name: type_text.to_string(),
        value: value.to_string(),
    }))
}

/// Splits `TYPE := EXPR` or `TYPE default EXPR` at the first top-level
/// assignment, whichever comes first.
fn split_default(text: &str) -> (&str, Option<&str>) {
    let assign = find_top_level(text, ":=").map(|i| (i, 2));
    let default = find_keyword(text, "default").map(|i| (i, "default".len()));
    let split = match (assign, default) {
        (Some(a), Some(d)) => Some(if a.0 < d.0 { a } else { d }),
        (a, d) => a.or(d),
    };
    match split {
        Some((at, len)) => (text[..at].trim(), Some(text[at + len..].trim())),
        None => (text.trim(), None),
    }
}

/// Cuts the return type off at the first trailing modifier.
fn strip_modifiers(text: &str) -> &str {
    let end = RETURN_MODIFIERS
        .iter()
        .filter_map(|modifier| find_keyword(text, modifier))
        .min()
        .unwrap_or(text.len());
    text[..end].trim()
}

/// Strips a leading case-insensitive keyword that is a whole word, returning
/// the trimmed remainder.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    match rest.bytes().next() {
        Some(b) if is_word_byte(b) || b == b'"' => None,
        _ => Some(rest.trim_start()),
    }
}

/// Takes a leading identifier: a run of word characters, or a `"quoted"`
/// identifier (returned without quotes).
fn take_identifier(text: &str) -> Option<(String, &str)> {
    let text = text.trim_start();
    if let Some(quoted) = text.strip_prefix('"') {
        let end = quoted.find('"')?;
        if end == 0 {
            return None;
        }
        return Some((quoted[..end].to_string(), &quoted[end + 1..]));
    }

    let end = text
        .bytes()
        .position(|b| !is_word_byte(b))
        .unwrap_or(text.len());
    if end == 0 || text.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    Some((text[..end].to_string(), &text[end..]))
}
