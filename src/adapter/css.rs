//! CSS adapter: writes class selectors, ID selectors and optionally element
//! type selectors. The file path itself is written by the path adapter with
//! an underscore prefix.

use super::FieldSink;
use crate::error::{ApiError, ResourceFormat};
use crate::tree::ResourceFile;
use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

/// CSS grammar level the stylesheet is written against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssVersion {
    Css21,
    #[default]
    Css30,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssOptions {
    /// Charset used when the file carries no BOM.
    #[serde(default = "default_charset")]
    pub charset: String,

    #[serde(default)]
    pub css_version: CssVersion,

    /// Write `div`-style selectors (default: false).
    #[serde(default)]
    pub write_element_type_selector: bool,

    /// Write `.class` selectors (default: true).
    #[serde(default = "default_true")]
    pub write_class_selector: bool,

    /// Write `#id` selectors (default: true).
    #[serde(default = "default_true")]
    pub write_id_selector: bool,
}

fn default_charset() -> String {
    "UTF-8".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            css_version: CssVersion::default(),
            write_element_type_selector: false,
            write_class_selector: default_true(),
            write_id_selector: default_true(),
        }
    }
}

pub(crate) fn process(
    options: &CssOptions,
    file: &ResourceFile,
    sink: &mut FieldSink<'_>,
) -> Result<(), ApiError> {
    let encoding = encoding_rs::Encoding::for_label(options.charset.as_bytes()).ok_or_else(|| {
        ApiError::ConfigError(format!("Unknown CSS charset: {}", options.charset))
    })?;
    let bytes = file.read_bytes()?;
    let (text, _, _) = encoding.decode(&bytes);
    tracing::debug!(file = %file.name, version = ?options.css_version, "Reading stylesheet");

    let members = selector_members(&text).map_err(|message| {
        ApiError::parse(
            &file.path,
            ResourceFormat::Css,
            format!("{}{}", message, report_hint()),
        )
    })?;

    for member in members {
        if let Some(class) = member.strip_prefix('.') {
            if options.write_class_selector {
                sink.add_key(class);
            }
        } else if let Some(id) = member.strip_prefix('#') {
            if options.write_id_selector {
                sink.add_key(id);
            }
        } else if options.write_element_type_selector {
            sink.add_key(&member);
        }
    }
    Ok(())
}

fn report_hint() -> String {
    let repository = env!("CARGO_PKG_REPOSITORY");
    if repository.is_empty() {
        String::new()
    } else {
        format!(
            " (if the stylesheet is valid, please report to {}/issues)",
            repository.trim_end_matches('/')
        )
    }
}

/// First simple-selector member of every selector of every top-level style
/// rule, in document order (`.foo`, `#bar`, `div`, `*`, `:hover`, `[x]`).
pub(crate) fn selector_members(css: &str) -> Result<Vec<String>, String> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    collect_members(&mut parser).map_err(|error| describe(&error))
}

type Selector<'i> = Vec<(Token<'i>, String)>;

fn collect_members<'i, 't>(
    parser: &mut Parser<'i, 't>,
) -> Result<Vec<String>, ParseError<'i, String>> {
    let mut members = Vec::new();
    let mut selectors: Vec<Selector<'i>> = Vec::new();
    let mut selector: Selector<'i> = Vec::new();

    loop {
        let at_rule_start = selectors.is_empty() && selector.is_empty();
        parser.skip_whitespace();
        let start = parser.position();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::CDO | Token::CDC if at_rule_start => {}
            Token::AtKeyword(_) if at_rule_start => skip_at_rule(parser)?,
            Token::BadString(_) | Token::BadUrl(_) => return Err(bad_token(parser, &token)),
            Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::Semicolon => return Err(unexpected(parser, &token)),
            Token::Comma => selectors.push(std::mem::take(&mut selector)),
            Token::CurlyBracketBlock => {
                selectors.push(std::mem::take(&mut selector));
                parser.parse_nested_block(|nested| scan_block(nested))?;
                for selector in selectors.drain(..) {
                    match first_member(&selector) {
                        Some(member) => members.push(member),
                        None => return Err(parser.new_custom_error("empty selector".to_string())),
                    }
                }
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                parser.parse_nested_block(|nested| scan_block(nested))?;
                let raw = parser.slice_from(start).trim().to_string();
                selector.push((token, raw));
            }
            other => {
                let raw = parser.slice_from(start).trim().to_string();
                selector.push((other, raw));
            }
        }
    }

    if !selectors.is_empty() || !selector.is_empty() {
        return Err(parser.new_custom_error("selector without a declaration block".to_string()));
    }
    Ok(members)
}

/// Consume an at-rule up to its `;` or through its block.
fn skip_at_rule<'i, 't>(parser: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, String>> {
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };
        match token {
            Token::Semicolon => return Ok(()),
            Token::CurlyBracketBlock => {
                parser.parse_nested_block(|nested| scan_block(nested))?;
                return Ok(());
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                parser.parse_nested_block(|nested| scan_block(nested))?;
            }
            Token::BadString(_) | Token::BadUrl(_) => return Err(bad_token(parser, &token)),
            Token::CloseCurlyBracket | Token::CloseParenthesis | Token::CloseSquareBracket => {
                return Err(unexpected(parser, &token))
            }
            _ => {}
        }
    }
}

/// Walk a block's contents, failing on tokens that mark broken syntax.
fn scan_block<'i, 't>(parser: &mut Parser<'i, 't>) -> Result<(), ParseError<'i, String>> {
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };
        match token {
            Token::BadString(_) | Token::BadUrl(_) => return Err(bad_token(parser, &token)),
            Token::CurlyBracketBlock
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::Function(_) => parser.parse_nested_block(|nested| scan_block(nested))?,
            _ => {}
        }
    }
}

fn first_member(selector: &[(Token<'_>, String)]) -> Option<String> {
    let (first, raw) = selector.first()?;
    let second = selector.get(1).map(|(token, _)| token);
    let member = match (first, second) {
        (Token::Delim('.'), Some(Token::Ident(name))) => format!(".{}", &**name),
        (Token::Colon, Some(Token::Colon)) => match selector.get(2).map(|(token, _)| token) {
            Some(Token::Ident(name)) | Some(Token::Function(name)) => format!("::{}", &**name),
            _ => "::".to_string(),
        },
        (Token::Colon, Some(Token::Ident(name))) | (Token::Colon, Some(Token::Function(name))) => {
            format!(":{}", &**name)
        }
        _ => raw.clone(),
    };
    Some(member)
}

fn bad_token<'i>(parser: &Parser<'i, '_>, token: &Token<'i>) -> ParseError<'i, String> {
    let message = match token {
        Token::BadUrl(_) => "malformed url()",
        _ => "unterminated string",
    };
    parser.new_custom_error(message.to_string())
}

fn unexpected<'i>(parser: &Parser<'i, '_>, token: &Token<'i>) -> ParseError<'i, String> {
    let text = match token {
        Token::CloseCurlyBracket => "}",
        Token::CloseParenthesis => ")",
        Token::CloseSquareBracket => "]",
        Token::Semicolon => ";",
        _ => "token",
    };
    parser.new_custom_error(format!("unexpected '{}'", text))
}

fn describe(error: &ParseError<'_, String>) -> String {
    let message = match &error.kind {
        ParseErrorKind::Custom(message) => message.clone(),
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    };
    format!(
        "line {}, column {}: {}",
        error.location.line + 1,
        error.location.column,
        message
    )
}
