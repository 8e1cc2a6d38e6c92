use crate::{
    tokenizer::Token,
    types::{Declaration, DeclarationKind, EnumMember, Key, Literal, Module, PropertySignature, TypeBase, TypeExpr, TypeTerm},
    utils::{error, quote},
    error::CompileError,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER:        Regex = Regex::new(r"^[\p{XID_Start}_$][\p{XID_Continue}$]*$").unwrap();
    static ref STRING:            Regex = Regex::new(r#"^["']"#).unwrap();
    static ref NUMBER:            Regex = Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap();
    static ref EQUALS:            Regex = Regex::new(r"^=$").unwrap();
    static ref SEMICOLON:         Regex = Regex::new(r"^;$").unwrap();
    static ref COLON:             Regex = Regex::new(r"^:$").unwrap();
    static ref COMMA:             Regex = Regex::new(r"^,$").unwrap();
    static ref PIPE:              Regex = Regex::new(r"^\|$").unwrap();
    static ref QUESTION:          Regex = Regex::new(r"^\?$").unwrap();
    static ref LEFT_BRACE:        Regex = Regex::new(r"^\{$").unwrap();
    static ref RIGHT_BRACE:       Regex = Regex::new(r"^\}$").unwrap();
    static ref ARRAY_TOKEN:       Regex = Regex::new(r"^\[\]$").unwrap();
    static ref EXPORT_KEYWORD:    Regex = Regex::new(r"^export$").unwrap();
    static ref ENUM_KEYWORD:      Regex = Regex::new(r"^enum$").unwrap();
    static ref INTERFACE_KEYWORD: Regex = Regex::new(r"^interface$").unwrap();
    static ref EXTENDS_KEYWORD:   Regex = Regex::new(r"^extends$").unwrap();
    static ref EOF:               Regex = Regex::new(r"^$").unwrap();
}

struct Cursor<'t> {
    tokens: &'t [Token],
    index:  usize,
}

impl<'t> Cursor<'t> {
    /// The token under the cursor; past the end this is the final
    /// end-of-input token.
    fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.index).or_else(|| self.tokens.last())
    }

    fn peek(&self, test: &Regex) -> bool {
        self.current().is_some_and(|tok| test.is_match(&tok.text))
    }

    fn eat(&mut self, test: &Regex) -> bool {
        if self.peek(test) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, test: &Regex, expected: &str) -> Result<&'t Token, CompileError> {
        let tok = self.current();
        if self.eat(test) {
            if let Some(tok) = tok {
                return Ok(tok);
            }
        }
        Err(self.error_here(&format!("Expected {} but found {}", expected, self.found())))
    }

    fn unexpected_token(&self) -> CompileError {
        self.error_here(&format!("Unexpected token {}", self.found()))
    }

    fn found(&self) -> String {
        match self.current() {
            Some(tok) if tok.text.is_empty() => "end of input".to_string(),
            Some(tok) => quote(&tok.text),
            None => "end of input".to_string(),
        }
    }

    fn error_here(&self, msg: &str) -> CompileError {
        match self.current() {
            Some(tok) => error(msg, tok.line, tok.column),
            None => error(msg, 0, 0),
        }
    }
}

/// Parses a token stream produced by
/// [`tokenize_declarations`](crate::tokenizer::tokenize_declarations).
pub fn parse_declarations(tokens: &[Token]) -> Result<Module, CompileError> {
    let mut cursor = Cursor { tokens, index: 0 };
    let mut declarations = Vec::new();

    while cursor.index < tokens.len() && !cursor.eat(&EOF) {
        let exported = cursor.eat(&EXPORT_KEYWORD);
        let is_enum = if cursor.eat(&ENUM_KEYWORD) {
            true
        } else if cursor.eat(&INTERFACE_KEYWORD) {
            false
        } else {
            return Err(cursor.unexpected_token());
        };

        let name_tok = cursor.expect(&IDENTIFIER, "identifier")?;

        let kind = if is_enum {
            parse_enum_body(&mut cursor)?
        } else {
            parse_interface_body(&mut cursor)?
        };

        // Tolerate a stray `;` after a declaration.
        cursor.eat(&SEMICOLON);

        declarations.push(Declaration {
            name: name_tok.text.clone(),
            exported,
            kind,
        });
    }

    Ok(Module { declarations })
}

fn parse_enum_body(cursor: &mut Cursor<'_>) -> Result<DeclarationKind, CompileError> {
    cursor.expect(&LEFT_BRACE, "\"{\"")?;

    let mut members = Vec::new();
    while !cursor.eat(&RIGHT_BRACE) {
        let key = parse_key(cursor)?;
        let value = if cursor.eat(&EQUALS) {
            Some(parse_literal(cursor)?)
        } else {
            None
        };
        members.push(EnumMember { key, value });

        if !cursor.eat(&COMMA) && !cursor.peek(&RIGHT_BRACE) {
            return Err(cursor.error_here(&format!("Expected \",\" but found {}", cursor.found())));
        }
    }

    Ok(DeclarationKind::Enum(members))
}

fn parse_interface_body(cursor: &mut Cursor<'_>) -> Result<DeclarationKind, CompileError> {
    let mut extends = Vec::new();
    if cursor.eat(&EXTENDS_KEYWORD) {
        loop {
            let base = cursor.expect(&IDENTIFIER, "identifier")?;
            extends.push(base.text.clone());
            if !cursor.eat(&COMMA) {
                break;
            }
        }
    }

    cursor.expect(&LEFT_BRACE, "\"{\"")?;

    let mut members = Vec::new();
    while !cursor.eat(&RIGHT_BRACE) {
        let key = parse_key(cursor)?;
        let optional = cursor.eat(&QUESTION);
        cursor.expect(&COLON, "\":\"")?;
        let ty = parse_type(cursor)?;
        members.push(PropertySignature { key, optional, ty });

        if !cursor.eat(&SEMICOLON) && !cursor.eat(&COMMA) && !cursor.peek(&RIGHT_BRACE) {
            return Err(cursor.error_here(&format!("Expected \";\" but found {}", cursor.found())));
        }
    }

    Ok(DeclarationKind::Interface { extends, members })
}

fn parse_key(cursor: &mut Cursor<'_>) -> Result<Key, CompileError> {
    if cursor.peek(&STRING) {
        let tok = cursor.expect(&STRING, "string")?;
        return Ok(Key::String(unquote(tok)?));
    }
    let tok = cursor.expect(&IDENTIFIER, "identifier")?;
    Ok(Key::Identifier(tok.text.clone()))
}

fn parse_literal(cursor: &mut Cursor<'_>) -> Result<Literal, CompileError> {
    if cursor.peek(&STRING) {
        let tok = cursor.expect(&STRING, "string")?;
        return Ok(Literal::String(unquote(tok)?));
    }
    let tok = cursor.expect(&NUMBER, "string or number")?;
    Ok(Literal::Number(tok.text.clone()))
}

fn parse_type(cursor: &mut Cursor<'_>) -> Result<TypeExpr, CompileError> {
    // A leading `|` is allowed, as in multi-line unions.
    cursor.eat(&PIPE);

    let mut variants = vec![parse_type_term(cursor)?];
    while cursor.eat(&PIPE) {
        variants.push(parse_type_term(cursor)?);
    }
    Ok(TypeExpr { variants })
}

fn parse_type_term(cursor: &mut Cursor<'_>) -> Result<TypeTerm, CompileError> {
    let base = if cursor.peek(&STRING) || cursor.peek(&NUMBER) {
        TypeBase::Literal(parse_literal(cursor)?)
    } else if cursor.peek(&IDENTIFIER) {
        let tok = cursor.expect(&IDENTIFIER, "type")?;
        TypeBase::Reference(tok.text.clone())
    } else {
        return Err(cursor.error_here(&format!("Expected type but found {}", cursor.found())));
    };

    let mut array_depth = 0;
    while cursor.eat(&ARRAY_TOKEN) {
        array_depth += 1;
    }
    Ok(TypeTerm { base, array_depth })
}

/// Decodes a single- or double-quoted string literal token.
fn unquote(tok: &Token) -> Result<String, CompileError> {
    let text = tok.text.as_str();
    let json = if text.starts_with('\'') {
        // Re-quote as a JSON string: unescape `\'`, escape bare `"`.
        let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
        let mut out = String::with_capacity(inner.len() + 2);
        out.push('"');
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => out.push('\\'),
                },
                '"' => out.push_str("\\\""),
                other => out.push(other),
            }
        }
        out.push('"');
        out
    } else {
        text.to_string()
    };

    serde_json::from_str::<String>(&json)
        .map_err(|_| error(&format!("Invalid string literal {}", text), tok.line, tok.column))
}
