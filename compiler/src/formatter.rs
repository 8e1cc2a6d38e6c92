//! Canonical printing of generated declarations.
//!
//! The generator assembles its output from loosely spaced fragments. This
//! pass parses them back and prints a stable layout: two-space indentation,
//! one member per line, trailing commas after enum members, double-quoted
//! strings, one blank line between declarations and a final newline.
//! Printing a printed module again yields the same text.

use crate::{
    error::CompileError,
    parser::parse_declarations,
    tokenizer::tokenize_declarations,
    types::{Declaration, DeclarationKind, Key, Literal, Module, TypeBase, TypeExpr},
    utils::quote,
};

const INDENT: &str = "  ";

/// Formats declaration source. Any syntax error is reported as
/// [`CompileError::Formatting`] carrying the offending text.
pub fn format_declarations(text: &str) -> Result<String, CompileError> {
    let module = tokenize_declarations(text)
        .and_then(|tokens| parse_declarations(&tokens))
        .map_err(|err| match err {
            CompileError::ParseError { msg, line, column } => CompileError::Formatting {
                msg,
                line,
                column,
                text: text.to_string(),
            },
            other => other,
        })?;
    Ok(print_module(&module))
}

pub fn print_module(module: &Module) -> String {
    let blocks: Vec<String> = module.declarations.iter().map(print_declaration).collect();
    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn print_declaration(declaration: &Declaration) -> String {
    let mut header = String::new();
    if declaration.exported {
        header.push_str("export ");
    }

    let lines: Vec<String> = match &declaration.kind {
        DeclarationKind::Enum(members) => {
            header.push_str(&format!("enum {}", declaration.name));
            members
                .iter()
                .map(|member| match &member.value {
                    Some(value) => format!("{}{} = {},", INDENT, print_key(&member.key), print_literal(value)),
                    None => format!("{}{},", INDENT, print_key(&member.key)),
                })
                .collect()
        }
        DeclarationKind::Interface { extends, members } => {
            header.push_str(&format!("interface {}", declaration.name));
            if !extends.is_empty() {
                header.push_str(&format!(" extends {}", extends.join(", ")));
            }
            members
                .iter()
                .map(|member| {
                    format!(
                        "{}{}{}: {};",
                        INDENT,
                        print_key(&member.key),
                        if member.optional { "?" } else { "" },
                        print_type(&member.ty)
                    )
                })
                .collect()
        }
    };

    if lines.is_empty() {
        format!("{} {{}}", header)
    } else {
        format!("{} {{\n{}\n}}", header, lines.join("\n"))
    }
}

fn print_key(key: &Key) -> String {
    match key {
        Key::Identifier(name) => name.clone(),
        Key::String(text) => quote(text),
    }
}

fn print_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(text) => quote(text),
        Literal::Number(text) => text.clone(),
    }
}

pub fn print_type(ty: &TypeExpr) -> String {
    ty.variants
        .iter()
        .map(|term| {
            let mut out = match &term.base {
                TypeBase::Reference(name) => name.clone(),
                TypeBase::Literal(literal) => print_literal(literal),
            };
            for _ in 0..term.array_depth {
                out.push_str("[]");
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_enum_and_interface() {
        let input = "export enum Collections {\n  Posts =  \"posts\",\n}\n\n\
                     export interface Posts extends CollectionRecord {\n  title: string;\nfiles: string[] | undefined;\n}\n\n\
                     export enum PostsStatus  { A = \"a\", B = 'b' }";
        let expected = "export enum Collections {\n  Posts = \"posts\",\n}\n\n\
                        export interface Posts extends CollectionRecord {\n  title: string;\n  files: string[] | undefined;\n}\n\n\
                        export enum PostsStatus {\n  A = \"a\",\n  B = \"b\",\n}\n";

        assert_eq!(format_declarations(input).unwrap(), expected);
    }

    #[test]
    fn test_format_is_idempotent() {
        let input = "export enum E { X = 'x' , Y = \"y\\\"z\" }  interface I { a?: 'lit' | 1 | T[][] , b: string }";
        let once = format_declarations(input).unwrap();
        let twice = format_declarations(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "export enum E {\n  X = \"x\",\n  Y = \"y\\\"z\",\n}\n\ninterface I {\n  a?: \"lit\" | 1 | T[][];\n  b: string;\n}\n"
        );
    }

    #[test]
    fn test_format_ignores_incidental_whitespace() {
        let tight = "export interface A{b:string;c:number}";
        let loose = "\n\n   export   interface\tA {\n\n b : string ;\n\n   c:\n number\n }\n\n";
        assert_eq!(format_declarations(tight).unwrap(), format_declarations(loose).unwrap());
    }

    #[test]
    fn test_empty_bodies() {
        assert_eq!(format_declarations("export enum Empty {  }").unwrap(), "export enum Empty {}\n");
        assert_eq!(
            format_declarations("export interface Bare extends CollectionRecord {\n  \n}").unwrap(),
            "export interface Bare extends CollectionRecord {}\n"
        );
        assert_eq!(format_declarations("").unwrap(), "");
    }

    #[test]
    fn test_format_non_ascii_identifiers() {
        let input = "export enum DishesStyle { Café = \"café\", Crème = 'crème' }\ninterface Über { straße?: Größe[] }";
        let expected = "export enum DishesStyle {\n  Café = \"café\",\n  Crème = \"crème\",\n}\n\n\
                        interface Über {\n  straße?: Größe[];\n}\n";

        let once = format_declarations(input).unwrap();
        assert_eq!(once, expected);
        assert_eq!(format_declarations(&once).unwrap(), once);
    }

    #[test]
    fn test_failure_carries_offending_text() {
        let input = "export enum Tags { In progress = \"in progress\" }";
        match format_declarations(input).unwrap_err() {
            CompileError::Formatting { line, column, text, .. } => {
                assert_eq!((line, column), (1, 23));
                assert_eq!(text, input);
            }
            other => panic!("expected Formatting, got {:?}", other),
        }
    }
}
