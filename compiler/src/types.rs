//! Syntax tree of the declaration subset the formatter understands.

#[derive(Debug, Default, PartialEq)]
pub struct Module {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    Enum(Vec<EnumMember>),
    Interface {
        extends: Vec<String>,
        members: Vec<PropertySignature>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name:     String,
    pub exported: bool,
    pub kind:     DeclarationKind,
}

/// A property or enum member name as written: bare or quoted.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Identifier(String),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub key:   Key,
    pub value: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub key:      Key,
    pub optional: bool,
    pub ty:       TypeExpr,
}

/// A union of one or more terms, `string[] | undefined`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub variants: Vec<TypeTerm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeTerm {
    pub base:        TypeBase,
    pub array_depth: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeBase {
    Reference(String),
    Literal(Literal),
}
