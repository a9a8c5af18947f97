//! Single rendering pass from declaration nodes to TypeScript text.

use crate::decl::{Decl, DeclGroup, FnSig, Member, TsType};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Literal(value) => write_literal(f, value),
            Self::Array(item) => write!(f, "Array<{item}>"),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    // `(a) => b | c` would swallow the rest of the union
                    if matches!(member, Self::Function(_)) {
                        write!(f, "({member})")?;
                    } else {
                        write!(f, "{member}")?;
                    }
                }
                Ok(())
            }
            Self::Promise(inner) => write!(f, "Promise<{inner}>"),
            Self::AsyncIterator(inner) => write!(f, "AsyncIterator<{inner}>"),
            Self::Function(sig) => write!(f, "{sig}"),
            Self::Object(members) if members.is_empty() => f.write_str("{}"),
            Self::Object(members) => {
                f.write_str("{ ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl fmt::Display for FnSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ") => {}", self.ret)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = if self.optional { "?" } else { "" };
        write!(f, "{}{optional}: {}", self.name, self.ty)
    }
}

fn write_literal(f: &mut impl Write, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn pad(out: &mut impl Write, depth: usize) -> fmt::Result {
    (0..depth).try_for_each(|_| out.write_str(INDENT))
}

/// Write one declaration, each line indented `depth` levels.
pub fn write_decl(out: &mut impl Write, decl: &Decl, depth: usize) -> fmt::Result {
    match decl {
        Decl::Interface { name, members } => {
            pad(out, depth)?;
            writeln!(out, "export interface {name} {{")?;
            for member in members {
                pad(out, depth + 1)?;
                writeln!(out, "{member};")?;
            }
            pad(out, depth)?;
            writeln!(out, "}}")
        }
        Decl::TypeAlias { name, ty } => {
            pad(out, depth)?;
            writeln!(out, "export type {name} = {ty};")
        }
        Decl::DefaultResolvers { parent, fields } => {
            pad(out, depth)?;
            writeln!(out, "export const defaultResolvers = {{")?;
            for field in fields {
                pad(out, depth + 1)?;
                writeln!(out, "{field}: (parent: {parent}) => parent.{field},")?;
            }
            pad(out, depth)?;
            writeln!(out, "}};")
        }
    }
}

/// Write a group as a namespace of its declarations.
pub fn write_group(out: &mut impl Write, group: &DeclGroup) -> fmt::Result {
    writeln!(out, "export namespace {} {{", group.namespace())?;
    for decl in &group.decls {
        write_decl(out, decl, 1)?;
    }
    writeln!(out, "}}")
}
