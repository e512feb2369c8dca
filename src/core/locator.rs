//! Read-only queries over the top level of a module.
//!
//! Only top-level declarations are searched. When several declarators carry
//! the requested name the first one in source order decides the outcome.

use crate::utils::error::{PatchError, Result};
use swc_core::ecma::ast::{
    Decl, ExportDecl, Expr, ExprOrSpread, Module, ModuleDecl, ModuleItem, ObjectLit, Pat, Stmt,
    VarDecl, VarDeclarator,
};

fn shape(binding: &str, message: impl Into<String>) -> PatchError {
    PatchError::Shape {
        binding: binding.to_string(),
        message: message.into(),
    }
}

fn not_found(binding: &str) -> PatchError {
    PatchError::NotFound {
        binding: binding.to_string(),
    }
}

fn declares(declarator: &VarDeclarator, name: &str) -> bool {
    matches!(&declarator.name, Pat::Ident(binding) if &*binding.id.sym == name)
}

fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::Object(_) => "an object literal",
        Expr::Array(_) => "an array literal",
        Expr::Call(_) => "a call expression",
        Expr::Ident(_) => "an identifier",
        Expr::Lit(_) => "a literal",
        Expr::Fn(_) | Expr::Arrow(_) => "a function",
        Expr::Member(_) => "a member expression",
        _ => "an unsupported expression",
    }
}

/// Initializer of the first top-level `var`/`let`/`const` declarator named `name`.
pub fn find_named_variable_initializer<'a>(module: &'a mut Module, name: &str) -> Result<&'a mut Expr> {
    for item in module.body.iter_mut() {
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
            continue;
        };

        if let Some(declarator) = var.decls.iter_mut().find(|d| declares(d, name)) {
            return declarator
                .init
                .as_deref_mut()
                .ok_or_else(|| shape(name, "declared without an initializer"));
        }
    }

    Err(not_found(name))
}

pub fn expect_object_literal<'a>(expr: &'a mut Expr, binding: &str) -> Result<&'a mut ObjectLit> {
    match expr {
        Expr::Object(object) => Ok(object),
        other => Err(shape(
            binding,
            format!("expected an object literal, found {}", describe(other)),
        )),
    }
}

/// Declarations reachable from a top-level item: plain variable statements
/// and `export const ...`.
fn exposed_var_decl(item: &mut ModuleItem) -> Option<&mut VarDecl> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => Some(&mut **var),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
            decl: Decl::Var(var),
            ..
        })) => Some(&mut **var),
        _ => None,
    }
}

/// Argument list of the call that initializes `binding`.
///
/// Fails with `NotFound` when no such declarator exists, and with `Shape` when
/// the initializer is not a call or the call has no arguments.
pub fn find_aggregation_arguments<'a>(
    module: &'a mut Module,
    binding: &str,
) -> Result<&'a mut Vec<ExprOrSpread>> {
    for item in module.body.iter_mut() {
        let Some(var) = exposed_var_decl(item) else {
            continue;
        };
        let Some(declarator) = var.decls.iter_mut().find(|d| declares(d, binding)) else {
            continue;
        };

        match declarator.init.as_deref() {
            Some(Expr::Call(call)) if !call.args.is_empty() => {}
            Some(Expr::Call(_)) => return Err(shape(binding, "the call has no arguments")),
            Some(other) => {
                return Err(shape(
                    binding,
                    format!("expected a call expression, found {}", describe(other)),
                ))
            }
            None => return Err(shape(binding, "declared without an initializer")),
        }

        return match declarator.init.as_deref_mut() {
            Some(Expr::Call(call)) => Ok(&mut call.args),
            _ => Err(shape(binding, "expected a call expression")),
        };
    }

    Err(not_found(binding))
}

/// The object literal passed as first argument to the aggregation call.
pub fn find_aggregation_object<'a>(module: &'a mut Module, binding: &str) -> Result<&'a mut ObjectLit> {
    let args = find_aggregation_arguments(module, binding)?;
    let first = args
        .first_mut()
        .ok_or_else(|| shape(binding, "the call has no arguments"))?;

    if first.spread.is_some() {
        return Err(shape(binding, "first argument is a spread element"));
    }

    match &mut *first.expr {
        Expr::Object(object) => Ok(object),
        other => Err(shape(
            binding,
            format!("first argument must be an object literal, found {}", describe(other)),
        )),
    }
}

/// Number of leading import declarations; a new import inserted here lands
/// after every existing import and before the first other statement.
pub fn find_import_insertion_index(module: &Module) -> usize {
    module
        .body
        .iter()
        .take_while(|item| matches!(item, ModuleItem::ModuleDecl(ModuleDecl::Import(_))))
        .count()
}
