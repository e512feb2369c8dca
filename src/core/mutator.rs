//! In-place edits of a parsed module. New nodes are built directly from
//! typed AST constructors.

use crate::core::parser::parse_expression;
use crate::utils::error::Result;
use crate::utils::validation::{is_identifier, validate_identifier};
use swc_core::common::{sync::Lrc, SourceMap, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
    Ident, IdentName, ImportDecl, ImportDefaultSpecifier, ImportPhase, ImportSpecifier,
    KeyValueProp, Module, ModuleDecl, ModuleItem, ObjectLit, Prop, PropName, PropOrSpread, Str,
};

fn property_name(key: &str) -> PropName {
    if is_identifier(key) {
        PropName::Ident(IdentName::new(key.into(), DUMMY_SP))
    } else {
        PropName::Str(Str {
            span: DUMMY_SP,
            value: key.into(),
            raw: None,
        })
    }
}

/// Appends `key: <value_source>` to the end of `object`.
///
/// `value_source` is parsed as a standalone expression into `cm`. Existing
/// entries with the same key are left alone; the new entry is appended anyway.
pub fn append_property(
    cm: &Lrc<SourceMap>,
    object: &mut ObjectLit,
    key: &str,
    value_source: &str,
) -> Result<()> {
    let value = parse_expression(cm, "initial value", value_source)?;

    object
        .props
        .push(PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
            key: property_name(key),
            value,
        }))));
    Ok(())
}

/// Appends `{ name }` to the end of `object`.
pub fn append_shorthand_property(object: &mut ObjectLit, name: &str) -> Result<()> {
    validate_identifier("key", name)?;

    object
        .props
        .push(PropOrSpread::Prop(Box::new(Prop::Shorthand(Ident::new(
            name.into(),
            DUMMY_SP,
            SyntaxContext::empty(),
        )))));
    Ok(())
}

/// Splices `import <local> from '<module_path>';` into the top-level body at
/// `index`. An index past the end appends.
pub fn insert_import(module: &mut Module, index: usize, local: &str, module_path: &str) -> Result<()> {
    validate_identifier("key", local)?;

    let import = ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![ImportSpecifier::Default(ImportDefaultSpecifier {
            span: DUMMY_SP,
            local: Ident::new(local.into(), DUMMY_SP, SyntaxContext::empty()),
        })],
        src: Box::new(Str {
            span: DUMMY_SP,
            value: module_path.into(),
            raw: Some(format!("'{}'", module_path.replace('\'', "\\'")).into()),
        }),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }));

    let index = index.min(module.body.len());
    module.body.insert(index, import);
    Ok(())
}
