use swc_core::ecma::ast::{ModuleDecl, ModuleItem, ObjectLit, Prop, PropName, PropOrSpread};

/// Property names in declaration order; shorthand entries are reported by name.
pub fn property_keys(object: &ObjectLit) -> Vec<String> {
    object
        .props
        .iter()
        .map(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::Shorthand(ident) => ident.sym.to_string(),
                Prop::KeyValue(kv) => match &kv.key {
                    PropName::Ident(ident) => ident.sym.to_string(),
                    PropName::Str(s) => s.value.to_string(),
                    _ => "<computed>".to_string(),
                },
                _ => "<method>".to_string(),
            },
            PropOrSpread::Spread(_) => "...".to_string(),
        })
        .collect()
}

/// Source of every import declaration, in statement order.
pub fn import_sources(body: &[ModuleItem]) -> Vec<String> {
    body.iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import.src.value.to_string()),
            _ => None,
        })
        .collect()
}
