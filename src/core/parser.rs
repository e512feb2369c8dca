//! ECMAScript module and expression parsing on top of swc.
//!
//! A [`SourceModule`] owns the source map its tree was parsed into. Fragments
//! parsed later for the same module are registered in that same map so spans
//! never point into a map the generator does not know about.

use crate::utils::error::{PatchError, Result};
use swc_core::common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_core::ecma::ast::{Expr, Module, ModuleItem, Stmt};
use swc_core::ecma::parser::{error::Error as ParserError, Parser, StringInput, Syntax};

pub struct SourceModule {
    pub cm: Lrc<SourceMap>,
    pub ast: Module,
}

impl std::fmt::Debug for SourceModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceModule")
            .field("items", &self.ast.body.len())
            .finish()
    }
}

fn syntax() -> Syntax {
    Syntax::Es(Default::default())
}

fn syntax_error(cm: &SourceMap, origin: &str, err: ParserError) -> PatchError {
    let loc = cm.lookup_char_pos(err.span().lo);
    PatchError::Parse {
        origin: origin.to_string(),
        message: format!(
            "{} (line {}, column {})",
            err.kind().msg(),
            loc.line,
            loc.col_display + 1
        ),
    }
}

/// Parses `text` as an ES module. `label` names the source in diagnostics.
pub fn parse_module(label: &str, text: &str) -> Result<SourceModule> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Custom(label.to_string()).into(), text.to_string());

    let mut parser = Parser::new(syntax(), StringInput::from(&*fm), None);
    let ast = parser
        .parse_module()
        .map_err(|err| syntax_error(&cm, label, err))?;

    // Recovered errors still mean the input was not valid source.
    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(syntax_error(&cm, label, err));
    }

    Ok(SourceModule { cm, ast })
}

/// Whether `rest` holds nothing but whitespace, comments and empty statements.
fn is_blank_tail(rest: &str) -> bool {
    if rest.trim().is_empty() {
        return true;
    }

    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), rest.to_string());
    let mut parser = Parser::new(syntax(), StringInput::from(&*fm), None);
    match parser.parse_module() {
        Ok(tail) => {
            parser.take_errors().is_empty()
                && tail
                    .body
                    .iter()
                    .all(|item| matches!(item, ModuleItem::Stmt(Stmt::Empty(_))))
        }
        Err(_) => false,
    }
}

/// Parses `text` as a single standalone expression inside `cm`.
///
/// The whole input must be consumed. Whitespace, comments and a trailing `;`
/// may follow the expression; anything else is rejected.
pub fn parse_expression(cm: &Lrc<SourceMap>, origin: &str, text: &str) -> Result<Box<Expr>> {
    let fm = cm.new_source_file(FileName::Custom(origin.to_string()).into(), text.to_string());

    let mut parser = Parser::new(syntax(), StringInput::from(&*fm), None);
    let expr = parser
        .parse_expr()
        .map_err(|err| syntax_error(cm, origin, err))?;

    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(syntax_error(cm, origin, err));
    }

    let consumed = (expr.span_hi() - fm.start_pos).0 as usize;
    let rest = text.get(consumed..).unwrap_or_default();
    if !is_blank_tail(rest) {
        return Err(PatchError::Parse {
            origin: origin.to_string(),
            message: format!("unexpected input after expression: `{}`", rest.trim()),
        });
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use swc_core::ecma::ast::ModuleDecl;

    #[test]
    fn test_parse_module_statements() {
        let module = parse_module(
            "index.js",
            "import users from './users';\nconst rootReducer = combineReducers({ users });\nexport default rootReducer;\n",
        )
        .unwrap();

        assert_eq!(module.ast.body.len(), 3);
        assert!(matches!(
            module.ast.body[0],
            ModuleItem::ModuleDecl(ModuleDecl::Import(_))
        ));
        assert!(matches!(
            module.ast.body[2],
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(_))
        ));
    }

    #[test]
    fn test_parse_module_rejects_malformed_source() {
        let err = parse_module("broken.js", "const initialState = { users: ;").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            PatchError::Parse { origin, message } => {
                assert_eq!(origin, "broken.js");
                assert!(message.contains("line 1"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_expression_literals() {
        let cm: Lrc<SourceMap> = Default::default();

        assert!(matches!(*parse_expression(&cm, "value", "{}").unwrap(), Expr::Object(_)));
        assert!(matches!(*parse_expression(&cm, "value", "[]").unwrap(), Expr::Array(_)));
        assert!(matches!(*parse_expression(&cm, "value", " null ").unwrap(), Expr::Lit(_)));
        assert!(matches!(
            *parse_expression(&cm, "value", "{ byId: {}, ids: [] };").unwrap(),
            Expr::Object(_)
        ));
    }

    #[test]
    fn test_parse_expression_rejects_empty_input() {
        let cm: Lrc<SourceMap> = Default::default();
        let err = parse_expression(&cm, "value", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_parse_expression_rejects_trailing_input() {
        let cm: Lrc<SourceMap> = Default::default();
        let err = parse_expression(&cm, "value", "{} extra").unwrap_err();

        match err {
            PatchError::Parse { message, .. } => assert!(message.contains("extra"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_expression_allows_trailing_comments() {
        let cm: Lrc<SourceMap> = Default::default();

        assert!(matches!(
            *parse_expression(&cm, "value", "{} /* empty */").unwrap(),
            Expr::Object(_)
        ));
        assert!(matches!(
            *parse_expression(&cm, "value", "[]; // none yet\n").unwrap(),
            Expr::Array(_)
        ));
    }

    #[test]
    fn test_parse_expression_rejects_statement_after_comment() {
        let cm: Lrc<SourceMap> = Default::default();
        let err = parse_expression(&cm, "value", "{} /* c */ extra").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_fragments_share_the_module_source_map() {
        let module = parse_module("initialState.js", "const initialState = {};").unwrap();
        let before = module.cm.files().len();

        parse_expression(&module.cm, "value", "[]").unwrap();

        assert_eq!(module.cm.files().len(), before + 1);
    }
}
