use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Whether a file should be parsed with JSX enabled.
///
/// Plain `.ts` files are parsed without it so that generic arrow functions
/// (`<T,>(x: T) => x`) and type assertions (`<T>x`) keep working.
pub fn is_jsx_file(file_path: &str) -> bool {
    !(file_path.ends_with(".ts") || file_path.ends_with(".mts") || file_path.ends_with(".cts"))
}

/// Parse JS/TS/JSX/TSX source code into an AST.
///
/// Each call gets its own `SourceMap`, so files can be parsed on separate
/// threads.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    let source_map = Arc::new(SourceMap::default());

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: is_jsx_file(file_path),
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedSource {
            module,
            source_map: source_map.clone(),
        })
    })
}
