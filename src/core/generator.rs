use crate::core::parser::SourceModule;
use crate::utils::error::{PatchError, Result};
use swc_core::ecma::codegen::{text_writer::JsWriter, Config, Emitter};

/// Emits source text for the module. Output is deterministic for a given
/// tree; comments are not carried over.
pub fn generate(module: &SourceModule) -> Result<String> {
    let mut buf = Vec::new();
    {
        let wr = JsWriter::new(module.cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: Config::default(),
            cm: module.cm.clone(),
            comments: None,
            wr,
        };
        emitter.emit_module(&module.ast)?;
    }

    String::from_utf8(buf).map_err(|e| {
        PatchError::Codegen(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
