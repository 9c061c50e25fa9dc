//! Header generation: parsed comps → rendered text → output file.
//!
//! Rendering is delegated to a [`Render`] implementation. The generator
//! only moves records into it and writes what comes back.

pub mod template;

pub use template::HandlebarsRenderer;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::dsl::{Comp, Compiler};
use crate::error::Error;

/// Failure reported by a renderer.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a renderer gets for one output file.
#[derive(Debug, Clone, Copy)]
pub struct RenderUnit<'a> {
    /// Schema source the comps came from, relative to the input root.
    pub source: &'a Path,
    /// Comps in source order.
    pub comps: &'a [Comp],
}

/// Turns an ordered list of comps into output text.
///
/// Implementations must be deterministic: the same unit renders to the same text.
pub trait Render {
    fn render(&self, unit: RenderUnit<'_>) -> Result<String, RenderError>;
}

pub struct Generator<R> {
    renderer: R,
}

impl<R: Render> Generator<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Compile `inpath` and write the rendered result to `outpath`.
    ///
    /// `source` is the name passed to the renderer. Nothing is written unless
    /// parsing and rendering both succeed. Returns the number of comps.
    pub fn generate_file(
        &self,
        inpath: &Path,
        outpath: &Path,
        source: &Path,
    ) -> Result<usize, Error> {
        let text = std::fs::read_to_string(inpath).map_err(Error::io(inpath))?;

        let mut comps = Vec::new();
        for comp in Compiler::parse(&text) {
            let comp = comp.map_err(|error| Error::Compile {
                path: inpath.to_path_buf(),
                error,
            })?;
            tracing::debug!(comp = %comp.name, fields = comp.fields.len(), "parsed comp");
            comps.push(comp);
        }

        let rendered = self
            .renderer
            .render(RenderUnit {
                source,
                comps: &comps,
            })
            .map_err(|source| Error::Render {
                path: outpath.to_path_buf(),
                source,
            })?;

        write_atomic(outpath, &rendered)?;
        Ok(comps.len())
    }
}

/// Write `contents` to a temporary file next to `path`, then move it into place.
fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(Error::io(dir))?;
    file.write_all(contents.as_bytes()).map_err(Error::io(file.path()))?;
    file.persist(path).map_err(|e| Error::io(path)(e.error))?;
    Ok(())
}
