use amzn_schema::File;
use tracing::{debug, warn};

use crate::{
    error::{GenError, Result},
    templates::DispatchTable,
    types::{Artifact, OutputBuffer},
    visitor::Dispatcher,
};

/// Marker extension every generated file ends with.
pub const OUTPUT_EXTENSION: &str = ".amzn.go";

/// Derives the generated file's path from the input path: same directory and
/// base name, trailing extension replaced by [`OUTPUT_EXTENSION`].
///
/// A path without an extension (or a dotfile such as `.proto`) gets the
/// marker appended. Applying the rule again to its own output is not a no-op:
/// `a.amzn.go` becomes `a.amzn.amzn.go`.
pub fn output_path(input: &str) -> String {
    let base_start = input.rfind('/').map_or(0, |i| i + 1);
    let base = &input[base_start..];
    let stem_len = match base.rfind('.') {
        Some(0) | None => base.len(),
        Some(i) => i,
    };
    format!("{}{}", &input[..base_start + stem_len], OUTPUT_EXTENSION)
}

/// Renders one file into a fresh buffer and pairs the text with its output
/// path. Errors are tagged with the file's name and no artifact is produced.
pub fn emit(file: &File, table: &DispatchTable) -> Result<Artifact> {
    let mut out = OutputBuffer::new();

    if let Err(err) = Dispatcher::new(table).walk_file(file, &mut out) {
        warn!(file = %file.name, error = %err, "aborting file");
        return Err(GenError::File {
            file:   file.name.clone(),
            source: Box::new(err),
        });
    }

    let path = output_path(&file.name);
    debug!(file = %file.name, %path, bytes = out.len(), "emitted");
    Ok(Artifact::new(path, out.into_string()))
}
