use std::fs;
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::types::token_list::TokenList;

/// Render the artifact as pretty-printed JSON with a trailing newline.
pub fn render(list: &TokenList) -> Result<String, Error> {
    let mut out = list.to_json()?;
    out.push('\n');
    Ok(out)
}

/// Write the artifact, overwriting any existing file.
pub fn write_token_list(path: &Path, list: &TokenList) -> Result<(), Error> {
    let body = render(list)?;
    fs::write(path, body).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
