use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::CliError;

/// Source text from `--source`, a file, or stdin when the path is `-`.
pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<String, CliError> {
    if let Some(text) = text {
        return Ok(text.to_owned());
    }

    let Some(path) = path else {
        return Err(CliError::MissingSource);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(CliError::Stdin)?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
