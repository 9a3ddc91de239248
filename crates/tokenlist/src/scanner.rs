use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, error, warn};
use serde_json::Value;

use crate::diagnostics::Diagnostic;
use crate::error::{ConfigError, Error};

/// Extension of token definition files.
pub const TOKEN_FILE_EXTENSION: &str = "json";

/// How malformed token files are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Abort on the first malformed file.
    FailFast,
    /// Scan every file, then abort if any was malformed.
    #[default]
    CollectAll,
    /// Skip malformed files with a diagnostic.
    Lenient,
}

impl FromStr for Strictness {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-fast" => Ok(Strictness::FailFast),
            "collect-all" => Ok(Strictness::CollectAll),
            "lenient" => Ok(Strictness::Lenient),
            other => Err(ConfigError::UnknownStrictness(other.to_string())),
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strictness::FailFast => "fail-fast",
            Strictness::CollectAll => "collect-all",
            Strictness::Lenient => "lenient",
        })
    }
}

/// One parsed token file: its file name and raw records in order.
#[derive(Debug, Clone)]
pub struct TokenFile {
    pub name: String,
    pub path: PathBuf,
    pub records: Vec<Value>,
}

/// Result of scanning the tokens directory.
#[derive(Debug, Default)]
pub struct Scan {
    pub files: Vec<TokenFile>,
    pub diagnostics: Vec<Diagnostic>,
}

/// List token files in `dir`, sorted by file name.
pub fn list_token_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::TokensDirMissing(dir.to_path_buf()));
    }
    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && has_token_extension(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_token_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TOKEN_FILE_EXTENSION))
}

/// Read and parse every token file in `dir`.
pub fn scan(dir: &Path, strictness: Strictness) -> Result<Scan, Error> {
    let mut scan = Scan::default();
    let mut malformed = Vec::new();

    for path in list_token_files(dir)? {
        let name = file_label(&path);
        let raw = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        match parse_records(&name, &raw) {
            Ok(records) => {
                debug!("{name}: {} record(s)", records.len());
                scan.files.push(TokenFile {
                    name,
                    path,
                    records,
                });
            }
            Err(reason) => match strictness {
                Strictness::FailFast => {
                    return Err(Error::MalformedFile { path, reason });
                }
                Strictness::CollectAll => {
                    error!("{name} is malformed: {reason}");
                    malformed.push(path);
                }
                Strictness::Lenient => {
                    let diagnostic = Diagnostic::MalformedFile { file: name, reason };
                    warn!("{diagnostic}");
                    scan.diagnostics.push(diagnostic);
                }
            },
        }
    }

    if !malformed.is_empty() {
        return Err(Error::MalformedFiles(malformed));
    }
    Ok(scan)
}

/// Parse a token file body: a JSON array of records. Valid JSON with any
/// other top level yields no records; only a parse failure is an error.
pub fn parse_records(name: &str, raw: &str) -> Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => {
            warn!("{name} is not a JSON array, no tokens taken from it");
            Ok(Vec::new())
        }
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_lists_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "polygon.json", "[]");
        write(dir.path(), "arbitrum.json", "[]");
        write(dir.path(), "README.md", "notes");
        write(dir.path(), "base.JSON", "[]");
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names: Vec<String> = list_token_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_label(p))
            .collect();
        assert_eq!(names, ["arbitrum.json", "base.JSON", "polygon.json"]);
    }

    #[test]
    fn test_missing_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tokens");
        assert!(matches!(
            list_token_files(&missing),
            Err(Error::TokensDirMissing(_))
        ));

        let file = dir.path().join("tokens.json");
        fs::write(&file, "[]").unwrap();
        assert!(matches!(scan(&file, Strictness::Lenient), Err(Error::TokensDirMissing(_))));
    }

    #[test]
    fn test_scan_keeps_record_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"[{"n": 3}]"#);
        write(dir.path(), "a.json", r#"[{"n": 1}, {"n": 2}]"#);

        let scan = scan(dir.path(), Strictness::CollectAll).unwrap();
        let ns: Vec<u64> = scan
            .files
            .iter()
            .flat_map(|f| f.records.iter())
            .map(|r| r["n"].as_u64().unwrap())
            .collect();
        assert_eq!(ns, [1, 2, 3]);
        assert!(scan.diagnostics.is_empty());
    }

    #[test]
    fn test_fail_fast_stops_at_first_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", "{ nope");
        write(dir.path(), "b.json", "{ nope");

        match scan(dir.path(), Strictness::FailFast) {
            Err(Error::MalformedFile { path, .. }) => {
                assert_eq!(file_label(&path), "a.json");
            }
            other => panic!("expected MalformedFile, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_all_reports_every_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", "{ nope");
        write(dir.path(), "b.json", "[]");
        write(dir.path(), "c.json", "[1,");

        match scan(dir.path(), Strictness::CollectAll) {
            Err(Error::MalformedFiles(paths)) => {
                let names: Vec<String> = paths.iter().map(|p| file_label(p)).collect();
                assert_eq!(names, ["a.json", "c.json"]);
            }
            other => panic!("expected MalformedFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_non_array_file_has_no_records() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", r#"[{"n": 1}]"#);
        write(dir.path(), "b.json", r#"{"note": "wip"}"#);

        let scan = scan(dir.path(), Strictness::CollectAll).unwrap();
        assert_eq!(scan.files.len(), 2);
        assert!(scan.files[1].records.is_empty());
        assert!(scan.diagnostics.is_empty());
        assert!(parse_records("x.json", "null").unwrap().is_empty());
    }

    #[test]
    fn test_lenient_skips_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", "{ nope");
        write(dir.path(), "b.json", r#"[{"n": 1}]"#);

        let scan = scan(dir.path(), Strictness::Lenient).unwrap();
        assert_eq!(scan.files.len(), 1);
        assert_eq!(scan.files[0].name, "b.json");
        assert!(matches!(
            &scan.diagnostics[..],
            [Diagnostic::MalformedFile { file, .. }] if file == "a.json"
        ));
    }

    #[test]
    fn test_strictness_from_str() {
        assert_eq!("fail-fast".parse::<Strictness>().unwrap(), Strictness::FailFast);
        assert_eq!("lenient".parse::<Strictness>().unwrap(), Strictness::Lenient);
        assert!("strict".parse::<Strictness>().is_err());
        assert_eq!(Strictness::default().to_string(), "collect-all");
    }
}
