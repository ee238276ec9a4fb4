//! Pattern file loading.
//!
//! A pattern file holds one JSONPath per line. Blank lines and lines whose
//! first non-blank character is `#` are skipped. Files ending in `.gz` are
//! decompressed transparently.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::matching::MatchingSet;
use crate::path::JsonPath;

/// Loads and parses a pattern file from the filesystem.
///
/// # Arguments
///
/// * `path` - The path to the pattern file to load
///
/// # Examples
///
/// ```no_run
/// use pathquill::file::loader::load_patterns;
///
/// let patterns = load_patterns("patterns.txt").unwrap();
/// println!("{} patterns", patterns.len());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read or decompressed
/// - A line is not a valid JSONPath (the error names the line)
pub fn load_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<JsonPath>> {
    let path_ref = path.as_ref();

    // Check if file is gzipped
    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read {}", path_ref.display()))?
    };

    let patterns = parse_patterns(&content)
        .with_context(|| format!("Failed to load patterns from {}", path_ref.display()))?;
    debug!(
        "Loaded {} patterns from {} (gzip: {})",
        patterns.len(),
        path_ref.display(),
        is_gzipped
    );
    Ok(patterns)
}

/// Loads patterns from standard input, gunzipping when the input starts
/// with the gzip magic bytes.
pub fn load_patterns_from_stdin() -> Result<Vec<JsonPath>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_patterns(&content).context("Failed to load patterns from stdin")
}

/// Parses pattern file content.
///
/// Surrounding whitespace is trimmed from every line.
pub fn parse_patterns(content: &str) -> Result<Vec<JsonPath>> {
    let mut patterns = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let pattern: JsonPath = line
            .parse()
            .with_context(|| format!("Invalid pattern on line {}: {}", line_num + 1, line))?;
        patterns.push(pattern);
    }

    Ok(patterns)
}

/// Builds a matching set from `patterns`, normalizing each first when
/// `normalize` is set. Duplicates are skipped with a warning.
pub fn build_matching_set<I>(patterns: I, normalize: bool) -> MatchingSet<JsonPath>
where
    I: IntoIterator<Item = JsonPath>,
{
    let mut set = MatchingSet::new();
    for pattern in patterns {
        let pattern = if normalize {
            pattern.normalized()
        } else {
            pattern
        };
        let text = pattern.to_string();
        if !set.insert(pattern) {
            warn!("Skipping duplicate pattern {}", text);
        }
    }
    set
}

/// Loads a pattern file straight into a matching set.
pub fn load_matching_set<P: AsRef<Path>>(path: P, normalize: bool) -> Result<MatchingSet<JsonPath>> {
    let patterns = load_patterns(path)?;
    Ok(build_matching_set(patterns, normalize))
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open gzipped file {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
