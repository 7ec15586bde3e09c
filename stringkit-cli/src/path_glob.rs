use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use stringkit::{FileTypeParser, StringsFileParser};

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

// Extract a static directory prefix before the first glob meta-character
fn static_prefix_dir(pattern: &str) -> PathBuf {
    let idx = pattern
        .bytes()
        .position(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
        .unwrap_or(pattern.len());
    let p = Path::new(&pattern[..idx]);
    if p.is_dir() {
        p.to_path_buf()
    } else {
        p.parent()
            .filter(|pp| !pp.as_os_str().is_empty())
            .map(|pp| pp.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// All files under `root`, honoring `.gitignore`.
fn walk_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .hidden(false)
        .ignore(true)
        .parents(true)
        .build();

    walker
        .filter_map(Result::ok)
        .filter(|dent| dent.file_type().is_some_and(|t| t.is_file()))
        .map(|dent| dent.into_path())
        .collect()
}

/// Expand the CLI inputs into concrete catalog paths.
///
/// - Glob patterns are matched against every file under their static prefix.
/// - Directories contribute every `.strings` file below them.
/// - Anything else is taken as a literal path, even if it does not exist, so
///   that the parse step reports it.
///
/// A glob that matches nothing is kept as-is for the same reason.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut literals = Vec::new();
    let mut dirs = Vec::new();
    let mut patterns = Vec::new();
    for input in inputs {
        if has_glob_meta(input) {
            patterns.push(input.as_str());
        } else if Path::new(input).is_dir() {
            dirs.push(PathBuf::from(input));
        } else {
            literals.push(PathBuf::from(input));
        }
    }

    // Build one GlobSet for all patterns (literal_separator to avoid '/' matching)
    let mut builder = GlobSetBuilder::new();
    for pat in &patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .map_err(|e| format!("Invalid glob pattern '{}': {}", pat, e))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|e| format!("Failed to build glob set: {}", e))?;

    // Collect unique roots to minimize directory walks
    let mut roots: Vec<PathBuf> = Vec::new();
    for pat in &patterns {
        let root = static_prefix_dir(pat);
        if !roots.contains(&root) {
            roots.push(root);
        }
    }

    let matched: Vec<PathBuf> = roots
        .par_iter()
        .map(|root| {
            walk_files(root)
                .into_iter()
                .filter(|path| {
                    // Walking "." yields "./x"; patterns are written without it.
                    let candidate = path.strip_prefix(".").unwrap_or(path);
                    set.is_match(candidate)
                })
                .collect::<Vec<_>>()
        })
        .flatten()
        .collect();

    let from_dirs: Vec<PathBuf> = dirs
        .par_iter()
        .map(|dir| {
            let mut files = walk_files(dir)
                .into_iter()
                .filter(|path| StringsFileParser::supports(path))
                .collect::<Vec<_>>();
            files.sort();
            files
        })
        .flatten()
        .collect();

    let mut collected = literals;
    if !patterns.is_empty() && matched.is_empty() {
        collected.extend(patterns.iter().map(PathBuf::from));
    }
    collected.extend(matched);
    collected.extend(from_dirs);

    // Deduplicate while preserving order
    let mut seen: HashSet<PathBuf> = HashSet::new();
    collected.retain(|path| seen.insert(path.clone()));
    Ok(collected)
}
