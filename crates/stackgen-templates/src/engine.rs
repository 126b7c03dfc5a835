//! Placeholder substitution for single files and directory trees

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    error::{Result, TemplateError},
    vars::VarTable,
};

/// Matches any placeholder-shaped token left after substitution.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{:.*?:\}\}").expect("placeholder pattern is valid"));

/// Substitute every variable into `content`.
///
/// After substitution the result is scanned for any remaining
/// placeholder-shaped token; if one is found the operation fails,
/// naming the token and `source` (the originating file, for error
/// reporting).
pub fn render_str(content: &str, vars: &VarTable, source: &str) -> Result<String> {
    let mut rendered = content.to_string();
    for (name, value) in vars.iter() {
        let token = VarTable::token(name);
        if rendered.contains(&token) {
            rendered = rendered.replace(&token, value);
        }
    }
    if let Some(found) = PLACEHOLDER.find(&rendered) {
        return Err(TemplateError::UnresolvedPlaceholder {
            token: found.as_str().to_string(),
            file: source.to_string(),
        });
    }
    Ok(rendered)
}

/// Render a single template file to `dst`.
///
/// Reads the whole source text, substitutes variables, and writes the
/// result, creating missing parent directories and overwriting an
/// existing destination. On an unresolved placeholder nothing is
/// written.
pub fn render_file(src: impl AsRef<Path>, dst: impl AsRef<Path>, vars: &VarTable) -> Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let content = fs::read_to_string(src)?;
    let rendered = render_str(&content, vars, &src.display().to_string())?;

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dst, rendered)?;
    debug!("Rendered {} -> {}", src.display(), dst.display());
    Ok(())
}

/// Recursively mirror `src_dir` into `dst_dir`, rendering every file.
///
/// Directory creation is idempotent: pre-existing destination
/// directories are reused. Entries are visited in file-name order so
/// repeated runs with identical inputs produce byte-identical trees.
/// Any error aborts the walk; files written earlier are left on disk.
pub fn render_tree(
    src_dir: impl AsRef<Path>,
    dst_dir: impl AsRef<Path>,
    vars: &VarTable,
) -> Result<()> {
    let src_dir = src_dir.as_ref();
    let dst_dir = dst_dir.as_ref();

    if !src_dir.is_dir() {
        return Err(TemplateError::NotADirectory(src_dir.to_path_buf()));
    }
    fs::create_dir_all(dst_dir)?;

    let mut entries: Vec<_> = fs::read_dir(src_dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let target = dst_dir.join(entry.file_name());
        if path.is_dir() {
            render_tree(&path, &target, vars)?;
        } else if path.is_file() {
            render_file(&path, &target, vars)?;
        }
    }
    Ok(())
}
