//! YAML frontmatter on markdown files.
//!
//! A content file looks like
//!
//! ```text
//! ---
//! title: Night Drive
//! duration: '3:41'
//! ---
//! Free-form markdown body.
//! ```
//!
//! Parsing is forgiving: a file without a frontmatter block, or with YAML
//! that does not describe a mapping, is read as body text only.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

pub type Frontmatter = Mapping;

const DELIMITER: &str = "---";

/// Split `content` into its frontmatter mapping and trimmed body.
pub fn parse(content: &str) -> (Frontmatter, String) {
    let degraded = || (Frontmatter::new(), content.to_string());

    let Some(rest) = content.strip_prefix(DELIMITER) else {
        return degraded();
    };
    let Some(end) = rest.find(DELIMITER) else {
        return degraded();
    };

    let yaml = &rest[..end];
    let body = rest[end + DELIMITER.len()..].trim().to_string();

    if yaml.trim().is_empty() {
        return (Frontmatter::new(), body);
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => (map, body),
        Ok(Value::Null) => (Frontmatter::new(), body),
        Ok(other) => {
            tracing::warn!("frontmatter is not a mapping ({other:?}); reading file as body");
            degraded()
        }
        Err(e) => {
            tracing::warn!("YAML parse error: {e}");
            degraded()
        }
    }
}

/// Render a frontmatter block followed by `body`.
pub fn render(frontmatter: &Frontmatter, body: &str) -> Result<String> {
    let yaml = if frontmatter.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(frontmatter)?
    };

    let mut out = format!("{DELIMITER}\n{yaml}{DELIMITER}\n");
    let body = body.trim();
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    Ok(out)
}

/// Read a markdown file. A missing file reads as empty frontmatter and body.
pub fn read_md_file(path: &Path) -> Result<(Frontmatter, String)> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok((Frontmatter::new(), String::new())),
        Err(e) => Err(Error::io(path, e)),
    }
}

pub fn write_md_file(path: &Path, frontmatter: &Frontmatter, body: &str) -> Result<()> {
    let content = render(frontmatter, body)?;
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Store `value` under `key` unless the file already has a non-empty value
/// there. Returns whether the file changed.
pub fn set_field_if_absent(path: &Path, key: &str, value: &str) -> Result<bool> {
    let (mut frontmatter, body) = read_md_file(path)?;
    if has_value(&frontmatter, key) {
        return Ok(false);
    }
    frontmatter.insert(Value::from(key), Value::from(value));
    write_md_file(path, &frontmatter, &body)?;
    Ok(true)
}

/// Replace the value under `key`. Returns the previous value when the file
/// changed, `None` when it already held `value`.
pub fn update_field(path: &Path, key: &str, value: &str) -> Result<Option<String>> {
    let (mut frontmatter, body) = read_md_file(path)?;
    let old = get_string(&frontmatter, key).unwrap_or_default();
    if old == value {
        return Ok(None);
    }
    frontmatter.insert(Value::from(key), Value::from(value));
    write_md_file(path, &frontmatter, &body)?;
    Ok(Some(old))
}

/// Whether `key` holds something other than null, `false`, `""` or an empty
/// collection.
pub fn has_value(frontmatter: &Frontmatter, key: &str) -> bool {
    match frontmatter.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Sequence(s)) => !s.is_empty(),
        Some(Value::Mapping(m)) => !m.is_empty(),
        Some(_) => true,
    }
}

/// Scalar value under `key` as a string. Collections and null read as `None`.
pub fn get_string(frontmatter: &Frontmatter, key: &str) -> Option<String> {
    frontmatter.get(key).and_then(scalar_to_string)
}

/// Like [`get_string`] but treats blank strings as missing.
pub fn get_non_empty(frontmatter: &Frontmatter, key: &str) -> Option<String> {
    get_string(frontmatter, key).filter(|s| !s.trim().is_empty())
}

/// A list-valued key. A lone scalar is read as a one-element list.
pub fn get_list(frontmatter: &Frontmatter, key: &str) -> Vec<String> {
    match frontmatter.get(key) {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(v) => scalar_to_string(v)
            .filter(|s| !s.trim().is_empty())
            .into_iter()
            .collect(),
        None => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests;
