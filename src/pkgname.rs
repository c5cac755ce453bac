//! Package name normalization
//!
//! PEP 503: names compare case-insensitively with runs of `-`, `_`,
//! and `.` collapsed to a single `-`. Extras (`package[extra]`) are
//! stripped before normalizing.

/// Canonicalize a package name per PEP 503
pub fn canonicalize(name: &str) -> String {
    let base = name.split('[').next().unwrap_or(name);
    let mut out = String::with_capacity(base.len());
    let mut prev_sep = false;
    for c in base.trim().chars() {
        if c == '-' || c == '_' || c == '.' {
            if !prev_sep && !out.is_empty() {
                out.push('-');
            }
            prev_sep = true;
        } else {
            out.push(c.to_ascii_lowercase());
            prev_sep = false;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Split a pinned requirement line into (name, specifier).
///
/// `"fastapi==1.0"` becomes `("fastapi", "==1.0")`. Lines without a
/// version operator yield an empty specifier.
pub fn split_requirement(line: &str) -> (String, String) {
    let line = line.trim();
    for (i, c) in line.char_indices() {
        if matches!(c, '=' | '<' | '>' | '!' | '~') {
            return (line[..i].trim().to_string(), line[i..].trim().to_string());
        }
    }
    (line.to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_lowercases() {
        assert_eq!(canonicalize("FastAPI"), "fastapi");
    }

    #[test]
    fn canonicalize_collapses_separators() {
        assert_eq!(canonicalize("zope.interface"), "zope-interface");
        assert_eq!(canonicalize("my__pkg--name"), "my-pkg-name");
    }

    #[test]
    fn canonicalize_strips_extras() {
        assert_eq!(canonicalize("uvicorn[standard]"), "uvicorn");
    }

    #[test]
    fn split_requirement_pinned() {
        let (name, spec) = split_requirement("fastapi==1.0");
        assert_eq!(name, "fastapi");
        assert_eq!(spec, "==1.0");
    }

    #[test]
    fn split_requirement_range() {
        let (name, spec) = split_requirement("requests>=2.25.0");
        assert_eq!(name, "requests");
        assert_eq!(spec, ">=2.25.0");
    }

    #[test]
    fn split_requirement_bare() {
        let (name, spec) = split_requirement("packaging");
        assert_eq!(name, "packaging");
        assert_eq!(spec, "");
    }
}
