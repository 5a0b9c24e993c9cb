//! Handlebars rendering against the [`Options`](crate::bundler::settings::Options) data model.

use crate::bundler::error::Result;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How substituted values are escaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Escape {
    /// HTML/XML entity escaping, for markup documents.
    Markup,
    /// Values are inserted verbatim, for paths and plain text.
    None,
}

/// Renders `template` with `data` in strict mode.
///
/// Unknown variables are errors rather than empty strings.
pub fn render<T: Serialize>(template: &str, data: &T, escape: Escape) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    if escape == Escape::None {
        handlebars.register_escape_fn(handlebars::no_escape);
    }
    Ok(handlebars.render_template(template, data)?)
}

/// Substitutes Options fields into a path produced by a rename policy.
///
/// Each segment between separators is rendered on its own, so a Windows `\`
/// directly before `{{` is kept as a separator instead of escaping the
/// expression. Paths without `{{` are returned as-is.
pub fn render_path<T: Serialize>(path: &Path, data: &T) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    if !raw.contains("{{") {
        return Ok(path.to_path_buf());
    }

    let is_separator = |c: char| c == '/' || c == '\\';
    let mut rendered = String::with_capacity(raw.len());
    for segment in raw.split_inclusive(is_separator) {
        let body = segment.trim_end_matches(is_separator);
        if body.contains("{{") {
            rendered.push_str(&render(body, data, Escape::None)?);
        } else {
            rendered.push_str(body);
        }
        rendered.push_str(&segment[body.len()..]);
    }
    Ok(PathBuf::from(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markup_escaping() {
        let out = render("<d>{{text}}</d>", &json!({"text": "a & <b>"}), Escape::Markup)
            .expect("render");
        assert_eq!(out, "<d>a &amp; &lt;b&gt;</d>");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_fields() {
        assert!(render("{{missing}}", &json!({}), Escape::None).is_err());
    }

    #[test]
    fn test_render_path_substitutes_fields() {
        let data = json!({"name": "footest", "version": "0.0.1"});
        let path = render_path(Path::new("/out/{{name}}-{{version}}-setup.exe"), &data)
            .expect("render");
        assert_eq!(path, PathBuf::from("/out/footest-0.0.1-setup.exe"));
    }

    #[test]
    fn test_render_path_passthrough() {
        let path = render_path(Path::new("/out/RELEASES"), &json!({})).expect("render");
        assert_eq!(path, PathBuf::from("/out/RELEASES"));
    }

    #[test]
    fn test_render_path_with_backslash_separators() {
        let data = json!({"name": "footest", "version": "0.0.1"});
        let path = render_path(Path::new(r"C:\out\{{name}}-{{version}}-setup.exe"), &data)
            .expect("render");
        assert_eq!(path, PathBuf::from(r"C:\out\footest-0.0.1-setup.exe"));
    }

    #[test]
    fn test_render_path_templated_directory() {
        let data = json!({"name": "footest", "version": "0.0.1"});
        let path = render_path(Path::new("/out/{{version}}/{{name}}.nupkg"), &data)
            .expect("render");
        assert_eq!(path, PathBuf::from("/out/0.0.1/footest.nupkg"));
    }
}
