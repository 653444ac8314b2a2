//! Path and URI helpers shared by the builders.

use std::path::PathBuf;

/// Convert a `/`-separated document name to a native relative path.
///
/// ```
/// use std::path::Path;
/// use folio_builder::os_path;
///
/// assert_eq!(os_path("guide/intro"), Path::new("guide").join("intro"));
/// ```
pub fn os_path(docname: &str) -> PathBuf {
    docname.split('/').collect()
}

/// Compute the link from the page at target URI `base` to target URI `to`.
///
/// Leading segments both URIs share are dropped (the last segment of each is
/// never considered shared), then one `../` is emitted per remaining directory
/// of `base`. Identical URIs give an empty link; a top-level page linking to
/// the root gives `./`. Fragments on `base` are ignored, absolute targets are
/// returned unchanged.
///
/// ```
/// use folio_builder::relative_uri;
///
/// assert_eq!(relative_uri("guide/intro/", "guide/"), "../");
/// assert_eq!(relative_uri("", "guide/"), "guide/");
/// assert_eq!(relative_uri("a/b.html", "a/c.html"), "c.html");
/// ```
pub fn relative_uri(base: &str, to: &str) -> String {
    if to.starts_with('/') {
        return to.to_owned();
    }
    let base_path = base.split('#').next().unwrap_or(base);
    let (to_path, fragment) = match to.split_once('#') {
        Some((path, frag)) => (path, Some(frag)),
        None => (to, None),
    };

    let b: Vec<&str> = base_path.split('/').collect();
    let t: Vec<&str> = to_path.split('/').collect();

    let common = b[..b.len() - 1]
        .iter()
        .zip(&t[..t.len() - 1])
        .take_while(|(x, y)| x == y)
        .count();
    let (b, t) = (&b[common..], &t[common..]);

    let path = if b == t {
        String::new()
    } else if b.len() == 1 && t == [""] {
        "./".to_owned()
    } else {
        format!("{}{}", "../".repeat(b.len() - 1), t.join("/"))
    };

    match fragment {
        Some(frag) => format!("{path}#{frag}"),
        None => path,
    }
}
