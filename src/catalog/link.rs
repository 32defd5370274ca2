//! Relative links between versions of the rendered output tree
//!
//! Every version is rendered into its own output directory, and each version
//! mirrors the docname layout (`<root>/appendix/faq.html`). The version roots
//! come from the `outputdir` of both records; when a record is unknown the
//! ref name is used instead (`build/html/<version>/`), with names containing
//! `/` becoming nested directories. Links are URL paths joined with `/`.

use std::path::{Component, Path};

/// Split a logical path on `/`, dropping empty and `.` segments
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// Number of directories a docname is nested in.
///
/// Examples:
/// - "testpage" -> 0
/// - "appendix/faq" -> 1
pub fn page_depth(docname: &str) -> usize {
    segments(docname).count().saturating_sub(1)
}

/// Last segment of a docname ("appendix/faq" -> "faq")
pub fn page_basename(docname: &str) -> &str {
    segments(docname).last().unwrap_or("")
}

/// Version roots of two output directories, relative to their deepest
/// shared ancestor, as `/`-joined segments.
///
/// Examples:
/// - "/build/html/latest", "/build/html/0.1.0" -> ("latest", "0.1.0")
/// - "/build/html/master", "/build/html/feature/x" -> ("master", "feature/x")
pub fn output_roots(from_outputdir: &Path, to_outputdir: &Path) -> (String, String) {
    let from: Vec<Component<'_>> = from_outputdir
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to: Vec<Component<'_>> = to_outputdir
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let shared = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    (join_components(&from[shared..]), join_components(&to[shared..]))
}

fn join_components(components: &[Component<'_>]) -> String {
    components
        .iter()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the link from `current_page` rendered in `from_version` to
/// `target_docname` rendered in `to_version`.
///
/// `from_version` and `to_version` are the version roots as `/`-separated
/// paths. Walks up from the directory holding the current page to the
/// deepest directory shared with the target version root, then down into it.
pub fn relative_link(
    from_version: &str,
    current_page: &str,
    to_version: &str,
    target_docname: &str,
    suffix: &str,
) -> String {
    let depth = page_depth(current_page);
    let from_dir: Vec<&str> = segments(from_version)
        .chain(segments(current_page).take(depth))
        .collect();
    let to_root: Vec<&str> = segments(to_version).collect();

    let shared = from_dir
        .iter()
        .zip(&to_root)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = std::iter::repeat_n("..", from_dir.len() - shared).collect();
    parts.extend(&to_root[shared..]);
    parts.extend(segments(target_docname));

    let mut link = parts.join("/");
    link.push_str(suffix);
    link
}
