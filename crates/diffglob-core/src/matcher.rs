//! Glob matching of changed paths.
//!
//! Matching is behind the [`PathMatcher`] trait so the pipeline can be driven
//! with any predicate. [`GlobPattern`] is the shell-glob implementation used
//! by the CLI: `*` stays within a path segment, `**` crosses segments, `?`
//! matches a single character, `[...]` is a character class, `{a,b}` is an
//! alternation, and a leading `!` negates the whole pattern. Wildcards never
//! match a leading `.` in a path segment; dotfiles only match a pattern
//! segment that itself starts with a literal `.`.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::DiffglobError;

/// A compiled predicate over path strings.
pub trait PathMatcher: Send + Sync {
    fn is_match(&self, path: &str) -> bool;
}

/// Compiles a pattern string into a [`PathMatcher`].
pub type MatcherFactory = fn(&str) -> Result<Box<dyn PathMatcher>, DiffglobError>;

/// Shell-style glob pattern backed by `globset`.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    original: String,
    matcher: GlobMatcher,
    /// Per-segment view used to keep wildcards off dotfiles. `None` when the
    /// glob does not split cleanly on `/`.
    segments: Option<Vec<Segment>>,
    negated: bool,
}

#[derive(Debug, Clone)]
enum Segment {
    Globstar,
    Glob { matcher: GlobMatcher, literal_dot: bool },
}

impl GlobPattern {
    /// Compiles `pattern`.
    ///
    /// Each leading `!` flips the result, so `!!*.md` is the same as `*.md`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffglobError::InvalidPattern`] if the glob is empty or
    /// malformed.
    pub fn new(pattern: &str) -> Result<Self, DiffglobError> {
        let body = pattern.trim_start_matches('!');
        let negations = pattern.len() - body.len();

        if body.is_empty() {
            return Err(DiffglobError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: "pattern is empty".into(),
            });
        }

        let matcher = build_matcher(pattern, body)?;

        let parts = split_segments(body);
        let segments = if parts.iter().any(|part| part.contains('/')) {
            None
        } else {
            parts
                .into_iter()
                .map(|part| {
                    if part == "**" {
                        Ok(Segment::Globstar)
                    } else {
                        Ok(Segment::Glob {
                            matcher: build_matcher(pattern, part)?,
                            literal_dot: leads_with_dot(part),
                        })
                    }
                })
                .collect::<Result<Vec<_>, DiffglobError>>()
                .ok()
        };

        Ok(Self {
            original: pattern.to_string(),
            matcher,
            segments,
            negated: negations % 2 == 1,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.original
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether every dot-led segment of `path` is matched by a pattern segment
    /// that starts with a literal `.`.
    fn dots_allowed(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        if !parts.iter().any(|part| part.starts_with('.')) {
            return true;
        }
        match &self.segments {
            Some(segments) => walk(segments, &parts),
            None => true,
        }
    }
}

impl PathMatcher for GlobPattern {
    fn is_match(&self, path: &str) -> bool {
        let matched = self.matcher.is_match(path) && self.dots_allowed(path);
        matched != self.negated
    }
}

fn build_matcher(pattern: &str, glob: &str) -> Result<GlobMatcher, DiffglobError> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|e| DiffglobError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

/// Splits a glob on `/` outside of `{...}`, honoring backslash escapes.
fn split_segments(glob: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in glob.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                parts.push(&glob[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&glob[start..]);
    parts
}

/// True if the segment starts with `.`, or is an alternation with a branch
/// that does.
fn leads_with_dot(segment: &str) -> bool {
    if segment.starts_with('.') {
        return true;
    }
    match segment.strip_prefix('{') {
        Some(rest) => {
            let body = rest.split('}').next().unwrap_or_default();
            body.split(',').any(|branch| branch.starts_with('.'))
        }
        None => false,
    }
}

fn walk(segments: &[Segment], parts: &[&str]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return parts.is_empty();
    };
    match first {
        Segment::Globstar => {
            for skip in 0..=parts.len() {
                if walk(rest, &parts[skip..]) {
                    return true;
                }
                if parts.get(skip).is_some_and(|part| part.starts_with('.')) {
                    break;
                }
            }
            false
        }
        Segment::Glob {
            matcher,
            literal_dot,
        } => match parts.split_first() {
            Some((part, remaining)) => {
                (*literal_dot || !part.starts_with('.'))
                    && matcher.is_match(part)
                    && walk(rest, remaining)
            }
            None => false,
        },
    }
}

/// The default [`MatcherFactory`].
pub fn compile_glob(pattern: &str) -> Result<Box<dyn PathMatcher>, DiffglobError> {
    Ok(Box::new(GlobPattern::new(pattern)?))
}

/// Returns the paths accepted by `matcher`, in input order, duplicates kept.
pub fn filter_matches(matcher: &dyn PathMatcher, paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter(|path| matcher.is_match(path))
        .cloned()
        .collect()
}
