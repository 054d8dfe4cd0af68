//! Name and type filters: `*` is the only wildcard, every other character is literal.

use globset::{GlobBuilder, GlobMatcher};

/// Wildcard matching everything.
pub const WILDCARD: &str = "*";

/// Characters globset would otherwise read as syntax.
const GLOB_META: &[char] = &['?', '[', ']', '{', '}', ',', '\\', '!'];

/// A compiled filter. Build once and reuse it across candidates.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Glob(GlobMatcher),
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        if !pattern.contains('*') {
            return Pattern::Literal(pattern.to_string());
        }
        let glob = GlobBuilder::new(&to_glob(pattern))
            .literal_separator(false)
            .backslash_escape(true)
            .build();
        match glob {
            Ok(glob) => Pattern::Glob(glob.compile_matcher()),
            Err(e) => {
                tracing::warn!(pattern, "unusable pattern, matching literally: {}", e);
                Pattern::Literal(pattern.to_string())
            }
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Pattern::Literal(literal) => literal == candidate,
            Pattern::Glob(matcher) => matcher.is_match(candidate),
        }
    }
}

/// Returns true if `candidate` matches `pattern`, where `*` stands for zero or
/// more characters. Without `*` this is plain equality.
pub fn simple_match(pattern: &str, candidate: &str) -> bool {
    Pattern::new(pattern).is_match(candidate)
}

/// Escapes glob syntax and collapses runs of `*` so `**` never turns recursive.
fn to_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut prev_star = false;
    for ch in pattern.chars() {
        if ch == '*' {
            if !prev_star {
                out.push('*');
            }
            prev_star = true;
            continue;
        }
        prev_star = false;
        if GLOB_META.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_wildcard() {
        assert!(simple_match("*", "cassandra"));
        assert!(simple_match("*", ""));
        assert!(simple_match("**", "x"));
    }

    #[test]
    fn literal_is_equality() {
        assert!(simple_match("sink", "sink"));
        assert!(!simple_match("sink", "sinks"));
        assert!(!simple_match("", "sink"));
        assert!(simple_match("", ""));
    }

    #[test]
    fn prefix_suffix_infix() {
        assert!(simple_match("ca*", "cassandra"));
        assert!(simple_match("*andra", "cassandra"));
        assert!(simple_match("c*an*ra", "cassandra"));
        assert!(simple_match("*ss*", "cassandra"));
    }

    #[test]
    fn non_matches() {
        assert!(!simple_match("ca*", "log"));
        assert!(!simple_match("*andra", "cassandras"));
        assert!(!simple_match("c*x*ra", "cassandra"));
    }

    #[test]
    fn backtracks_over_repeated_fragments() {
        assert!(simple_match("*a*a", "banana"));
        assert!(simple_match("a*b*c", "aXbYbZc"));
        assert!(!simple_match("a*b*c", "aXbYbZ"));
    }

    #[test]
    fn other_glob_syntax_is_literal() {
        assert!(simple_match("a?*", "a?c"));
        assert!(!simple_match("a?*", "abc"));
        assert!(simple_match("[ab]*", "[ab]-sink"));
        assert!(!simple_match("[ab]*", "a-sink"));
        assert!(simple_match("{x,y}*", "{x,y}z"));
        assert!(!simple_match("{x,y}*", "xz"));
        assert!(simple_match("*\\*", "a\\b"));
    }

    #[test]
    fn star_spans_slashes() {
        assert!(simple_match("my*app", "my/nested/app"));
    }

    #[test]
    fn compiled_pattern_is_reusable() {
        let p = Pattern::new("time*");
        assert!(p.is_match("time"));
        assert!(p.is_match("timestamp"));
        assert!(!p.is_match("log"));
    }
}
