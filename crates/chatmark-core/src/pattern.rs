use regex::Regex;

/// Compiles a pattern used by one of the rewrite stages.
///
/// A pattern that fails to compile is logged and replaced by one that never
/// matches, which turns its stage into the identity instead of failing the
/// render.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| {
        log::error!("failed to compile pattern {pattern:?}: {err}");
        never_matching()
    })
}

fn never_matching() -> Regex {
    // A position cannot be both a word boundary and not one.
    Regex::new(r"\b\B").expect("boundary assertions always compile")
}

#[cfg(test)]
mod tests {
    use super::compile;

    #[test]
    fn invalid_pattern_degrades_to_no_match() {
        let re = compile("(unclosed");
        assert!(!re.is_match("(unclosed"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn valid_pattern_is_kept() {
        assert!(compile("^a+$").is_match("aaa"));
    }
}
