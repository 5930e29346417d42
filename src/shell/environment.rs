use crate::core::env::EnvVars;

pub const VARIABLE_SIGIL: char = '$';

/// Replaces every `$NAME` word, the command name included, with the value of
/// `NAME`, or an empty string when it is unset.
///
/// Single pass: substituted values are never expanded again.
pub fn expand_env_vars(vars: &EnvVars, args: &mut [String]) {
    for arg in args.iter_mut() {
        if let Some(name) = arg.strip_prefix(VARIABLE_SIGIL) {
            *arg = vars.get(name).unwrap_or_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn expand(list: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        expand_env_vars(&EnvVars::new(), &mut args);
        args
    }

    #[test]
    fn test_expands_known_and_unknown() {
        env::set_var("ATRIUM_EXPAND_USER", "alice");
        assert_eq!(
            expand(&["echo", "$ATRIUM_EXPAND_USER", "$ATRIUM_EXPAND_MISSING", "plain"]),
            vec!["echo", "alice", "", "plain"]
        );
    }

    #[test]
    fn test_expands_command_name() {
        env::set_var("ATRIUM_EXPAND_CMD", "pwd");
        assert_eq!(expand(&["$ATRIUM_EXPAND_CMD"]), vec!["pwd"]);
    }

    #[test]
    fn test_only_leading_sigil_counts() {
        env::set_var("ATRIUM_EXPAND_MID", "nope");
        assert_eq!(
            expand(&["a$ATRIUM_EXPAND_MID", "$"]),
            vec!["a$ATRIUM_EXPAND_MID", ""]
        );
    }

    #[test]
    fn test_single_pass() {
        env::set_var("ATRIUM_EXPAND_INNER", "deep");
        env::set_var("ATRIUM_EXPAND_OUTER", "$ATRIUM_EXPAND_INNER");

        let once = expand(&["$ATRIUM_EXPAND_OUTER"]);
        assert_eq!(once, vec!["$ATRIUM_EXPAND_INNER"]);

        // Expanding the same raw words again gives the same result.
        assert_eq!(expand(&["$ATRIUM_EXPAND_OUTER"]), once);
    }
}
