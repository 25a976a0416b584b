use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*(?P<key>[A-Za-z0-9_.]+)\s*(?:\|\s*default\("(?P<default>[^"]*)"\)\s*)?\}\}"#)
        .expect("placeholder pattern must compile")
});

/// Substitute environment placeholders in raw config text
///
/// Runs before TOML parsing, so config structs only ever see plain strings.
/// Comment lines are copied through untouched.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut expanded = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            expanded.push_str(line);
        } else {
            expand_line(line, &mut expanded)?;
        }
    }

    Ok(expanded)
}

fn expand_line(line: &str, out: &mut String) -> anyhow::Result<()> {
    let mut cursor = 0;

    for caps in PLACEHOLDER.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&line[cursor..whole.start()]);
        out.push_str(&resolve(&caps["key"], caps.name("default").map(|m| m.as_str()))?);
        cursor = whole.end();
    }

    out.push_str(&line[cursor..]);
    Ok(())
}

fn resolve<'a>(key: &str, default: Option<&'a str>) -> anyhow::Result<Cow<'a, str>> {
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        anyhow::bail!("unsupported placeholder `{key}`: only `env.NAME` is recognized");
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(Cow::Owned(value)),
        (Err(_), Some(fallback)) => Ok(Cow::Borrowed(fallback)),
        (Err(_), None) => anyhow::bail!("environment variable `{name}` is not set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[capture]\nmessage_content = true\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_set_variable() {
        temp_env::with_var("PW_BUCKET", Some("traces"), || {
            let out = expand_env("base_path = \"gs://{{ env.PW_BUCKET }}/genai\"").unwrap();
            assert_eq!(out, "base_path = \"gs://traces/genai\"");
        });
    }

    #[test]
    fn several_placeholders_on_one_line() {
        temp_env::with_vars([("PW_A", Some("a")), ("PW_B", Some("b"))], || {
            let out = expand_env("x = \"{{env.PW_A}}-{{ env.PW_B }}\"").unwrap();
            assert_eq!(out, "x = \"a-b\"");
        });
    }

    #[test]
    fn unset_variable_is_an_error() {
        temp_env::with_var_unset("PW_UNSET", || {
            let err = expand_env("x = \"{{ env.PW_UNSET }}\"").unwrap_err();
            assert!(err.to_string().contains("PW_UNSET"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("PW_MAYBE", || {
            let out = expand_env("x = \"{{ env.PW_MAYBE | default(\"/tmp/genai\") }}\"").unwrap();
            assert_eq!(out, "x = \"/tmp/genai\"");
        });

        temp_env::with_var("PW_MAYBE", Some("/data"), || {
            let out = expand_env("x = \"{{ env.PW_MAYBE | default(\"/tmp/genai\") }}\"").unwrap();
            assert_eq!(out, "x = \"/data\"");
        });
    }

    #[test]
    fn empty_default_is_allowed() {
        temp_env::with_var_unset("PW_TOKEN", || {
            let out = expand_env("token = \"{{ env.PW_TOKEN | default(\"\") }}\"").unwrap();
            assert_eq!(out, "token = \"\"");
        });
    }

    #[test]
    fn other_scopes_are_rejected() {
        let err = expand_env("x = \"{{ vault.KEY }}\"").unwrap_err();
        assert!(err.to_string().contains("vault.KEY"));

        let err = expand_env("x = \"{{ env.A.B }}\"").unwrap_err();
        assert!(err.to_string().contains("env.A.B"));
    }

    #[test]
    fn comment_lines_are_left_alone() {
        temp_env::with_var_unset("PW_UNSET", || {
            let input = "  # base_path = \"{{ env.PW_UNSET }}\"\n[upload]\n";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn line_endings_are_preserved() {
        temp_env::with_var("PW_A", Some("a"), || {
            let out = expand_env("x = \"{{ env.PW_A }}\"\r\ny = 1\r\n").unwrap();
            assert_eq!(out, "x = \"a\"\r\ny = 1\r\n");
        });
    }
}
