use serde::Deserialize;
use std::path::Path;

/// All settings that can be placed in a .git-bugspots.yml config file.
/// Every field is optional — omitted fields fall back to CLI defaults.
/// CLI flags always take precedence over values set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BugspotsConfig {
    pub branch: Option<String>,
    pub depth: Option<usize>,

    /// Custom fix-detection regex, matched case-insensitively against the
    /// commit subject line. Takes precedence over `words` when both are set.
    pub regex: Option<String>,
    /// Words that flag a commit as a fix, matched on word boundaries.
    pub words: Option<Vec<String>>,

    pub timestamps: Option<bool>,
    pub format: Option<String>,
    pub output: Option<String>,
}

impl BugspotsConfig {
    /// Validates semantic constraints that serde cannot enforce.
    ///
    /// Returns a human-readable error describing exactly what is wrong and
    /// what values are accepted. Called automatically by [`load_config`].
    pub fn validate(&self) -> Result<(), String> {
        // format must be one of the two supported output drivers
        if let Some(fmt) = &self.format {
            match fmt.as_str() {
                "terminal" | "json" => {}
                other => {
                    return Err(format!(
                        "Invalid 'format' value: \"{other}\". \
                         Expected one of: \"terminal\", \"json\""
                    ))
                }
            }
        }

        // depth: 0 would silently produce an empty report — almost certainly a mistake
        if let Some(0) = self.depth {
            return Err("Invalid 'depth' value: 0. Must be 1 or greater".to_string());
        }

        // A regex that doesn't compile should fail at config load, not mid-scan.
        if let Some(re) = &self.regex {
            if let Err(e) = regex::Regex::new(re) {
                return Err(format!("Invalid 'regex' value: {e}"));
            }
        }

        if let Some(words) = &self.words {
            if words.is_empty() {
                return Err(
                    "Invalid 'words' value: empty list. \
                     Provide at least one word, or omit the field"
                        .to_string(),
                );
            }
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err("Invalid 'words' value: contains a blank word".to_string());
            }
        }

        Ok(())
    }
}

/// Reads, parses, and validates a YAML config file from `path`.
pub fn load_config(path: &Path) -> Result<BugspotsConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config file '{}': {e}", path.display()))?;
    let cfg: BugspotsConfig = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid config file '{}': {e}", path.display()))?;
    cfg.validate()
        .map_err(|e| format!("Config file '{}': {e}", path.display()))?;
    Ok(cfg)
}

/// Annotated YAML template — printed by `--generate-config`.
pub static TEMPLATE: &str = r#"# git-bugspots configuration file
# Generated by: git-bugspots --generate-config
#
# All settings are optional. Omit any field to use the built-in default.
# CLI flags always take precedence over values in this file.
# Save this file as .git-bugspots.yml in your repository root, then run:
#
#   git-bugspots --config .git-bugspots.yml [path]

# ── Scan scope ─────────────────────────────────────────────────────────────────

# Branch whose history is scanned.
# branch: "master"

# Number of fixes and hotspots to keep in each ranking.
# depth: 5

# ── Fix detection ──────────────────────────────────────────────────────────────
# By default a commit qualifies as a fix when its subject line contains one
# of the whole words: fix, fixes, fixed, close, closes, closed
# (case-insensitive, so "Prefixed" does not qualify).

# Custom detection regex. Matched case-insensitively against the subject
# line; takes precedence over `words` when both are set.
# regex: "\\b(hotfix|bugfix)\\b"

# Custom word list. Each word is matched whole, case-insensitively.
# words:
#   - "bug"
#   - "defect"
#   - "oops"

# ── Output ─────────────────────────────────────────────────────────────────────

# Show each fix's commit date in terminal output.
# timestamps: false

# Output format: terminal, json
# format: "terminal"

# Output file path (json format only; stdout when omitted).
# output: "bugspots-report.json"
"#;

/// Prints the config template to stdout, or writes it to `output_path` if given.
pub fn print_template(output_path: Option<&Path>) -> Result<(), String> {
    match output_path {
        Some(path) => std::fs::write(path, TEMPLATE)
            .map_err(|e| format!("Cannot write config template to '{}': {e}", path.display())),
        None => {
            print!("{TEMPLATE}");
            Ok(())
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_template_is_valid_yaml() {
        let result: Result<BugspotsConfig, _> = serde_yaml::from_str(TEMPLATE);
        assert!(
            result.is_ok(),
            "TEMPLATE must parse as valid BugspotsConfig: {:?}",
            result.err()
        );
        let cfg = result.unwrap();
        // All fields should be None (everything is commented out in the template)
        assert!(cfg.branch.is_none());
        assert!(cfg.depth.is_none());
        assert!(cfg.regex.is_none());
        assert!(cfg.words.is_none());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let cfg: BugspotsConfig = serde_yaml::from_str("{}").expect("empty map should parse");
        assert!(cfg.branch.is_none());
        assert!(cfg.depth.is_none());
        assert!(cfg.words.is_none());
        assert!(cfg.format.is_none());
        assert!(cfg.validate().is_ok(), "An all-default config is valid");
    }

    #[test]
    fn test_scan_scope_parsed() {
        let yaml = "branch: \"main\"\ndepth: 10\ntimestamps: true\nformat: json\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        assert_eq!(cfg.branch.as_deref(), Some("main"));
        assert_eq!(cfg.depth, Some(10));
        assert_eq!(cfg.timestamps, Some(true));
        assert_eq!(cfg.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_words_parsed() {
        let yaml = "words:\n  - bug\n  - defect\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        let words = cfg.words.expect("words should be Some");
        assert!(words.contains(&"bug".to_string()));
        assert!(words.contains(&"defect".to_string()));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "unknown_setting: true\n";
        let result: Result<BugspotsConfig, _> = serde_yaml::from_str(yaml);
        assert!(
            result.is_err(),
            "Unknown fields should be rejected by deny_unknown_fields"
        );
    }

    // ── validate() tests ──────────────────────────────────────────────────────

    #[test]
    fn test_validate_invalid_format_rejected() {
        let yaml = "format: \"html\"\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        let result = cfg.validate();
        assert!(result.is_err(), "Invalid format should be rejected");
        let msg = result.unwrap_err();
        assert!(msg.contains("format"), "Error should mention 'format': {msg}");
        assert!(
            msg.contains("terminal") && msg.contains("json"),
            "Error should list all valid values: {msg}"
        );
    }

    #[test]
    fn test_validate_zero_depth_rejected() {
        let yaml = "depth: 0\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        let result = cfg.validate();
        assert!(result.is_err(), "depth: 0 should be rejected");
        assert!(result.unwrap_err().contains("depth"), "Error should mention 'depth'");
    }

    #[test]
    fn test_validate_bad_regex_rejected() {
        let yaml = "regex: \"(unclosed\"\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        let result = cfg.validate();
        assert!(result.is_err(), "A regex that cannot compile should be rejected");
        assert!(result.unwrap_err().contains("regex"), "Error should mention 'regex'");
    }

    #[test]
    fn test_validate_empty_words_rejected() {
        let yaml = "words: []\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        let result = cfg.validate();
        assert!(result.is_err(), "An empty word list should be rejected");
        assert!(result.unwrap_err().contains("words"), "Error should mention 'words'");
    }

    #[test]
    fn test_validate_blank_word_rejected() {
        let yaml = "words:\n  - bug\n  - \"  \"\n";
        let cfg: BugspotsConfig = serde_yaml::from_str(yaml).expect("should parse");
        assert!(cfg.validate().is_err(), "Blank words should be rejected");
    }

    // ── Example file test ─────────────────────────────────────────────────────

    #[test]
    fn test_load_example_file() {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let example_path = manifest_dir.join(".git-bugspots.example.yml");

        let cfg = load_config(&example_path).unwrap_or_else(|e| {
            panic!("Example config file should parse and validate successfully: {e}")
        });

        assert_eq!(cfg.branch.as_deref(), Some("master"), "branch should match example file");
        assert_eq!(cfg.depth, Some(10), "depth should match example file");
        assert_eq!(cfg.timestamps, Some(true), "timestamps should match example file");
        assert_eq!(cfg.format.as_deref(), Some("terminal"), "format should match example file");

        let words = cfg.words.as_ref().expect("words should be set in example file");
        assert!(words.contains(&"bug".to_string()), "words should contain 'bug'");
        assert!(words.contains(&"defect".to_string()), "words should contain 'defect'");
        assert!(cfg.regex.is_none(), "example file leaves regex unset in favor of words");
    }
}
