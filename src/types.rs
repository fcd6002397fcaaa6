use serde::Serialize;

// ─── Core Git Data ────────────────────────────────────────────────────────────

/// A commit whose subject line matched the fix pattern.
#[derive(Debug, Clone, Serialize)]
pub struct Fix {
    /// First line of the commit message, leniently decoded.
    pub message: String,
    /// Author timestamp, unix seconds.
    pub timestamp: i64,
    /// Old-side paths of the diff against the first parent.
    /// Empty for root commits.
    pub files: Vec<String>,
    /// Full commit hash.
    pub commit_id: String,
}

// ─── Scoring ──────────────────────────────────────────────────────────────────

/// A file ranked by its accumulated decay-weighted fix activity.
#[derive(Debug, Clone, Serialize)]
pub struct Spot {
    pub file: String,
    /// Raw accumulated total. Externally the score is always shown with
    /// exactly 4 fractional digits — see [`Spot::formatted_score`].
    #[serde(serialize_with = "four_decimals")]
    pub score: f64,
}

impl Spot {
    /// External score representation: exactly 4 fractional digits.
    pub fn formatted_score(&self) -> String {
        format!("{:.4}", self.score)
    }
}

fn four_decimals<S>(score: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{score:.4}"))
}

/// Everything one scan produces: the qualifying fix commits (most files
/// touched first) and the hotspot ranking (highest score first), both
/// truncated to the requested depth.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub fixes: Vec<Fix>,
    pub spots: Vec<Spot>,
}

// ─── Report ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub repo_path: String,
    pub branch: String,
    pub analyzed_at: String,
    pub fix_count: usize,
    pub spot_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub fixes: Vec<Fix>,
    pub spots: Vec<Spot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_score_has_four_digits() {
        let spot = Spot { file: "src/a.rs".to_string(), score: 0.5 };
        assert_eq!(spot.formatted_score(), "0.5000");

        let spot = Spot { file: "src/a.rs".to_string(), score: 1.23456789 };
        assert_eq!(spot.formatted_score(), "1.2346", "Score must round to 4 digits");
    }

    #[test]
    fn test_score_serializes_as_formatted_string() {
        let spot = Spot { file: "lib/core.rs".to_string(), score: 0.99551234 };
        let json = serde_json::to_string(&spot).expect("spot should serialize");
        assert!(
            json.contains("\"0.9955\""),
            "Score must serialize as a 4-digit string: {json}"
        );
    }
}
