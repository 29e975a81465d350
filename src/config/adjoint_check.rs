use crate::matcher::MatcherParams;
use crate::operator::SelfCheckOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct AdjointCheckConfig {
    /// Optional image whose shape (and pixels) are used for an extra check.
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default, rename = "selfCheck", alias = "self_check")]
    pub self_check: SelfCheckOptions,
    #[serde(default)]
    pub matcher: MatcherParams,
    pub output: AdjointCheckOutput,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdjointCheckOutput {
    pub report_json: PathBuf,
    /// Where to save the gradient magnitude of `input`, if any.
    #[serde(default)]
    pub gradient_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<AdjointCheckConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: AdjointCheckConfig =
            serde_json::from_str(r#"{ "output": { "report_json": "out/report.json" } }"#).unwrap();
        assert!(cfg.input.is_none());
        assert_eq!(cfg.self_check, SelfCheckOptions::default());
        assert_eq!(cfg.output.report_json, PathBuf::from("out/report.json"));
        assert!(cfg.output.gradient_image.is_none());
    }

    #[test]
    fn self_check_section_is_parsed() {
        let cfg: AdjointCheckConfig = serde_json::from_str(
            r#"{
                "input": "img.png",
                "selfCheck": { "height": 32, "width": 48, "seed": 9 },
                "output": { "report_json": "r.json", "gradient_image": "g.png" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.self_check.height, 32);
        assert_eq!(cfg.self_check.width, 48);
        assert_eq!(cfg.self_check.seed, Some(9));
        assert_eq!(cfg.input, Some(PathBuf::from("img.png")));
    }
}
