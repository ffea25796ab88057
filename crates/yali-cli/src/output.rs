//! Rendering of identification results

use serde::Serialize;
use yali_core::{Identification, LanguageScore};

#[derive(Serialize)]
struct IdentifyOutput<'a> {
    best: Option<&'a str>,
    scores: &'a [LanguageScore],
    ngrams_extracted: usize,
    ngrams_matched: usize,
}

/// Render the `top` best classes as a table or as JSON
pub fn render_identification(
    ident: &Identification,
    top: usize,
    json: bool,
) -> anyhow::Result<String> {
    let scores = ident.top(top);

    if json {
        let output = IdentifyOutput {
            best: ident.best().map(|s| s.class.as_str()),
            scores,
            ngrams_extracted: ident.ngrams_extracted,
            ngrams_matched: ident.ngrams_matched,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    if ident.best().is_none() {
        return Ok("unknown".to_string());
    }

    let lines: Vec<String> = scores
        .iter()
        .map(|s| format!("{:<8} {:.4}", s.class, s.score))
        .collect();
    Ok(lines.join("\n"))
}

/// Render the loaded classes one per line or as a JSON array
pub fn render_classes(classes: &[String], json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(classes)?)
    } else {
        Ok(classes.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident() -> Identification {
        Identification {
            scores: vec![
                LanguageScore::new("eng", 0.75),
                LanguageScore::new("fra", 0.25),
                LanguageScore::new("deu", 0.0),
            ],
            ngrams_extracted: 10,
            ngrams_matched: 4,
            latency_us: 12,
        }
    }

    #[test]
    fn test_table_output() {
        let out = render_identification(&ident(), 2, false).unwrap();
        assert_eq!(out, "eng      0.7500\nfra      0.2500");
    }

    #[test]
    fn test_json_output() {
        let out = render_identification(&ident(), 1, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["best"], "eng");
        assert_eq!(value["scores"].as_array().unwrap().len(), 1);
        assert_eq!(value["ngrams_matched"], 4);
    }

    #[test]
    fn test_unknown_when_nothing_matched() {
        let ident = Identification {
            scores: vec![LanguageScore::new("eng", 0.0)],
            ..Default::default()
        };
        assert_eq!(render_identification(&ident, 3, false).unwrap(), "unknown");
    }

    #[test]
    fn test_classes_output() {
        let classes = vec!["deu".to_string(), "eng".to_string()];
        assert_eq!(render_classes(&classes, false).unwrap(), "deu\neng");
        assert_eq!(render_classes(&classes, true).unwrap(), r#"["deu","eng"]"#);
    }
}
