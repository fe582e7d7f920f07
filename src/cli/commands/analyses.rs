//! Analyses command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{default_analyses, second_order, subscores, AnalysesArgs, AnalysisSpec, OutputFormat};

/// One table row per analysis
pub fn format_analysis_row(spec: &AnalysisSpec) -> String {
    format!(
        "  {:<32} {:<13} {:<22} chance={:<6.3} {}",
        spec.name(),
        spec.decoding().as_str(),
        spec.condition(),
        spec.chance(),
        spec.query().unwrap_or("-")
    )
}

pub fn run_analyses(args: AnalysesArgs, level: LogLevel) -> Result<(), String> {
    let base = default_analyses();
    let list = if args.subscores { subscores(&base) } else { base.clone() };

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&list).map_err(|e| format!("JSON error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            log(level, LogLevel::Normal, &format!("{} analyses:", list.len()));
            for spec in &list {
                log(level, LogLevel::Normal, &format_analysis_row(spec));
            }
            if args.subscores {
                log(level, LogLevel::Verbose, "Second-order contrasts (chance 0):");
                for diff in second_order(&base) {
                    log(
                        level,
                        LogLevel::Verbose,
                        &format!("  {} = {} - {}", diff.name, diff.contrast1, diff.contrast2),
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::find_analysis;

    #[test]
    fn test_format_analysis_row() {
        let spec = find_analysis("detect_seen_pst").unwrap();
        let row = format_analysis_row(&spec);
        assert!(row.contains("detect_seen_pst"));
        assert!(row.contains("categorize"));
        assert!(row.contains("target_present == True"));
        assert!(row.contains("chance=0.500"));
    }

    #[test]
    fn test_row_without_query() {
        let row = format_analysis_row(&find_analysis("target_circAngle").unwrap());
        assert!(row.contains("circ_regress"));
        assert!(row.trim_end().ends_with('-'));
    }
}
