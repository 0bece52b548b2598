//! `parse` command: preview how archive entry names are renamed.

use console::style;
use sharetex::fetch::ArchiveEntry;
use sharetex::naming::{parse_texture_name, NameParseError, RenameRules};

use crate::error::CliError;

pub fn run(names: &[String]) -> Result<(), CliError> {
    let rules = RenameRules::standard();
    let mut failures = 0;

    for name in names {
        match describe(name, rules) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => {
                failures += 1;
                println!("{} {}", style(name).bold(), style(e).red());
            }
        }
        println!();
    }

    if failures > 0 {
        return Err(CliError::Unparsed(failures));
    }
    Ok(())
}

/// Parsed fields, renamed file and material parameter for one name.
fn describe(name: &str, rules: &RenameRules) -> Result<Vec<String>, NameParseError> {
    let entry = ArchiveEntry {
        path: name.to_string(),
        bytes: Vec::new(),
    };
    let (stem, extension) = entry
        .stem_and_extension()
        .unwrap_or((entry.file_name(), ""));

    let parsed = parse_texture_name(stem, rules)?;
    let renamed = parsed.texture_file_name(rules, extension);
    let parameter = rules
        .parameter_for_texture(&renamed)
        .unwrap_or("(unlabeled)");

    Ok(vec![
        format!("{}", style(name).bold()),
        format!("  resolution: {}", parsed.resolution),
        format!("  asset:      {}", parsed.asset_name),
        format!("  map type:   {}", parsed.map_type),
        format!("  renamed:    {}", renamed),
        format!("  parameter:  {}", parameter),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_keeps_extension() {
        console::set_colors_enabled(false);
        let lines = describe("1K-amethyst_1-normal.png", RenameRules::standard()).unwrap();
        assert_eq!(lines[0], "1K-amethyst_1-normal.png");
        assert_eq!(lines[4], "  renamed:    T_Amethyst1-1K_N.png");
        assert_eq!(lines[5], "  parameter:  Normal Map");
    }

    #[test]
    fn test_describe_without_extension() {
        let lines = describe("blackmarble_1_ao-1K", RenameRules::standard()).unwrap();
        assert_eq!(lines[4], "  renamed:    T_Blackmarble1-1K_O");
    }

    #[test]
    fn test_describe_reports_missing_resolution() {
        let err = describe("amethyst_normal.png", RenameRules::standard()).unwrap_err();
        assert!(matches!(err, NameParseError::MissingResolution(_)));
    }

    #[test]
    fn test_run_counts_failures() {
        let names = vec![
            "1K-rock-normal.png".to_string(),
            "preview.jpg".to_string(),
            "LICENSE".to_string(),
        ];
        assert!(matches!(run(&names), Err(CliError::Unparsed(2))));
    }
}
