//! Map type rename rules.
//!
//! Archive entries name their channel in many ways ("Normal", "nrm",
//! "Albedo", "basecolor", ...). The rename table collapses those synonyms to
//! a short suffix used in the output file name, and maps the suffix to the
//! material parameter the texture feeds.
//!
//! The table is ordered and deliberately not deduplicated: several map types
//! share one suffix, and on any ambiguous lookup the first entry wins.

use std::sync::OnceLock;

/// One row of the rename table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    /// Map type as it appears in archive entry names (e.g. "Basecolor").
    pub map_type: String,
    /// Suffix appended to renamed files (e.g. "_D").
    pub suffix: String,
    /// Material parameter fed by the texture (e.g. "Diffuse Map").
    pub parameter_name: String,
}

impl RenameRule {
    /// Create a rule.
    pub fn new(
        map_type: impl Into<String>,
        suffix: impl Into<String>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            map_type: map_type.into(),
            suffix: suffix.into(),
            parameter_name: parameter_name.into(),
        }
    }
}

/// Ordered rename table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRules {
    rules: Vec<RenameRule>,
}

/// Built-in rows: (map type, suffix, parameter name).
const STANDARD_RULES: &[(&str, &str, &str)] = &[
    ("Normal", "_N", "Normal Map"),
    ("Nrm", "_N", "Normal Map"),
    ("Nrml", "_N", "Normal Map"),
    ("Height", "_H", "Height Map"),
    ("Displacement", "_H", "Height Map"),
    ("Disp", "_H", "Height Map"),
    ("Basecolor", "_D", "Diffuse Map"),
    ("Diffuse", "_D", "Diffuse Map"),
    ("Color", "_D", "Diffuse Map"),
    ("Albedo", "_D", "Diffuse Map"),
    ("Roughness", "_R", "Roughness Map"),
    ("Rough", "_R", "Roughness Map"),
    ("Glossiness", "_R", "Roughness Map"),
    ("Gloss", "_R", "Roughness Map"),
    ("Specular", "_S", "Specular Map"),
    ("spec", "_S", "Specular Map"),
    ("AmbientOcclusion", "_O", "AO Map"),
    ("ao", "_O", "AO Map"),
    ("Occlusion", "_O", "AO Map"),
    ("Emissive", "_E", "Emissive Map"),
    ("Opacity", "_A", "Opacity Map"),
    ("Alpha", "_A", "Opacity Map"),
    ("Metallic", "_M", "Metallic Map"),
    ("Metal", "_M", "Metallic Map"),
];

/// Length of every suffix in the standard table (underscore + letter).
const SUFFIX_LEN: usize = 2;

impl RenameRules {
    /// Build a table from explicit rows, keeping their order.
    pub fn new(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }

    /// The built-in table, built once per process.
    pub fn standard() -> &'static RenameRules {
        static STANDARD: OnceLock<RenameRules> = OnceLock::new();
        STANDARD.get_or_init(|| {
            RenameRules::new(
                STANDARD_RULES
                    .iter()
                    .map(|(map_type, suffix, param)| RenameRule::new(*map_type, *suffix, *param))
                    .collect(),
            )
        })
    }

    /// All rows in lookup order.
    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    /// Iterate the map type column in lookup order.
    pub fn map_types(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.map_type.as_str())
    }

    /// First rule whose map type equals `map_type`, ignoring case.
    pub fn find_by_map_type(&self, map_type: &str) -> Option<&RenameRule> {
        self.rules
            .iter()
            .find(|rule| rule.map_type.eq_ignore_ascii_case(map_type))
    }

    /// Suffix for a map type, if the map type is known.
    pub fn suffix_for(&self, map_type: &str) -> Option<&str> {
        self.find_by_map_type(map_type)
            .map(|rule| rule.suffix.as_str())
    }

    /// Parameter name for a suffix, if any rule uses that suffix.
    pub fn parameter_for(&self, suffix: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.suffix.eq_ignore_ascii_case(suffix))
            .map(|rule| rule.parameter_name.as_str())
    }

    /// Parameter name for a renamed texture, read from its trailing suffix.
    ///
    /// `T_Amethyst1-1K_N` ends in `_N`, which maps to "Normal Map". Names
    /// renamed with an empty suffix (unknown map type) yield `None`.
    pub fn parameter_for_texture(&self, texture_name: &str) -> Option<&str> {
        let stem = texture_name
            .rsplit_once('.')
            .map_or(texture_name, |(stem, _ext)| stem);
        let split = stem.len().checked_sub(SUFFIX_LEN)?;
        let suffix = stem.get(split..)?;
        self.parameter_for(suffix)
    }
}

impl Default for RenameRules {
    fn default() -> Self {
        Self::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_order_is_preserved() {
        let rules = RenameRules::standard();
        assert_eq!(rules.rules().len(), STANDARD_RULES.len());
        assert_eq!(rules.rules()[0].map_type, "Normal");
        assert_eq!(rules.rules().last().unwrap().map_type, "Metal");
    }

    #[test]
    fn test_synonyms_share_a_suffix() {
        let rules = RenameRules::standard();
        for map_type in ["Normal", "Nrm", "Nrml"] {
            assert_eq!(rules.suffix_for(map_type), Some("_N"));
        }
        for map_type in ["Basecolor", "Diffuse", "Color", "Albedo"] {
            assert_eq!(rules.suffix_for(map_type), Some("_D"));
        }
    }

    #[test]
    fn test_suffix_lookup_ignores_case() {
        let rules = RenameRules::standard();
        assert_eq!(rules.suffix_for("albedo"), Some("_D"));
        assert_eq!(rules.suffix_for("AO"), Some("_O"));
        assert_eq!(rules.suffix_for("ambientocclusion"), Some("_O"));
    }

    #[test]
    fn test_unknown_map_type_has_no_suffix() {
        assert_eq!(RenameRules::standard().suffix_for("sheen"), None);
    }

    #[test]
    fn test_parameter_lookup_first_match_wins() {
        let rules = RenameRules::new(vec![
            RenameRule::new("Roughness", "_R", "Roughness Map"),
            RenameRule::new("Gloss", "_R", "Gloss Map"),
        ]);
        assert_eq!(rules.parameter_for("_R"), Some("Roughness Map"));
    }

    #[test]
    fn test_map_type_lookup_first_match_wins() {
        let rules = RenameRules::new(vec![
            RenameRule::new("Height", "_H", "Height Map"),
            RenameRule::new("height", "_X", "Other"),
        ]);
        assert_eq!(rules.suffix_for("HEIGHT"), Some("_H"));
    }

    #[test]
    fn test_parameter_for_texture() {
        let rules = RenameRules::standard();
        assert_eq!(
            rules.parameter_for_texture("T_Amethyst1-1K_N"),
            Some("Normal Map")
        );
        assert_eq!(
            rules.parameter_for_texture("T_Amethyst1-1K_O.jpg"),
            Some("AO Map")
        );
        assert_eq!(rules.parameter_for_texture("T_Amethyst1-1K.png"), None);
        assert_eq!(rules.parameter_for_texture("N"), None);
    }
}
