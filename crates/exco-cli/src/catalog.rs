//! # Catalog — Print the validated rule catalog.

use anyhow::Result;
use clap::{Args, ValueEnum};
use exco_rules::RuleCatalog;

/// Output format for `exco catalog`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for `exco catalog`.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Render `catalog` in the requested format.
pub fn render(catalog: &RuleCatalog, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(catalog)?,
        OutputFormat::Json => serde_json::to_string_pretty(catalog)?,
    })
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, catalog: &RuleCatalog) -> Result<u8> {
    println!("{}", render(catalog, args.format)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_rendering_lists_rules() {
        let catalog = RuleCatalog::builtin().unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render(&catalog, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["restricted_items"]["UAE"][0], "Alcohol");
        assert_eq!(json["weight_bounds"]["max_kg"], 30.0);
    }

    #[test]
    fn yaml_rendering_reloads() {
        let catalog = RuleCatalog::builtin().unwrap();
        let yaml = render(&catalog, OutputFormat::Yaml).unwrap();
        let doc: exco_rules::CatalogDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(RuleCatalog::from_document(doc).unwrap(), catalog);
    }
}
