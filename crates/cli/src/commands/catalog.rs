//! `strata catalog`: Catalog file checks.

use std::path::Path;

pub async fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating catalog {}...", path.display());

    match strata_catalog::load_file(path) {
        Ok(catalog) => {
            println!("   ✅ Catalog is valid");
            println!();
            println!("   Pipelines:   {}", catalog.pipelines.len());
            println!("   Stages:      {}", catalog.stages.len());
            println!("   Strategies:  {}", catalog.strategies.len());

            let unused = catalog
                .stages
                .iter()
                .filter(|s| !catalog.pipelines.iter().any(|p| p.contains(s.id())))
                .count();
            if unused > 0 {
                println!();
                println!("   ⚠️  {unused} stage(s) not used by any pipeline will not be registered");
            }
            Ok(())
        }
        Err(e) => {
            println!("   ❌ Catalog error: {e}");
            Err(e.into())
        }
    }
}
