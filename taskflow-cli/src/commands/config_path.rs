use anyhow::Result;

use crate::config::TaskflowConfig;

pub fn print_config_path() -> Result<()> {
    let path = TaskflowConfig::config_path()?;
    if TaskflowConfig::write_default_if_missing(&path)? {
        println!("Created default config.");
    }
    println!("{}", path.display());
    Ok(())
}
