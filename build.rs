use std::{
    env,
    error::Error,
    fs,
    path::{Path, PathBuf},
};

#[path = "build/config_gen.rs"]
mod config_gen;

use config_gen::RawConfig;

const CFG_ENV: &str = "SENSOR_HUB_CFG";
const CFG_FILE: &str = "cfg.toml";
const CFG_EXAMPLE_FILE: &str = "cfg.example.toml";

// Picks the config file: $SENSOR_HUB_CFG, then cfg.toml, then the shipped example.
fn locate_config(manifest_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if let Ok(path) = env::var(CFG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let user = manifest_dir.join(CFG_FILE);
    if user.exists() {
        return Ok(user);
    }

    println!(
        "cargo:warning={} not found, building with {}",
        CFG_FILE, CFG_EXAMPLE_FILE
    );
    Ok(manifest_dir.join(CFG_EXAMPLE_FILE))
}

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    // Tell Cargo to rerun if any candidate config changes
    println!("cargo:rerun-if-env-changed={}", CFG_ENV);
    println!("cargo:rerun-if-changed={}", CFG_FILE);
    println!("cargo:rerun-if-changed={}", CFG_EXAMPLE_FILE);
    println!("cargo:rerun-if-changed=build/config_gen.rs");

    let cfg_path = locate_config(&manifest_dir)?;
    println!("cargo:rerun-if-changed={}", cfg_path.display());

    // Read and parse
    let toml_str = fs::read_to_string(&cfg_path)
        .map_err(|e| format!("failed to read {}: {}", cfg_path.display(), e))?;
    let raw = RawConfig::parse(&toml_str)
        .map_err(|e| format!("invalid {}: {}", cfg_path.display(), e))?;

    // Generate Rust code
    let generated = raw.generate();
    for warning in &generated.warnings {
        println!("cargo:warning={}", warning);
    }

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, generated.code)?;
    Ok(())
}
