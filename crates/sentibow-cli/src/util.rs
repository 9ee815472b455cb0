use anyhow::Result;
use std::path::PathBuf;

/// Accept `.tsv` and `.txt` files that exist on disk.
pub fn validate_text_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("txt") => {}
        _ => anyhow::bail!("File must have a .tsv or .txt extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}
