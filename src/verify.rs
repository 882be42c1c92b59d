use anyhow::{anyhow, Result};

///
/// Verify that a table name is usable inside statement text.
///
/// The table name is the only configured string that is ever placed into SQL
/// directly, so it must be a plain identifier: non-empty, made of
/// alphanumerics and underscores, not starting with a digit.
pub fn verify_table_name(table_name: &str) -> Result<()> {
    if table_name.trim().is_empty() {
        return Err(anyhow!("The table name cannot be an empty string"));
    }
    if table_name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(anyhow!(
            "The table name '{}' cannot start with a digit",
            table_name
        ));
    }
    let offender = table_name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'));
    if let Some(offender) = offender {
        return Err(anyhow!(
            "The table name '{}' contains the illegal character '{}'",
            table_name,
            offender
        ));
    }
    Ok(())
}
