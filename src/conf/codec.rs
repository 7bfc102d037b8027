//! Mapping between flat dotted region entries and serde records.
//!
//! Entries are folded into a nested `toml::Value` tree keyed by the dotted
//! path below the region name, and records are read from / written to that
//! tree through serde. Only numeric leaves are representable.

use super::document::Region;
use super::error::ConfError;
use serde::{de::DeserializeOwned, Serialize};
use toml::{Table, Value};
use tracing::{debug, warn};

fn parse_scalar(key: &str, raw: &str) -> Result<Value, ConfError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Integer(i));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Value::Float(f)),
        _ => Err(ConfError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn insert_path(root: &mut Table, key: &str, path: &str, value: Value) -> Result<(), ConfError> {
    let conflict = || ConfError::Conflict {
        key: key.to_string(),
    };

    let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let leaf = segments.pop().ok_or_else(conflict)?;

    let mut table = root;
    for segment in segments {
        let slot = table
            .entry(segment)
            .or_insert_with(|| Value::Table(Table::new()));
        table = match slot {
            Value::Table(inner) => inner,
            _ => return Err(conflict()),
        };
    }

    if matches!(table.get(leaf), Some(Value::Table(_))) {
        return Err(conflict());
    }
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Builds a `T` from the entries of `region`, whose keys are `<name>.<path>`.
///
/// Fields without an entry keep whatever `T`'s deserializer defaults them to.
pub fn decode<T: DeserializeOwned>(region: &Region, name: &str) -> Result<T, ConfError> {
    let prefix = format!("{name}.");
    let mut root = Table::new();

    for entry in &region.entries {
        let Some(path) = entry.key.strip_prefix(&prefix) else {
            warn!("Skipping {} in CONF_{}: not under {}", entry.key, name, prefix);
            continue;
        };
        let value = parse_scalar(&entry.key, &entry.value)?;
        insert_path(&mut root, &entry.key, path, value)?;
    }

    debug!("Decoding CONF_{} from {} top-level keys", name, root.len());
    Ok(Value::Table(root).try_into()?)
}

fn flatten(key: &str, value: &Value, region: &mut Region) -> Result<(), ConfError> {
    match value {
        Value::Table(table) => {
            for (field, inner) in table {
                flatten(&format!("{key}.{field}"), inner, region)?;
            }
        }
        Value::Integer(i) => region.push(key, i.to_string()),
        Value::Float(f) => region.push(key, format!("{f:.6}")),
        _ => {
            return Err(ConfError::Unsupported {
                key: key.to_string(),
            })
        }
    }
    Ok(())
}

/// Turns `value` into a `CONF_<name>` region, one entry per numeric leaf in
/// field declaration order.
pub fn encode<T: Serialize>(value: &T, name: &str) -> Result<Region, ConfError> {
    let tree = Value::try_from(value)?;
    let mut region = Region::new(name);
    flatten(name, &tree, &mut region)?;
    Ok(region)
}
