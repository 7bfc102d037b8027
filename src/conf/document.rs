//! Region-level view of a `.conf` file.
//! - Strips a leading BOM and all whitespace inside each line
//! - Skips `#` comment lines and anything outside `CONF_<name> = { ... };`
//! - Keeps entries in file order; a later region replaces an earlier one of the same name

use super::error::ConfError;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use tracing::{debug, warn};

lazy_static! {
    // Matched against lines that already had their whitespace removed.
    static ref REGION_START_RE: Regex =
        Regex::new(r"^CONF_(?P<name>[^=]+)=\{").expect("valid REGION_START_RE");

    static ref ENTRY_RE: Regex =
        Regex::new(r"^(?P<key>[^=;]+)=(?P<value>[^;]*);").expect("valid ENTRY_RE");

    static ref LEADING_BOM_RE: Regex =
        Regex::new(r"^\u{FEFF}").expect("valid LEADING_BOM_RE");
}

const REGION_END: &str = "};";

/// One `key = value;` line of a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// A named `CONF_<name> = { ... };` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Last value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Entry {
            key: key.into(),
            value: value.into(),
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfDocument {
    regions: Vec<Region>,
}

fn strip_bom(s: &str) -> Cow<'_, str> {
    if LEADING_BOM_RE.is_match(s) {
        Cow::Owned(LEADING_BOM_RE.replace(s, "").into_owned())
    } else {
        Cow::Borrowed(s)
    }
}

fn remove_whitespace(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_whitespace) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.chars().filter(|c| !c.is_whitespace()).collect())
    }
}

fn parse_entry(line: &str, line_no: usize) -> Result<Entry, ConfError> {
    if let Some(cap) = ENTRY_RE.captures(line) {
        return Ok(Entry {
            key: cap["key"].to_string(),
            value: cap["value"].to_string(),
        });
    }

    let message = match line.find('=') {
        None => format!("missing '=' in {line:?}"),
        Some(0) => format!("missing key in {line:?}"),
        Some(eq) if !line[eq..].contains(';') => format!("missing ';' in {line:?}"),
        Some(_) => format!("malformed entry {line:?}"),
    };
    Err(ConfError::Syntax {
        line: line_no,
        message,
    })
}

impl ConfDocument {
    pub fn parse(text: &str) -> Result<Self, ConfError> {
        let text = strip_bom(text);
        let mut doc = ConfDocument::default();
        // Region being filled, with the line it was opened on.
        let mut open: Option<(Region, usize)> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = remove_whitespace(raw);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match open.take() {
                Some((region, _)) if line.starts_with(REGION_END) => {
                    debug!(
                        "Closed region CONF_{} ({} entries)",
                        region.name,
                        region.entries.len()
                    );
                    doc.upsert_region(region);
                }
                Some((mut region, start)) => {
                    region.entries.push(parse_entry(&line, line_no)?);
                    open = Some((region, start));
                }
                None => {
                    if let Some(cap) = REGION_START_RE.captures(&line) {
                        open = Some((Region::new(&cap["name"]), line_no));
                    } else {
                        debug!("Ignoring line {} outside any region", line_no);
                    }
                }
            }
        }

        if let Some((region, start)) = open {
            return Err(ConfError::Syntax {
                line: start,
                message: format!("unterminated region CONF_{}", region.name),
            });
        }
        Ok(doc)
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Adds `region`, replacing any existing region with the same name.
    pub fn upsert_region(&mut self, region: Region) {
        if let Some(idx) = self.regions.iter().position(|r| r.name == region.name) {
            warn!("Region CONF_{} defined more than once, keeping the last", region.name);
            self.regions[idx] = region;
        } else {
            self.regions.push(region);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for region in &self.regions {
            out.push_str(&format!("CONF_{} = {{\n", region.name));
            for entry in &region.entries {
                out.push_str(&format!("\t{} = {};\n", entry.key, entry.value));
            }
            out.push_str(REGION_END);
            out.push('\n');
        }
        out
    }
}
