use lutgen_core::constants::presets;
use lutgen_core::{compute_table_hash, generate, SampleTable, TableError, TableSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Manifest format version understood by this build
pub const MANIFEST_VERSION: u32 = 1;

/// Upper bound on manifest file size; real manifests are a few KB
const MAX_MANIFEST_SIZE: u64 = 1024 * 1024;

/// How a table is written out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", deny_unknown_fields)]
pub enum Layout {
    /// One bracketed row per sample, each followed by a comma
    #[default]
    Rows,
    /// A single `const` array item
    Const { ident: String },
}

/// Names used for the fixed-point type in the emitted literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderStyle {
    /// Path called with each raw value, e.g. `Fixed::from_raw`
    pub constructor: String,
    /// Element type of `const` arrays
    pub element_type: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            constructor: "Fixed::from_raw".into(),
            element_type: "Fixed".into(),
        }
    }
}

/// One table in a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub spec: TableSpec,
    #[serde(default)]
    pub layout: Layout,
    /// Keys neither the table nor the layout recognised; must stay empty.
    /// `deny_unknown_fields` does not work across `flatten`.
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl ManifestEntry {
    pub fn new(spec: TableSpec, layout: Layout) -> Self {
        Self {
            spec,
            layout,
            unknown: BTreeMap::new(),
        }
    }
}

/// Versioned list of tables to generate (parsed from JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub v: u32,
    pub tables: Vec<ManifestEntry>,
    #[serde(default)]
    pub style: RenderStyle,
}

/// Result of emitting a single table
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub arity: usize,
    /// SHA-256 of the raw values
    pub hash: [u8; 32],
}

/// Manifest equivalent to the built-in presets.
pub fn builtin_manifest() -> Manifest {
    let tables = presets()
        .into_iter()
        .map(|spec| {
            let layout = if spec.name == "partial_sine" {
                Layout::Const {
                    ident: "PARTIAL_SINE_LUT".into(),
                }
            } else {
                Layout::Rows
            };
            ManifestEntry::new(spec, layout)
        })
        .collect();

    Manifest {
        v: MANIFEST_VERSION,
        tables,
        style: RenderStyle::default(),
    }
}

pub fn parse_manifest(raw: &str) -> Result<Manifest, Box<dyn std::error::Error>> {
    let manifest: Manifest =
        serde_json::from_str(raw).map_err(|e| format!("Error parsing manifest JSON: {}", e))?;

    if manifest.v != MANIFEST_VERSION {
        return Err(TableError::UnsupportedManifestVersion(manifest.v).into());
    }

    for entry in &manifest.tables {
        if !entry.unknown.is_empty() {
            let keys: Vec<&str> = entry.unknown.keys().map(String::as_str).collect();
            return Err(format!(
                "Unknown key(s) in table '{}': {}",
                entry.spec.name,
                keys.join(", ")
            )
            .into());
        }
    }

    Ok(manifest)
}

pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest, Box<dyn std::error::Error>> {
    let path = path.as_ref();

    let metadata = fs::metadata(path)
        .map_err(|e| format!("Error accessing manifest '{}': {}", path.display(), e))?;
    if metadata.len() > MAX_MANIFEST_SIZE {
        return Err(format!(
            "Manifest too large: {} bytes (max {} bytes)",
            metadata.len(),
            MAX_MANIFEST_SIZE
        )
        .into());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Error reading manifest '{}': {}", path.display(), e))?;

    tracing::debug!("Loaded manifest from {} ({} bytes)", path.display(), raw.len());
    parse_manifest(&raw)
}

fn render_row(out: &mut String, row: &[i32], style: &RenderStyle) {
    out.push('[');
    for (k, v) in row.iter().enumerate() {
        if k > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{}({})", style.constructor, v));
    }
    out.push(']');
}

/// Render a table as source literals. Output always ends with a newline.
pub fn render(table: &SampleTable, layout: &Layout, style: &RenderStyle) -> String {
    let mut out = String::new();

    match layout {
        Layout::Rows => {
            for row in table.rows() {
                render_row(&mut out, row, style);
                out.push_str(",\n");
            }
        }
        Layout::Const { ident } => {
            let ty = if table.arity() == 1 {
                format!("[{}; {}]", style.element_type, table.len())
            } else {
                format!("[[{}; {}]; {}]", style.element_type, table.arity(), table.len())
            };
            out.push_str(&format!("const {}: {} = [ ", ident, ty));
            for (i, row) in table.rows().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if table.arity() == 1 {
                    out.push_str(&format!("{}({})", style.constructor, row[0]));
                } else {
                    render_row(&mut out, row, style);
                }
            }
            out.push_str(" ];\n");
        }
    }

    out
}

/// Generate every table in the manifest, then write them to `out`.
///
/// All tables are generated before anything is written, so a bad entry
/// leaves `out` untouched.
pub fn emit_manifest<W: Write>(
    manifest: &Manifest,
    out: &mut W,
) -> Result<Vec<TableSummary>, Box<dyn std::error::Error>> {
    tracing::info!("Generating {} table(s)", manifest.tables.len());

    let mut generated = Vec::with_capacity(manifest.tables.len());
    for entry in &manifest.tables {
        let table = generate(&entry.spec)?;
        let hash = compute_table_hash(&table);
        tracing::info!(
            "Generated '{}': {} rows x {} columns, sha256 0x{}",
            table.name(),
            table.len(),
            table.arity(),
            hex::encode(hash)
        );
        generated.push((table, &entry.layout, hash));
    }

    let mut summaries = Vec::with_capacity(generated.len());
    for (table, layout, hash) in generated {
        writeln!(out, "// {}", table.name())?;
        out.write_all(render(&table, layout, &manifest.style).as_bytes())?;
        summaries.push(TableSummary {
            name: table.name().to_string(),
            rows: table.len(),
            arity: table.arity(),
            hash,
        });
    }
    out.flush()?;

    Ok(summaries)
}
