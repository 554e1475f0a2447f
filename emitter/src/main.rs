use lutgen::{builtin_manifest, emit_manifest, load_manifest};
use std::env;
use std::io::{self, BufWriter};

fn main() {
    // Logs go to stderr; stdout carries only the tables
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Optional manifest path; built-in presets otherwise
    let manifest = match env::args().nth(1) {
        Some(path) => load_manifest(&path).unwrap_or_else(|e| {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }),
        None => builtin_manifest(),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match emit_manifest(&manifest, &mut out) {
        Ok(summaries) => {
            tracing::info!("Wrote {} table(s)", summaries.len());
        }
        Err(e) => {
            eprintln!("❌ Table generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
