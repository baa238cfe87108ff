use std::env;
use std::fs;

use carbonmap::config::Config;
use carbonmap::loader::DatasetLoader;
use carbonmap::source::FileSource;

#[tokio::main]
async fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "data/intensity.csv".to_string());
    let mut cfg = Config::from_env();
    cfg.source_path = Some(path.clone());

    let loader = DatasetLoader::new(cfg, Box::new(FileSource::at(&path)));
    let outcome = loader.load().await;

    if outcome.used_fallback {
        eprintln!(
            "ingest failed for {}: {}",
            path,
            outcome.error.as_deref().unwrap_or("unknown")
        );
        std::process::exit(2);
    }

    let out_path = format!("{}.manifest.json", path);
    let payload = match serde_json::to_string_pretty(&outcome.manifest) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("failed to encode manifest: {}", err);
            std::process::exit(3);
        }
    };
    if let Err(err) = fs::write(&out_path, payload) {
        eprintln!("failed to write {}: {}", out_path, err);
        std::process::exit(4);
    }
    println!("wrote manifest {}", out_path);
}
