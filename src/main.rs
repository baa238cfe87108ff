use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use tokio::time::{sleep, Duration};

use carbonmap::config::Config;
use carbonmap::loader::{DatasetLoader, LoadOutcome};
use carbonmap::logging::{log, obj, v_num, v_str, Domain, Level};
use carbonmap::resolve::resolve_instant;
use carbonmap::source::SourceKind;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let source = SourceKind::from_env().build(&cfg)?;
    let loader = DatasetLoader::new(cfg.clone(), source);

    loop {
        let outcome = loader.load().await;
        report(&cfg, &outcome);

        if cfg.refresh_secs == 0 {
            break;
        }
        sleep(Duration::from_secs(cfg.refresh_secs)).await;
    }
    Ok(())
}

fn report(cfg: &Config, outcome: &LoadOutcome) {
    if let Some(err) = &outcome.error {
        log(
            Level::Warn,
            Domain::System,
            "degraded",
            obj(&[("error", v_str(err))]),
        );
    }
    log(
        Level::Info,
        Domain::System,
        "summary",
        obj(&[
            ("records", json!(outcome.records.len())),
            ("days", json!(outcome.index.days.len())),
            ("earliest", json!(outcome.manifest.earliest)),
            ("latest", json!(outcome.manifest.latest)),
        ]),
    );

    // A probe query shows the composed resolution path end to end: clamp the
    // wall clock into bounds, resolve the nearest day, then the nearest hour.
    if let Some(country) = &cfg.probe_country {
        let target = outcome.index.clamp(Utc::now());
        match resolve_instant(&outcome.records, &outcome.index.days, country, target) {
            Some(res) => log(
                Level::Info,
                Domain::Resolve,
                "probe",
                obj(&[
                    ("country", v_str(country)),
                    ("day", v_str(&res.day.to_rfc3339())),
                    ("diff_minutes", v_num(res.diff_minutes as f64)),
                    (
                        "direct_intensity",
                        res.record.map(|r| v_num(r.direct_intensity)).unwrap_or(json!(null)),
                    ),
                ]),
            ),
            None => log(
                Level::Warn,
                Domain::Resolve,
                "probe_no_data",
                obj(&[("country", v_str(country))]),
            ),
        }
    }
}
