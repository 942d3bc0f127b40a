use std::io::Write;
use std::sync::Once;

use chrono::Utc;

use crate::config::LogFormat;

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are no-ops.
///
/// Default filter is `info`, `RUST_LOG` overrides it.
pub fn init(format: LogFormat) {
    INIT.call_once(|| {
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

        builder.format(move |buf, record| {
            let ts = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
            match format {
                LogFormat::Json => {
                    let obj = serde_json::json!({
                        "ts": ts,
                        "level": record.level().to_string(),
                        "target": record.target(),
                        "msg": record.args().to_string(),
                    });
                    writeln!(buf, "{}", obj)
                }
                LogFormat::Text => writeln!(
                    buf,
                    "{} {} {} {}",
                    ts,
                    record.level(),
                    record.target(),
                    record.args()
                ),
            }
        });

        if let Err(e) = builder.try_init() {
            eprintln!("logger already installed, keeping it: {e}");
        }
    });
}
