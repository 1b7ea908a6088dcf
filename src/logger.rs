use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        let style = buf.default_level_style(record.level());
        // crate-internal targets are noise on a one-shot converter
        let module = record
            .module_path()
            .and_then(|path| path.strip_prefix("dem2bvh::"))
            .unwrap_or("");
        write!(
            buf,
            "{} {style}{:<5}{style:#} ",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
        )?;
        if !module.is_empty() {
            write!(buf, "{}: ", module)?;
        }
        writeln!(buf, "{}", record.args())
    });
    builder
}

/// Install the global logger. A second call is a no-op.
pub fn init_logger() {
    let _ = builder().try_init();
}
