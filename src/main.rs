// SPDX-License-Identifier: MPL-2.0
use locale_context::config;
use locale_context::i18n::{IntlContext, IntlProvider, Locale, LoaderTable, ProviderOptions};
use std::path::PathBuf;
use tracing::{info, warn};

const USAGE: &str = "\
Usage: locale-context [OPTIONS] [KEY...]

Prints the messages for KEY (or every message) in the resolved locale.

Options:
  --lang <code>       Start in this locale instead of detecting it
  --switch <code>     Switch to this locale afterwards and print again
  --lang-dir <dir>    Read <code>.toml bundles from this directory
  -h, --help          Show this help
";

struct Flags {
    lang: Option<String>,
    switch: Option<String>,
    lang_dir: Option<PathBuf>,
    keys: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        switch: args.opt_value_from_str("--switch")?,
        lang_dir: args.opt_value_from_str("--lang-dir")?,
        keys: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    };
    Ok(Some(flags))
}

/// Parses a locale flag, warning instead of failing on unsupported codes.
fn parse_locale_flag(flag: &str, value: Option<String>) -> Option<Locale> {
    let value = value?;
    match value.parse() {
        Ok(locale) => Some(locale),
        Err(err) => {
            warn!(flag, %err, "ignoring flag");
            None
        }
    }
}

fn print_messages(ctx: &IntlContext, keys: &[String]) {
    println!("[{}]", ctx.locale());
    if keys.is_empty() {
        for key in ctx.messages().keys() {
            println!("{} = {}", key, ctx.tr(key));
        }
    } else {
        for key in keys {
            println!("{} = {}", key, ctx.tr(key));
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_context=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(flags) = parse_flags()? else {
        print!("{USAGE}");
        return Ok(());
    };

    let (settings, warning) = config::load();
    if let Some(key) = warning {
        warn!(%key, "using default settings");
    }

    let mut options = ProviderOptions::new()
        .config(&settings)
        .default_locale(parse_locale_flag("--lang", flags.lang));
    if let Some(dir) = flags.lang_dir {
        options = options.loaders(LoaderTable::from_dir(dir));
    }

    let provider = IntlProvider::mount(options);
    let ctx = provider.ready().await;
    print_messages(&ctx, &flags.keys);

    if let Some(locale) = parse_locale_flag("--switch", flags.switch) {
        if provider.set_locale(locale) {
            let ctx = provider.ready().await;
            print_messages(&ctx, &flags.keys);
        } else {
            info!(%locale, "already active");
        }
    }

    Ok(())
}
