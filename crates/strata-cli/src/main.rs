use anyhow::{Context, Result, bail};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};
use strata_config::Config;
use strata_syntax::{HeadingLevel, NumberingPattern, dump, lower, outline, parse};

/// What to print for each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Outline,
    Tree,
    Nodes,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    mode: Mode,
    path: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut mode = Mode::Outline;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "--tree" => mode = Mode::Tree,
            "--nodes" => mode = Mode::Nodes,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ if path.is_some() => bail!("more than one path given"),
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    Ok(Args { mode, path })
}

/// Settings the renderer takes from the config file.
struct Render {
    mode: Mode,
    numbering: NumberingPattern,
    max_level: Option<HeadingLevel>,
    full_numbers: bool,
}

impl Render {
    fn render(&self, source: &str) -> String {
        let tree = parse(source);
        match self.mode {
            Mode::Tree => format!("{tree:#?}"),
            Mode::Nodes => dump(&lower(&tree)),
            Mode::Outline => {
                let mut out = String::new();
                for entry in outline(&lower(&tree)) {
                    if self.max_level.is_some_and(|max| entry.level > max) {
                        continue;
                    }
                    let indent = "  ".repeat(entry.level.as_usize() - 1);
                    let number = if self.full_numbers {
                        entry.number(&self.numbering)
                    } else {
                        entry.own_number(&self.numbering)
                    };
                    out.push_str(&format!("{indent}{number} {}\n", entry.title));
                }
                out
            }
        }
    }
}

/// The file itself, or every matching file below a directory.
fn input_files(path: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let files = config
            .source_files(path)
            .with_context(|| format!("Failed to list files under '{}'", path.display()))?;
        log::info!("{} files match '{}'", files.len(), config.include);
        Ok(files)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

fn run(args: Args, config: Config) -> Result<()> {
    let Some(path) = args.path.or_else(|| config.notes_path.clone()) else {
        bail!(
            "no path given and no notes_path in {}",
            Config::config_path().display()
        );
    };

    let render = Render {
        mode: args.mode,
        numbering: config
            .numbering_pattern()
            .context("Invalid numbering pattern")?,
        max_level: config.max_level(),
        full_numbers: config.full_numbers,
    };

    let files = input_files(&path, &config)?;
    let many = files.len() > 1;
    for file in files {
        let source = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
        log::debug!("rendering {}", file.display());
        if many {
            println!("==> {} <==", file.display());
        }
        print!("{}", render.render(&source));
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("strata-cli", String::as_str);
    let config_path = Config::config_path();

    let parsed = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} [--tree | --nodes] [PATH]");
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Config path: {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    run(parsed, config)
}
