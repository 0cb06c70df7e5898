use clap::Parser;
use lifu_records::config::cli::{Cli, Command, SequenceCommand, TableFormat, UserCommand};
use lifu_records::domain::sequence::TABLE_HEADER;
use lifu_records::utils::{logger, validation::Validate};
use lifu_records::{JsonRecord, RecordsConfig, Result, Sequence, User};

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => match RecordsConfig::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => RecordsConfig::default(),
    };

    logger::init_logger(
        cli.verbose || settings.verbose(),
        cli.log_json || settings.json_logs(),
    );

    tracing::debug!("CLI arguments: {:?}", cli);

    if let Err(e) = settings.validate().and_then(|_| run(&cli, &settings)) {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

fn run(cli: &Cli, settings: &RecordsConfig) -> Result<()> {
    match &cli.command {
        Command::Sequence(SequenceCommand::Table {
            from,
            format,
            params,
        }) => {
            let sequence = match from {
                Some(path) => Sequence::from_file(path)?,
                None => Sequence::from(params),
            };
            sequence.validate()?;

            match format {
                TableFormat::Text => print!("{}", render_table(&sequence)),
                TableFormat::Csv => print!("{}", sequence.table_to_csv()?),
                TableFormat::Tsv => print!("{}", sequence.table_to_tsv()?),
            }
        }
        Command::Sequence(SequenceCommand::Save { path, params }) => {
            let sequence = Sequence::from(params);
            sequence.validate()?;
            sequence.to_file(path)?;
            tracing::info!("📁 Sequence saved to: {}", path.display());
        }
        Command::User(UserCommand::Show { path, compact }) => {
            let user = User::from_file(path)?;
            println!("{}", user.to_json(*compact || settings.compact_output())?);
        }
        Command::User(UserCommand::Save { user, path }) => {
            let user = User::from(user);
            let path = match path {
                Some(path) => path.clone(),
                None => {
                    user.validate()?;
                    user.storage_path(settings.users_dir())
                }
            };

            if path.exists() {
                tracing::warn!("Overwriting existing file {}", path.display());
            }
            user.to_file(&path)?;
            tracing::info!("📁 User '{}' saved to: {}", user.id, path.display());
        }
    }

    Ok(())
}

fn render_table(sequence: &Sequence) -> String {
    let rows: Vec<[String; 3]> = sequence
        .to_table()
        .iter()
        .map(|row| [row.name.to_string(), row.value.to_string(), row.unit.to_string()])
        .collect();

    let mut widths = TABLE_HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = TABLE_HEADER.map(str::to_string);
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = format!(
            "{:<w0$}  {:>w1$}  {:<w2$}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
