use chrono::{NaiveDate, Utc};
use clap::Parser;
use sirup_monitor::application::init::{init, InitOptions};
use sirup_monitor::application::{
    AuthService, BackupService, ConfigService, ListingQuery, NewsChanges, NewsService, OpdService,
    ProgressService, ReportService, SettingsService, UserChanges, UserService,
};
use sirup_monitor::cli::{
    self, BackupCommand, Cli, Commands, ListingArgs, NewsCommand, OpdCommand, ProgressCommand,
    UserCommand,
};
use sirup_monitor::domain::{ProgressUpdate, Role};
use sirup_monitor::error::MonitorError;
use sirup_monitor::infrastructure::{FileSystemRepository, MonitorRepository, Renderer};
use sirup_monitor::web;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr, filtered by `SIRUP_LOG`
fn init_tracing(serving: bool) {
    let default = if serving { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("SIRUP_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_date(value: &str) -> Result<NaiveDate, MonitorError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        MonitorError::Invalid(format!("date must be YYYY-MM-DD, got '{}'", value))
    })
}

fn parse_role(value: &str) -> Result<Role, MonitorError> {
    Role::from_str(value).map_err(MonitorError::Invalid)
}

fn listing_query(args: ListingArgs) -> ListingQuery {
    ListingQuery {
        search: args.search.unwrap_or_default(),
        page: args.page,
        page_size: args.page_size,
    }
}

fn run(cli: Cli) -> Result<(), MonitorError> {
    match cli.command {
        Commands::Init {
            path,
            fiscal_year,
            admin_user,
            admin_password,
        } => init(
            &path,
            &InitOptions {
                fiscal_year,
                admin_username: admin_user,
                admin_password,
            },
        ),
        Commands::Login { username, password } => {
            let repo = FileSystemRepository::discover()?;
            let user = AuthService::new(repo).login(&username, &password)?;
            println!("Logged in as {} ({})", user.username, user.role);
            Ok(())
        }
        Commands::Logout => {
            let repo = FileSystemRepository::discover()?;
            if AuthService::new(repo).logout()? {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
            Ok(())
        }
        Commands::Whoami => {
            let repo = FileSystemRepository::discover()?;
            match AuthService::new(repo).current_user()? {
                Some(user) => println!("{} ({}) - {}", user.username, user.role, user.name),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Commands::Opd(command) => run_opd(command),
        Commands::Progress(command) => run_progress(command),
        Commands::News(command) => run_news(command),
        Commands::User(command) => run_user(command),
        Commands::Settings { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = SettingsService::new(repo);

            if list {
                print!("{}", cli::format_settings(&service.list()?));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: sirup settings [--list | <key> [<value>]]");
                println!("Valid keys: pejabat_nama, pejabat_nip, pejabat_jabatan, ta (read-only)");
            }
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                print!("{}", cli::format_config(&service.list()?));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: sirup config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: {}",
                    sirup_monitor::application::manage_config::CONFIG_KEYS.join(", ")
                );
            }
            Ok(())
        }
        Commands::Recap(args) => {
            let repo = FileSystemRepository::discover()?;
            let service = ReportService::new(repo);
            print!("{}", cli::format_summary(&service.summary()?));
            println!();
            print!("{}", cli::format_progress_page(&service.recap(&listing_query(args))?));
            Ok(())
        }
        Commands::Report { listing, html } => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let report = ReportService::new(repo).report(&listing_query(listing))?;

            match html {
                Some(path) => {
                    let renderer = Renderer::new()?;
                    let ta = report.page.ta.clone();
                    let document = renderer.render(
                        "report.html",
                        minijinja::context! { config, ta, active => "laporan", report },
                    )?;
                    fs::write(&path, document)?;
                    println!("Wrote report to {}", path.display());
                }
                None => print!("{}", cli::format_progress_page(&report.page)),
            }
            Ok(())
        }
        Commands::Tv => {
            let repo = FileSystemRepository::discover()?;
            print!("{}", cli::format_tv(&ReportService::new(repo).tv()?));
            Ok(())
        }
        Commands::Backup(command) => {
            let repo = FileSystemRepository::discover()?;
            let service = BackupService::new(repo);
            match command {
                BackupCommand::Export { file } => {
                    let data = service.export(&file)?;
                    println!(
                        "Exported {} OPDs, {} news items and {} users to {}",
                        data.opds.len(),
                        data.news.len(),
                        data.users.len(),
                        file.display()
                    );
                }
                BackupCommand::Restore { file } => {
                    let data = service.restore(&file)?;
                    println!(
                        "Restored {} OPDs, {} news items and {} users from {}",
                        data.opds.len(),
                        data.news.len(),
                        data.users.len(),
                        file.display()
                    );
                }
            }
            Ok(())
        }
        Commands::Serve { addr } => {
            let repo = FileSystemRepository::discover()?;
            let addr = match addr {
                Some(addr) => addr,
                None => repo.load_config()?.listen_addr,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime
                .block_on(web::serve(repo, &addr))
                .map_err(|e| MonitorError::Server(format!("{:#}", e)))
        }
    }
}

fn run_opd(command: OpdCommand) -> Result<(), MonitorError> {
    let repo = FileSystemRepository::discover()?;
    let service = OpdService::new(repo);

    match command {
        OpdCommand::List { search } => {
            println!("{}", cli::format_opd_list(&service.list(search.as_deref())?));
        }
        OpdCommand::Add { name, pagu, id } => {
            let opd = service.add(&name, pagu, id.as_deref())?;
            println!("Added OPD {} ({})", opd.id, opd.name);
        }
        OpdCommand::Update { id, name, pagu } => {
            let opd = service.update(&id, name.as_deref(), pagu)?;
            println!("Updated OPD {} ({})", opd.id, opd.name);
        }
        OpdCommand::Remove { id } => {
            let opd = service.remove(&id)?;
            println!("Removed OPD {} ({})", opd.id, opd.name);
        }
    }
    Ok(())
}

fn run_progress(command: ProgressCommand) -> Result<(), MonitorError> {
    let repo = FileSystemRepository::discover()?;
    let service = ProgressService::new(repo);

    match command {
        ProgressCommand::Show { opd_id } => {
            let (opd, row) = service.show(&opd_id)?;
            print!("{}", cli::format_progress_row(&opd, &row));
        }
        ProgressCommand::Set {
            opd_id,
            penyedia_paket,
            penyedia_pagu,
            swakelola_paket,
            swakelola_pagu,
            pds_paket,
            pds_pagu,
        } => {
            let update = ProgressUpdate {
                penyedia_paket,
                penyedia_pagu,
                swakelola_paket,
                swakelola_pagu,
                pds_paket,
                pds_pagu,
            };
            let row = service.set(&opd_id, &update)?;
            println!(
                "Updated {}: {} paket, pagu {}",
                row.opd_id,
                row.total_paket(),
                sirup_monitor::domain::format::format_report_decimal(row.total_pagu())
            );
        }
        ProgressCommand::Template { output } => {
            let (file_name, csv) = service.template()?;
            match output {
                Some(path) if path.as_os_str() == "-" => {
                    std::io::stdout().write_all(csv.as_bytes())?;
                }
                other => {
                    let path = other.unwrap_or_else(|| PathBuf::from(file_name));
                    fs::write(&path, csv)?;
                    println!("Wrote template to {}", path.display());
                }
            }
        }
        ProgressCommand::Import { file } => {
            let rows = service.import(&file)?;
            println!("Imported {} rows from {}", rows.len(), file.display());
        }
        ProgressCommand::Finalize { yes } => {
            if !yes {
                return Err(MonitorError::Invalid(
                    "finalize overwrites every previous percentage; pass --yes to confirm"
                        .to_string(),
                ));
            }
            let count = service.finalize()?;
            println!("Finalized {} rows", count);
        }
    }
    Ok(())
}

fn run_news(command: NewsCommand) -> Result<(), MonitorError> {
    let repo = FileSystemRepository::discover()?;
    let service = NewsService::new(repo.clone());

    match command {
        NewsCommand::List => println!("{}", cli::format_news_list(&service.list()?)),
        NewsCommand::Show { id } => print!("{}", cli::format_news_item(&service.show(&id)?)),
        NewsCommand::Add {
            title,
            excerpt,
            date,
        } => {
            let date = match date {
                Some(value) => parse_date(&value)?,
                None => repo.load_config()?.local_time(Utc::now()).date(),
            };
            let item = service.add(&title, &excerpt, date)?;
            println!("Added news {} ({})", item.id, item.title);
        }
        NewsCommand::Update {
            id,
            title,
            excerpt,
            date,
        } => {
            let changes = NewsChanges {
                title,
                excerpt,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let item = service.update(&id, changes)?;
            println!("Updated news {} ({})", item.id, item.title);
        }
        NewsCommand::Remove { id } => {
            let item = service.remove(&id)?;
            println!("Removed news {} ({})", item.id, item.title);
        }
    }
    Ok(())
}

fn run_user(command: UserCommand) -> Result<(), MonitorError> {
    let repo = FileSystemRepository::discover()?;
    let service = UserService::new(repo);

    match command {
        UserCommand::List => print!("{}", cli::format_user_list(&service.list()?)),
        UserCommand::Add {
            username,
            name,
            password,
            role,
        } => {
            let user = service.add(&username, &name, &password, parse_role(&role)?)?;
            println!("Added user {} ({}, {})", user.id, user.username, user.role);
        }
        UserCommand::Update {
            id,
            name,
            password,
            role,
        } => {
            let changes = UserChanges {
                name,
                password,
                role: role.as_deref().map(parse_role).transpose()?,
            };
            let user = service.update(&id, changes)?;
            println!("Updated user {} ({}, {})", user.id, user.username, user.role);
        }
        UserCommand::Remove { id } => {
            let user = service.remove(&id)?;
            println!("Removed user {} ({})", user.id, user.username);
        }
    }
    Ok(())
}
