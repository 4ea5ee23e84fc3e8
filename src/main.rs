//! Terminal front end for the alumni election.
//!
//! Each invocation is one session: a voter signs in, votes and is done; an
//! administrator signs in, runs one console operation and is signed out.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};
use thiserror::Error;

use election_client::{
    aggregate,
    logging::{self, LOG_CONFIG_FILE},
    model::{
        api::{AdminCredentials, ExportFormat},
        common::{candidate, Candidate, NewCandidate, Position},
    },
    views::{
        admin::AdminView,
        confirmation::Confirmation,
        login,
        results::{self, ResultsView},
        voting::VotingView,
        Notice,
    },
    ApiClient, Config, Session,
};

const PROGRAM_NAME: &str = "election";

const ABOUT_TEXT: &str = "Vote in, follow and administer the alumni election.

Settings are read from `Election.toml` and `ELECTION_*` environment variables.

EXIT CODES:
     0: Success.
     1: The requested action failed; the reason is printed.
     2: Error.";

const API_URL: &str = "API_URL";
const DOWNLOAD_DIR: &str = "DOWNLOAD_DIR";
const CODE: &str = "CODE";
const ONCE: &str = "ONCE";
const USERNAME: &str = "USERNAME";
const PASSWORD: &str = "PASSWORD";
const NAME: &str = "NAME";
const POSITION: &str = "POSITION";
const BIO: &str = "BIO";
const ID: &str = "ID";
const YES: &str = "YES";
const COUNT: &str = "COUNT";
const FORMAT: &str = "FORMAT";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .arg(
            Arg::new(API_URL)
                .long("api-url")
                .help("Base URL of the election API, overriding the configured one")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(DOWNLOAD_DIR)
                .long("download-dir")
                .help("Directory exports and code lists are saved to")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("vote")
                .about("Sign in with a voting code and cast a ballot")
                .arg(
                    Arg::new(CODE)
                        .help("The voting code; asked for if not given")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("results")
                .about("Show the live results")
                .arg(
                    Arg::new(ONCE)
                        .long("once")
                        .help("Print the results once instead of following them")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("settings").about("Show the voting window"))
        .subcommand(admin_cli())
}

fn admin_cli() -> Command {
    Command::new("admin")
        .about("Run an administrator console operation")
        .subcommand_required(true)
        .arg(
            Arg::new(USERNAME)
                .long("username")
                .default_value("admin")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(PASSWORD)
                .long("password")
                .env("ELECTION_ADMIN_PASSWORD")
                .hide_env_values(true)
                .help("Asked for if not given")
                .action(ArgAction::Set),
        )
        .subcommand(Command::new("candidates").about("List the candidates by position"))
        .subcommand(
            Command::new("add-candidate")
                .about("Add a candidate")
                .arg(Arg::new(NAME).required(true).action(ArgAction::Set))
                .arg(
                    Arg::new(POSITION)
                        .long("position")
                        .required(true)
                        .value_parser(|s: &str| s.parse::<Position>())
                        .action(ArgAction::Set),
                )
                .arg(Arg::new(BIO).long("bio").action(ArgAction::Set)),
        )
        .subcommand(
            Command::new("remove-candidate")
                .about("Remove a candidate")
                .arg(Arg::new(ID).required(true).action(ArgAction::Set))
                .arg(
                    Arg::new(YES)
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("voters").about("List the issued voting codes"))
        .subcommand(
            Command::new("generate")
                .about("Generate voting codes and save them to `voting-codes.txt`")
                .arg(
                    Arg::new(COUNT)
                        .required(true)
                        .value_parser(clap::value_parser!(u32))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Download the results as CSV or PDF")
                .arg(
                    Arg::new(FORMAT)
                        .required(true)
                        .value_parser(|s: &str| s.parse::<ExportFormat>())
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(Command::new("results").about("Show the results tab"))
}

/// Errors that end the program.
#[derive(Debug, Error)]
enum Error {
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
    #[error(transparent)]
    Client(#[from] election_client::Error),
    #[error("Failed to read from the terminal: {0}")]
    Terminal(#[from] io::Error),
}

/// Print a question and read one line of the answer. Running out of input
/// is an error, so a closed terminal can never be asked again.
fn ask(input: &mut impl BufRead, question: &str) -> io::Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"));
    }
    Ok(answer.trim().to_string())
}

/// Ask until the answer is a number from 1 to `count`, returning its index.
fn pick(input: &mut impl BufRead, question: &str, count: usize) -> io::Result<usize> {
    loop {
        match ask(input, question)?.parse::<usize>() {
            Ok(number) if (1..=count).contains(&number) => return Ok(number - 1),
            _ => println!("Enter a number between 1 and {count}"),
        }
    }
}

fn confirm(question: &str) -> bool {
    ask(&mut io::stdin().lock(), &format!("{question} [y/N] "))
        .map(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

/// Print the notice and turn it into the exit code of the action.
fn report(notice: Notice) -> ExitCode {
    println!("{notice}");
    if notice.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn vote(api: &ApiClient, args: &ArgMatches) -> Result<ExitCode, Error> {
    let mut session = Session::new();
    let code = match args.get_one::<String>(CODE) {
        Some(code) => code.clone(),
        None => ask(&mut io::stdin().lock(), "Voting code: ")?,
    };
    if let Err(notice) = login::submit(api, &mut session, &code).await {
        return Ok(report(notice));
    }

    let mut view = match VotingView::enter(api, &session).await {
        Ok(view) => view,
        Err(_) => return Ok(ExitCode::FAILURE),
    };
    if let Some(notice) = view.error().cloned() {
        return Ok(report(notice));
    }

    let groups: Vec<(Position, Vec<Candidate>)> = view
        .groups()
        .into_iter()
        .map(|(position, candidates)| (position, candidates.into_iter().cloned().collect()))
        .collect();
    for (position, candidates) in groups {
        println!("\n{position}");
        if candidates.is_empty() {
            println!("  No candidates");
            continue;
        }
        for (number, candidate) in candidates.iter().enumerate() {
            println!("  {}. {}", number + 1, candidate.name);
            if let Some(bio) = &candidate.bio {
                println!("     {bio}");
            }
        }
        loop {
            let index = pick(
                &mut io::stdin().lock(),
                &format!("Choice for {position}: "),
                candidates.len(),
            )?;
            match view.choose(position, &candidates[index].id) {
                Ok(()) => break,
                Err(notice) => println!("{notice}"),
            }
        }
    }

    match view.submit(api, &mut session).await {
        Ok(_) => {
            println!("\n{}", Confirmation);
            Ok(ExitCode::SUCCESS)
        }
        Err(notice) => Ok(report(notice)),
    }
}

async fn follow_results(api: &ApiClient, config: &Config, once: bool) -> Result<ExitCode, Error> {
    if once {
        let tallies = aggregate::tally(&api.results().await?);
        println!("{}", results::render(&tallies));
        return Ok(ExitCode::SUCCESS);
    }

    let mut view = ResultsView::open(api, config);
    while let Some(tallies) = view.refresh().await {
        println!("Results at {}\n", Utc::now().format("%H:%M:%S"));
        println!("{}", results::render(tallies));
    }
    view.close().await;
    Ok(ExitCode::SUCCESS)
}

async fn settings(api: &ApiClient) -> Result<ExitCode, Error> {
    let settings = api.settings().await?;
    let open = settings.is_open_at(Utc::now().naive_utc());
    println!("Voting opens:  {} UTC", settings.start_time);
    println!("Voting closes: {} UTC", settings.end_time);
    println!("Voting is {}", if open { "open" } else { "closed" });
    Ok(ExitCode::SUCCESS)
}

async fn admin(api: &ApiClient, config: &Config, args: &ArgMatches) -> Result<ExitCode, Error> {
    // Required argument with a default is guaranteed to be present.
    let username: &String = args.get_one(USERNAME).unwrap();
    let password = match args.get_one::<String>(PASSWORD) {
        Some(password) => password.clone(),
        None => ask(&mut io::stdin().lock(), "Password: ")?,
    };

    let mut session = Session::new();
    let mut view = AdminView::new(config);
    if let Err(notice) = view
        .login(api, &mut session, &AdminCredentials::new(username, password))
        .await
    {
        return Ok(report(notice));
    }

    let exit_code = match args.subcommand() {
        Some(("candidates", _)) => {
            for (position, candidates) in candidate::by_position(view.candidates()) {
                println!("{position}");
                for candidate in candidates {
                    println!("  {} ({})", candidate.name, candidate.id);
                }
            }
            ExitCode::SUCCESS
        }
        Some(("add-candidate", args)) => {
            let name: &String = args.get_one(NAME).unwrap();
            let position = *args.get_one::<Position>(POSITION).unwrap();
            let bio = args.get_one::<String>(BIO).cloned();
            let candidate = NewCandidate::new(name, position, bio);
            match view.add_candidate(api, &session, &candidate).await {
                Ok(notice) | Err(notice) => report(notice),
            }
        }
        Some(("remove-candidate", args)) => {
            let id: &String = args.get_one(ID).unwrap();
            let skip_confirmation = args.get_flag(YES);
            match view.candidates().iter().find(|c| &c.id == id).cloned() {
                None => report(Notice::Failure(format!("No candidate with ID {id}"))),
                Some(candidate) => {
                    let removal = view
                        .remove_candidate(api, &session, &candidate, |prompt| {
                            skip_confirmation || confirm(prompt)
                        })
                        .await;
                    match removal {
                        Ok(Some(notice)) | Err(notice) => report(notice),
                        Ok(None) => ExitCode::SUCCESS,
                    }
                }
            }
        }
        Some(("voters", _)) => {
            let summary = view.voter_summary();
            println!(
                "{} issued, {} used, {} active",
                summary.issued, summary.used, summary.active
            );
            for voter in view.voters() {
                match voter.voted_at {
                    Some(voted_at) => println!("  {}  used {voted_at}", voter.code),
                    None if voter.has_voted => println!("  {}  used", voter.code),
                    None => println!("  {}", voter.code),
                }
            }
            ExitCode::SUCCESS
        }
        Some(("generate", args)) => {
            let count = *args.get_one::<u32>(COUNT).unwrap();
            match view.generate_codes(api, &session, count).await {
                Ok(notice) => {
                    println!("{notice}");
                    for code in view.generated() {
                        println!("  {code}");
                    }
                    match view.save_codes() {
                        Ok(path) => {
                            println!("Saved to {}", path.display());
                            ExitCode::SUCCESS
                        }
                        Err(notice) => report(notice),
                    }
                }
                Err(notice) => report(notice),
            }
        }
        Some(("export", args)) => {
            let format = *args.get_one::<ExportFormat>(FORMAT).unwrap();
            match view.export(api, &session, format).await {
                Ok(path) => {
                    println!("Saved to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(notice) => report(notice),
            }
        }
        Some(("results", _)) => {
            println!("{}", results::render(view.results()));
            ExitCode::SUCCESS
        }
        // Subcommand is required.
        _ => unreachable!(),
    };

    view.logout(&mut session);
    Ok(exit_code)
}

async fn run(args: &ArgMatches) -> Result<ExitCode, Error> {
    let mut config = Config::load()?;
    if let Some(api_url) = args.get_one::<String>(API_URL) {
        config = config.with_api_url(api_url);
    }
    if let Some(download_dir) = args.get_one::<PathBuf>(DOWNLOAD_DIR) {
        config = config.with_download_dir(download_dir);
    }
    info!("Using election API at {}", config.api_url());
    let api = ApiClient::new(&config)?;

    match args.subcommand() {
        Some(("vote", args)) => vote(&api, args).await,
        Some(("results", args)) => follow_results(&api, &config, args.get_flag(ONCE)).await,
        Some(("settings", _)) => settings(&api).await,
        Some(("admin", args)) => admin(&api, &config, args).await,
        // Subcommand is required.
        _ => unreachable!(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli().get_matches();

    let result = match logging::init(LOG_CONFIG_FILE) {
        Ok(()) => {
            info!("Initialised logging");
            run(&args).await
        }
        Err(err) => Err(Error::Logging(err)),
    };

    result.unwrap_or_else(|err| {
        error!("{err}");
        error!("Critical failure, shutting down");
        eprintln!("{err}");
        ExitCode::from(2)
    })
}
