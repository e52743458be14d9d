use crate::areas::repository::Repository;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A miniature content-addressed version control system",
    long_about = "Gitlet is a miniature version control system modeled on a subset of git. \
    It stores files as immutable content-addressed blobs, groups them into commits forming \
    a directed acyclic graph, and synchronizes with sibling repositories on the same filesystem.",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for addition")]
    Add { file: String },
    #[command(about = "Create a new commit from the staged changes")]
    Commit { message: Option<String> },
    #[command(about = "Unstage a file, or stage it for removal")]
    Rm { file: String },
    #[command(about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(about = "Find commits by their exact message")]
    Find { message: String },
    #[command(about = "Show branches, staged changes, and untracked files")]
    Status,
    #[command(about = "Create a new branch at the current head")]
    Branch { name: String },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch { name: String },
    #[command(about = "Check out a commit and move the current branch to it")]
    Reset { commit: String },
    #[command(about = "Merge a branch into the current branch")]
    Merge { branch: String },
    #[command(name = "add-remote", about = "Register a remote repository by path")]
    AddRemote { name: String, path: String },
    #[command(name = "rm-remote", about = "Drop a remote registration")]
    RmRemote { name: String },
    #[command(about = "Append local commits to a remote branch")]
    Push { remote: String, branch: String },
    #[command(about = "Copy a remote branch into a local mirror branch")]
    Fetch { remote: String, branch: String },
    #[command(about = "Fetch a remote branch and merge it")]
    Pull { remote: String, branch: String },
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    if argv.is_empty() {
        println!("Please enter a command.");
        return Ok(());
    }

    // checkout's operand shapes hinge on a literal `--` operand, which
    // clap consumes as its escape token, so its argv is interpreted by
    // hand.
    if argv[0] == "checkout" {
        return run_checkout(&argv[1..]);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(err),
    };

    if !matches!(cli.command, Commands::Init) && !repository_present() {
        return Ok(());
    }
    let repository = open_repository()?;

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or(""))?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => repository.merge(branch)?,
        Commands::AddRemote { name, path } => repository.add_remote(name, path)?,
        Commands::RmRemote { name } => repository.rm_remote(name)?,
        Commands::Push { remote, branch } => repository.push(remote, branch)?,
        Commands::Fetch { remote, branch } => repository.fetch(remote, branch)?,
        Commands::Pull { remote, branch } => repository.pull(remote, branch)?,
    }

    Ok(())
}

/// `checkout -- <file>` / `checkout <commit> -- <file>` / `checkout <branch>`
fn run_checkout(operands: &[String]) -> Result<()> {
    if !repository_present() {
        return Ok(());
    }
    let repository = open_repository()?;

    match operands {
        [branch] => repository.checkout_branch(branch)?,
        [dashes, file] if dashes == "--" => repository.checkout_file(file)?,
        [commit, dashes, file] if dashes == "--" => repository.checkout_file_at(commit, file)?,
        _ => println!("Incorrect operands."),
    }

    Ok(())
}

/// Map clap's parse failures onto the prescribed user messages
fn report_parse_error(err: clap::Error) -> Result<()> {
    match err.kind() {
        ErrorKind::InvalidSubcommand => println!("No command with that name exists."),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.print()?,
        _ => println!("Incorrect operands."),
    }

    Ok(())
}

/// Every command except `init` requires an initialized repository
fn repository_present() -> bool {
    match std::env::current_dir() {
        Ok(pwd) if Repository::is_initialized(&pwd) => true,
        _ => {
            println!("Not in an initialized Gitlet directory.");
            false
        }
    }
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(pwd, Box::new(std::io::stdout()))
}
