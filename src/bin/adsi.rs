//! Provides the `adsi-cli` tool for inspecting a directory object.
//!
//! Usage: `adsi-cli [OPTIONS] [PATH]`
//!
//! Binds PATH (or the `path` from `--config`), prints its identity, and
//! optionally lists container children or group members.
//!
//! # Examples
//! ```text
//! adsi-cli LDAP://RootDSE
//! adsi-cli --children "LDAP://OU=Servers,DC=example,DC=com"
//! adsi-cli --config adsi.json --members "LDAP://CN=Admins,CN=Users,DC=example,DC=com"
//! ```

use std::path::PathBuf;
use std::process;

use adsi::{Client, Config, Object};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "adsi-cli", version, about = "Inspect an Active Directory object")]
struct Args {
    /// ADsPath of the object to bind.
    path: Option<String>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to create the namespace object on.
    #[arg(long)]
    server: Option<String>,

    /// User to bind as.
    #[arg(long)]
    user: Option<String>,

    /// Password for --user.
    #[arg(long)]
    password: Option<String>,

    /// List the children of a container.
    #[arg(long)]
    children: bool,

    /// List the members of a group.
    #[arg(long)]
    members: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = inspect(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn inspect(args: Args) -> adsi::Result<()> {
    let mut config = match &args.config {
        Some(file) => Config::load(file)?,
        None => Config::default(),
    };
    if args.server.is_some() {
        config.server = args.server;
    }
    if args.user.is_some() {
        config.username = args.user;
        config.password = args.password;
    }

    let Some(path) = args.path.or_else(|| config.path.clone()) else {
        eprintln!("Usage: adsi-cli [OPTIONS] <PATH>");
        eprintln!("  A path is required, on the command line or in --config.");
        process::exit(1);
    };

    let client = Client::from_config(&config)?;
    let object = client.open_with(&path, &config)?;

    print_object(&object)?;

    if args.children {
        let container = object.to_container()?;
        println!();
        for child in container.children()? {
            println!("  {}\t{}", child.class()?, child.name()?);
            child.close()?;
        }
        container.close()?;
    }

    if args.members {
        let group = object.to_group()?;
        println!();
        for member in group.members()? {
            println!("  {}", member.path()?);
            member.close()?;
        }
        group.close()?;
    }

    object.close()?;
    client.close()
}

fn print_object(object: &Object) -> adsi::Result<()> {
    println!("Name:   {}", object.name()?);
    println!("Class:  {}", object.class()?);
    match object.guid() {
        Ok(guid) => println!("GUID:   {guid}"),
        Err(err) => println!("GUID:   <{err}>"),
    }
    println!("Path:   {}", object.path()?);
    println!("Parent: {}", object.parent()?);
    println!("Schema: {}", object.schema()?);
    Ok(())
}
