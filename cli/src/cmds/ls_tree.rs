use std::io::Write;

use super::{find_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitcas_core::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the contents of a tree object")
        .arg(
            Arg::with_name("name-only")
                .long("name-only")
                .help("List only filenames, one per line"),
        )
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("The tree object ID (40 hex digits)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let address = args.value_of("tree").unwrap_or_default();
    let repo = find_repo::from_current_dir()?;

    let entries = repo.read_tree(address)?;
    let name_only = args.is_present("name-only");

    for entry in &entries {
        if name_only {
            app.write_all(entry.name())?;
            app.write_all(b"\n")?;
        } else {
            writeln!(app, "{}", entry)?;
        }
    }

    Ok(())
}
