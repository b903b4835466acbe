use std::io::{Read, Write};

use super::{find_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitcas_core::object::{Id, Kind, TreeBuilder};
use gitcas_core::path::FileMode;
use gitcas_core::repo::Repo;
use tracing::debug;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("mktree")
        .about("Build a tree object from ls-tree formatted text on stdin")
        .arg(
            Arg::with_name("missing")
                .long("missing")
                .help("Allow entries that refer to objects not in the repository"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_current_dir()?;
    let allow_missing = args.is_present("missing");

    let mut input = Vec::new();
    app.stdin.read_to_end(&mut input)?;

    let mut builder = TreeBuilder::new();

    for line in input.split(|b| *b == b'\n').filter(|l| !l.is_empty()) {
        let (mode, kind, id, name) = parse_line(line)?;

        // Submodule commits live in another repository.
        if !allow_missing && mode != FileMode::Submodule && !repo.has_loose_object(&id) {
            return Err(format!(
                "entry {} object {} is unavailable",
                String::from_utf8_lossy(name),
                id
            )
            .into());
        }

        let expected = if mode == FileMode::Submodule {
            Kind::Commit
        } else {
            mode.kind()
        };
        if kind != expected {
            return Err(format!(
                "entry {} has mode {} but type {}",
                String::from_utf8_lossy(name),
                mode,
                kind
            )
            .into());
        }

        builder.insert(mode, name, id)?;
    }

    debug!(entries = builder.len(), "building tree");
    let id = repo.write_object(Kind::Tree, builder.build())?;
    writeln!(app, "{}", id)?;

    Ok(())
}

/// Parse one line of `git ls-tree` output:
/// `<mode> SP <type> SP <id> TAB <name>`.
fn parse_line(line: &[u8]) -> Result<(FileMode, Kind, Id, &[u8])> {
    let bad_line = || format!("input format error: {}", String::from_utf8_lossy(line));

    let tab = line
        .iter()
        .position(|b| *b == b'\t')
        .ok_or_else(bad_line)?;
    let (meta, name) = (&line[..tab], &line[tab + 1..]);

    let meta = std::str::from_utf8(meta).map_err(|_| bad_line())?;
    let fields: Vec<&str> = meta.split(' ').collect();
    if fields.len() != 3 {
        return Err(bad_line().into());
    }

    let mode = FileMode::from_octal_slice(fields[0].as_bytes()).ok_or_else(bad_line)?;
    let kind: Kind = fields[1].parse()?;
    let id: Id = fields[2].parse().map_err(gitcas_core::repo::Error::from)?;

    Ok((mode, kind, id, name))
}
