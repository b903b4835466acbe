use std::io::Write;

use super::{find_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitcas_core::object::{ContentSource, FileContentSource, Kind, Object, ReadContentSource};
use gitcas_core::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally create an object from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .possible_values(&["blob", "tree", "commit"])
                .default_value("blob")
                .help("Specify the type"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(
            Arg::with_name("literally")
                .long("literally")
                .help("Bypass validity checks"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let object = object_from_args(app, &args)?;

    if !args.is_present("literally") && !object.is_valid()? {
        return Err(format!("corrupt {}", object.kind()).into());
    }

    if args.is_present("w") {
        let repo = find_repo::from_current_dir()?;
        repo.put_loose_object(&object)?;
    }

    writeln!(app, "{}", object.id())?;

    Ok(())
}

fn object_from_args(app: &mut App, args: &ArgMatches) -> Result<Object> {
    let kind: Kind = args.value_of("t").unwrap_or("blob").parse()?;
    let content_source = content_source_from_args(app, &args)?;
    let object = Object::new(kind, content_source)?;
    Ok(object)
}

fn content_source_from_args(app: &mut App, args: &ArgMatches) -> Result<Box<dyn ContentSource>> {
    match (args.is_present("stdin"), args.value_of("file")) {
        (false, Some(file)) => Ok(Box::new(FileContentSource::new(file)?)),
        (true, None) => Ok(Box::new(ReadContentSource::new(&mut app.stdin)?)),
        _ => Err("content source must be either --stdin or a file path".into()),
    }
}
