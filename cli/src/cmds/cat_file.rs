use std::io::Write;

use super::{find_repo, App, Result};

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};
use gitcas_core::object::{tree, Id, Kind};
use gitcas_core::repo::{copy_verified, Error, Repo};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content, type, or size information for an object")
        .arg(
            Arg::with_name("p")
                .short("p")
                .help("Pretty-print the object's content"),
        )
        .arg(Arg::with_name("t").short("t").help("Show the object's type"))
        .arg(Arg::with_name("s").short("s").help("Show the object's size"))
        .group(
            ArgGroup::with_name("mode")
                .args(&["p", "t", "s"])
                .required(true),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The object ID (40 hex digits)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id: Id = args
        .value_of("object")
        .unwrap_or_default()
        .parse()
        .map_err(Error::from)?;
    let repo = find_repo::from_current_dir()?;

    // The header has been checked at this point; the content is only
    // inflated for -p.
    let reader = repo.open_loose_object(&id)?;

    if args.is_present("t") {
        writeln!(app, "{}", reader.kind())?;
        return Ok(());
    }
    if args.is_present("s") {
        writeln!(app, "{}", reader.len())?;
        return Ok(());
    }

    match reader.kind() {
        Kind::Tree => {
            let mut content = Vec::with_capacity(reader.len());
            copy_verified(&id, reader, &mut content)?;
            for entry in tree::parse(&content)? {
                writeln!(app, "{}", entry)?;
            }
        }
        Kind::Blob | Kind::Commit => {
            // Content is written exactly as stored; nothing is trimmed or added.
            copy_verified(&id, reader, app)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use crate::temp_cwd::TempCwd;
    use crate::App;

    use gitcas_core::object::{Kind, TreeBuilder};
    use gitcas_core::path::FileMode;
    use gitcas_core::repo::Repo;
    use gitcas_on_disk::OnDisk;

    #[test]
    #[serial]
    fn blob() {
        let dir = tempfile::tempdir().unwrap();
        let r = OnDisk::init(dir.path()).unwrap();
        let content = b"binary\0content\n\n  ".to_vec();
        let id = r.write_object(Kind::Blob, content.clone()).unwrap().to_string();

        let _tcwd = TempCwd::new(dir.path());

        let stdout = App::run_with_args(vec!["cat-file", "-p", id.as_str()]).unwrap();
        assert_eq!(stdout, content);

        let stdout = App::run_with_args(vec!["cat-file", "-t", id.as_str()]).unwrap();
        assert_eq!(stdout, b"blob\n");

        let stdout = App::run_with_args(vec!["cat-file", "-s", id.as_str()]).unwrap();
        assert_eq!(stdout, b"18\n");
    }

    #[test]
    #[serial]
    fn tree() {
        let dir = tempfile::tempdir().unwrap();
        let r = OnDisk::init(dir.path()).unwrap();
        let blob = r.write_object(Kind::Blob, b"hello\n".to_vec()).unwrap();
        let empty = r.write_object(Kind::Tree, vec![]).unwrap();

        let mut builder = TreeBuilder::new();
        builder
            .insert(FileMode::Normal, "file.txt", blob)
            .unwrap()
            .insert(FileMode::Tree, "subdir", empty)
            .unwrap();
        let id = r
            .write_object(Kind::Tree, builder.build())
            .unwrap()
            .to_string();

        let _tcwd = TempCwd::new(dir.path());

        let stdout = App::run_with_args(vec!["cat-file", "-p", id.as_str()]).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            "100644 blob ce013625030ba8dba906f756967f9e9ca394464a\tfile.txt\n\
             040000 tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\tsubdir\n"
        );

        let stdout = App::run_with_args(vec!["cat-file", "-t", id.as_str()]).unwrap();
        assert_eq!(stdout, b"tree\n");

        let stdout = App::run_with_args(vec!["cat-file", "-s", id.as_str()]).unwrap();
        assert_eq!(stdout, b"69\n");
    }

    #[test]
    #[serial]
    fn missing_object() {
        let dir = tempfile::tempdir().unwrap();
        OnDisk::init(dir.path()).unwrap();

        let _tcwd = TempCwd::new(dir.path());
        let err = App::run_with_args(vec![
            "cat-file",
            "-p",
            "ce013625030ba8dba906f756967f9e9ca394464a",
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "object ce013625030ba8dba906f756967f9e9ca394464a not found"
        );
    }

    #[test]
    #[serial]
    fn content_does_not_match_id() {
        let dir = tempfile::tempdir().unwrap();
        let r = OnDisk::init(dir.path()).unwrap();
        let id = r.write_object(Kind::Blob, b"jello\n".to_vec()).unwrap();

        // Move the stored file under another object's name.
        let hello = "ce013625030ba8dba906f756967f9e9ca394464a".parse().unwrap();
        let target = r.loose_object_path(&hello);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::rename(r.loose_object_path(&id), &target).unwrap();

        let _tcwd = TempCwd::new(dir.path());

        let stdout = App::run_with_args(vec![
            "cat-file",
            "-t",
            "ce013625030ba8dba906f756967f9e9ca394464a",
        ])
        .unwrap();
        assert_eq!(stdout, b"blob\n");

        let err = App::run_with_args(vec![
            "cat-file",
            "-p",
            "ce013625030ba8dba906f756967f9e9ca394464a",
        ])
        .unwrap_err();
        assert!(err.to_string().starts_with("malformed object: object content hashes to"));
    }

    #[test]
    fn invalid_address() {
        let err = App::run_with_args(vec!["cat-file", "-t", "ce0136"]).unwrap_err();
        assert!(err.to_string().starts_with("invalid object address"));
    }

    #[test]
    fn requires_one_mode() {
        assert!(App::run_with_args(vec![
            "cat-file",
            "ce013625030ba8dba906f756967f9e9ca394464a"
        ])
        .is_err());

        assert!(App::run_with_args(vec![
            "cat-file",
            "-p",
            "-t",
            "ce013625030ba8dba906f756967f9e9ca394464a"
        ])
        .is_err());
    }
}
