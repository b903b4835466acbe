use crate::{App, Result};

mod cat_file;
mod find_repo;
mod hash_object;
mod init;
mod ls_tree;
mod mktree;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(cat_file::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(ls_tree::subcommand())
        .subcommand(mktree::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("cat-file", Some(m)) => cat_file::run(app, &m),
        ("hash-object", Some(m)) => hash_object::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("ls-tree", Some(m)) => ls_tree::run(app, &m),
        ("mktree", Some(m)) => mktree::run(app, &m),

        // clap exits with a usage message before we get here
        // if no subcommand (or an unknown one) was given.
        (name, _) => Err(format!("unknown command `{}`", name).into()),
    }
}
