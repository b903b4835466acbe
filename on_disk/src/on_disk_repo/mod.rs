//! A repository that stores loose objects on the local file system.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use gitcas_core::compress::{self, CompressionLevel};
use gitcas_core::object::{Id, Object, ObjectReader};
use gitcas_core::repo::{Error, Repo, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Implementation of `Repo` that stores content on the local file system.
///
/// Each object lives in its own zlib-compressed file at
/// `.git/objects/<first 2 hex digits>/<remaining 38 hex digits>`.
///
/// An `OnDisk` holds no mutable state beyond its paths, so a single instance
/// may be shared between threads. Writers of the same object may race; the
/// loser of the race sees the winner's identical file and reports success.
#[derive(Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    git_dir: PathBuf,
    objects_dir: PathBuf,
    compression: CompressionLevel,
}

impl OnDisk {
    /// Open an existing on-disk git repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory should
    /// exist at this path. Use `init` function to create an empty on-disk repository if
    /// necessary.
    pub fn new(work_dir: &Path) -> Result<Self> {
        let work_dir = work_dir.to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let git_dir = work_dir.join(".git");
        if !git_dir.exists() {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        Ok(Self::with_dirs(work_dir, git_dir))
    }

    /// Creates a new, empty git repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init(work_dir: &Path) -> Result<Self> {
        let git_dir = work_dir.join(".git");
        if git_dir.exists() {
            return Err(Error::GitDirShouldntExist(git_dir));
        }

        fs::create_dir_all(&git_dir)?;
        create_layout(&git_dir)?;

        info!(git_dir = %git_dir.display(), "initialized empty repository");

        Ok(Self::with_dirs(work_dir.to_path_buf(), git_dir))
    }

    fn with_dirs(work_dir: PathBuf, git_dir: PathBuf) -> Self {
        let objects_dir = git_dir.join("objects");
        OnDisk {
            work_dir,
            git_dir,
            objects_dir,
            compression: CompressionLevel::default(),
        }
    }

    /// Use a different compression level for objects written from now on.
    ///
    /// Objects already stored are unaffected; reading does not depend on
    /// the level an object was written with.
    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the path to the `.git/objects` directory.
    pub fn objects_dir(&self) -> &Path {
        self.objects_dir.as_path()
    }

    /// Return the path at which the loose object with this ID is (or would be) stored.
    pub fn loose_object_path(&self, id: &Id) -> PathBuf {
        let (shard, file) = shard_names(id);
        self.objects_dir.join(shard).join(file)
    }

    fn create_shard_dir(&self, id: &Id) -> io::Result<()> {
        let (shard, _) = shard_names(id);
        let shard_dir = self.objects_dir.join(shard);

        match fs::create_dir(&shard_dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && shard_dir.is_dir() => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// Split the hex form of `id` into its 2-digit directory name and
/// 38-digit file name.
fn shard_names(id: &Id) -> (String, String) {
    let mut hex = id.to_string();
    let file = hex.split_off(2);
    (hex, file)
}

impl Repo for OnDisk {
    fn put_loose_object(&self, object: &Object) -> Result<Id> {
        let id = *object.id();
        let path = self.loose_object_path(&id);

        if path.exists() {
            debug!(%id, "object already stored");
            return Ok(id);
        }

        self.create_shard_dir(&id)?;

        // Objects become visible only once fully written: the content goes
        // to a temporary file in the same file system and is then linked
        // into place without overwriting.
        let temp = NamedTempFile::new_in(&self.objects_dir)?;
        let mut encoder = compress::compress(temp, self.compression);
        object.write_canonical(&mut encoder)?;
        let temp = encoder.finish()?;

        let mut permissions = temp.as_file().metadata()?.permissions();
        permissions.set_readonly(true);
        temp.as_file().set_permissions(permissions)?;

        match temp.persist_noclobber(&path) {
            Ok(_) => {
                debug!(%id, kind = %object.kind(), len = object.len(), "wrote loose object");
            }
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(%id, "object stored concurrently by another writer");
            }
            Err(err) => return Err(err.error.into()),
        }

        Ok(id)
    }

    fn open_loose_object(&self, id: &Id) -> Result<ObjectReader<Box<dyn Read>>> {
        let path = self.loose_object_path(id);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(*id));
            }
            Err(err) => return Err(err.into()),
        };

        let inflater: Box<dyn Read> = Box::new(compress::decompress(BufReader::new(file)));
        let reader = ObjectReader::new(inflater)?;

        debug!(%id, kind = %reader.kind(), len = reader.len(), "opened loose object");
        Ok(reader)
    }

    fn has_loose_object(&self, id: &Id) -> bool {
        self.loose_object_path(id).is_file()
    }
}

/// Directories `git init` creates inside `.git`.
const LAYOUT_DIRS: &[&str] = &[
    "hooks",
    "info",
    "objects/info",
    "objects/pack",
    "refs/heads",
    "refs/tags",
];

/// Files `git init` creates inside `.git`, with their initial content.
/// Hook samples are intentionally left out.
const LAYOUT_FILES: &[(&str, &str)] = &[
    ("HEAD", "ref: refs/heads/main\n"),
    (
        "config",
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n",
    ),
    (
        "description",
        "Unnamed repository; edit this file 'description' to name the repository.\n",
    ),
    (
        "info/exclude",
        "# git ls-files --others --exclude-from=.git/info/exclude\n# Lines that start with '#' are comments.\n# For a project mostly in C, the following would be a good set of\n# exclude patterns (uncomment them if you want to use them):\n# *.[oa]\n# *~\n",
    ),
];

fn create_layout(git_dir: &Path) -> io::Result<()> {
    for dir in LAYOUT_DIRS {
        fs::create_dir_all(git_dir.join(dir))?;
    }

    for (name, content) in LAYOUT_FILES {
        fs::write(git_dir.join(name), content)?;
    }

    Ok(())
}
