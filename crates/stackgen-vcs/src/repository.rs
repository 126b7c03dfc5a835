//! Git repository initialization and the initial-commit sequence

use std::path::{Path, PathBuf};

use git2::{IndexAddOption, ObjectType, Repository, RepositoryInitOptions, Signature};
use tracing::debug;

use crate::error::{Result, VcsError};

/// Branch name the initial head is renamed to
pub const DEFAULT_BRANCH: &str = "main";

/// Committer identity used when the environment has no git identity
/// configured (common in CI and test sandboxes).
const FALLBACK_NAME: &str = "stackgen";
const FALLBACK_EMAIL: &str = "stackgen@localhost";

/// A generated project's repository
pub struct ProjectRepository {
    repo: Repository,
    root_path: PathBuf,
}

impl ProjectRepository {
    /// Initialize a repository at `path` with `main` as the initial branch
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Initializing repository at: {}", path.display());

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(DEFAULT_BRANCH);
        let repo = Repository::init_opts(path, &opts)?;
        let root_path = repo
            .workdir()
            .ok_or_else(|| VcsError::InvalidState {
                message: "Repository has no working directory".to_string(),
            })?
            .to_path_buf();

        Ok(Self { repo, root_path })
    }

    /// Open an existing repository at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|e| {
            debug!("Failed to open repository: {}", e);
            VcsError::RepositoryNotFound {
                path: path.display().to_string(),
            }
        })?;
        let root_path = repo
            .workdir()
            .ok_or_else(|| VcsError::InvalidState {
                message: "Repository has no working directory".to_string(),
            })?
            .to_path_buf();

        Ok(Self { repo, root_path })
    }

    /// Repository root path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Stage every file in the working tree
    pub fn stage_all(&self) -> Result<()> {
        debug!("Staging all files");
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    /// Commit the staged index; works for the initial commit (no
    /// parent) and for repositories that already have history.
    pub fn commit(&self, message: &str) -> Result<git2::Oid> {
        let signature = self.signature()?;
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!("Created commit {}", oid);
        Ok(oid)
    }

    /// Create a lightweight tag pointing at HEAD
    pub fn tag(&self, name: &str) -> Result<()> {
        let target = self.repo.head()?.peel(ObjectType::Commit)?;
        self.repo.tag_lightweight(name, &target, false)?;
        debug!("Created tag {}", name);
        Ok(())
    }

    /// Whether a tag with `name` exists
    pub fn has_tag(&self, name: &str) -> Result<bool> {
        let tags = self.repo.tag_names(Some(name))?;
        Ok(tags.iter().flatten().any(|tag| tag == name))
    }

    /// Shorthand name of the current branch
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| VcsError::InvalidState {
                message: "Could not get branch name".to_string(),
            })
    }

    /// Number of commits reachable from HEAD
    pub fn commit_count(&self) -> Result<usize> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        Ok(revwalk.count())
    }

    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(signature) => Ok(signature),
            Err(_) => Ok(Signature::now(FALLBACK_NAME, FALLBACK_EMAIL)?),
        }
    }
}
