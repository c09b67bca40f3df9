//! In-memory tables and their JSON snapshot.
//!
//! Every table lives behind one lock, so an operation touching several
//! records (applying to a post, accepting an application) is applied as a
//! whole or not at all.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use dorm_move_shared::{application::Application, post::Post, Building};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{account::UserRecord, config::Config, Error};

/// Every table of the store.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Db {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub buildings: Vec<Building>,
    /// Last id handed out per table.
    #[serde(default)]
    last_ids: LastIds,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy)]
struct LastIds {
    user: u64,
    post: u64,
    application: u64,
}

impl Db {
    pub fn next_user_id(&mut self) -> u64 {
        self.last_ids.user += 1;
        self.last_ids.user
    }

    pub fn next_post_id(&mut self) -> u64 {
        self.last_ids.post += 1;
        self.last_ids.post
    }

    pub fn next_application_id(&mut self) -> u64 {
        self.last_ids.application += 1;
        self.last_ids.application
    }

    /// Raises the id counters above every stored id, for snapshots edited
    /// by hand.
    fn fix_last_ids(&mut self) {
        fn max_id(ids: impl Iterator<Item = u64>) -> u64 {
            ids.max().unwrap_or_default()
        }

        self.last_ids.user = self
            .last_ids
            .user
            .max(max_id(self.users.iter().map(|u| u.user.id)));
        self.last_ids.post = self.last_ids.post.max(max_id(self.posts.iter().map(|p| p.id)));
        self.last_ids.application = self
            .last_ids
            .application
            .max(max_id(self.applications.iter().map(|a| a.id)));
    }

    pub fn user(&self, id: u64) -> Result<&UserRecord, Error> {
        self.users
            .iter()
            .find(|u| u.user.id == id)
            .ok_or(Error::NotFound("user", id))
    }

    pub fn user_mut(&mut self, id: u64) -> Result<&mut UserRecord, Error> {
        self.users
            .iter_mut()
            .find(|u| u.user.id == id)
            .ok_or(Error::NotFound("user", id))
    }

    pub fn post(&self, id: u64) -> Result<&Post, Error> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound("post", id))
    }

    pub fn post_mut(&mut self, id: u64) -> Result<&mut Post, Error> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound("post", id))
    }
}

/// The shared store state.
#[derive(Debug)]
pub struct Store {
    db: RwLock<Db>,
    /// Latest snapshot waiting to be written, if a data file is configured.
    snapshot_tx: Option<watch::Sender<Vec<u8>>>,
    data_file: Option<PathBuf>,
}

impl Store {
    /// Creates a store keeping `db` in memory only.
    pub fn new(db: Db) -> Self {
        Self {
            db: RwLock::new(db),
            snapshot_tx: None,
            data_file: None,
        }
    }

    /// Opens the store described by `config`, loading the data file if it
    /// exists and seeding buildings into an empty building table.
    ///
    /// Must be called within a tokio runtime if a data file is configured.
    pub fn open(config: &Config) -> Result<Self, Error> {
        let mut db = match config.data_file {
            Some(ref path) if path.exists() => {
                let bytes = std::fs::read(path).map_err(Error::Persist)?;
                serde_json::from_slice(&bytes).map_err(Error::Snapshot)?
            }
            _ => Db::default(),
        };
        db.fix_last_ids();

        if db.buildings.is_empty() {
            db.buildings = config
                .buildings
                .iter()
                .zip(1..)
                .map(|(seed, id)| Building {
                    id,
                    name: seed.name.to_owned(),
                    kind: seed.kind.to_owned(),
                })
                .collect();
        }

        tracing::info!(
            users = db.users.len(),
            posts = db.posts.len(),
            applications = db.applications.len(),
            buildings = db.buildings.len(),
            "store opened"
        );

        Ok(Self {
            db: RwLock::new(db),
            snapshot_tx: config.data_file.clone().map(spawn_snapshot_writer),
            data_file: config.data_file.clone(),
        })
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Db> {
        self.db.read()
    }

    /// Runs `f` with exclusive access to every table.
    ///
    /// A snapshot is queued if `f` succeeds. `f` must leave the tables
    /// untouched when it fails.
    pub fn write<T>(&self, f: impl FnOnce(&mut Db) -> Result<T, Error>) -> Result<T, Error> {
        let mut db = self.db.write();
        let output = f(&mut db)?;

        if let Some(ref tx) = self.snapshot_tx {
            match serde_json::to_vec_pretty(&*db) {
                Ok(bytes) => {
                    let _ = tx.send(bytes);
                }
                Err(err) => tracing::error!("failed to encode snapshot: {err}"),
            }
        }

        Ok(output)
    }

    /// Writes the current tables to the data file right away.
    pub fn flush(&self) -> Result<(), Error> {
        let Some(ref path) = self.data_file else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&*self.db.read()).map_err(Error::Snapshot)?;
        write_atomically(path, &bytes).map_err(Error::Persist)
    }
}

/// Writes the newest queued snapshot to `path`, skipping snapshots that
/// were replaced before they could be written.
fn spawn_snapshot_writer(path: PathBuf) -> watch::Sender<Vec<u8>> {
    let (tx, mut rx) = watch::channel(Vec::new());

    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let bytes = rx.borrow_and_update().clone();
            let path = path.clone();

            let result =
                tokio::task::spawn_blocking(move || write_atomically(&path, &bytes)).await;

            match result {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::error!("failed to write snapshot: {err}"),
                Err(err) => tracing::error!("snapshot writer panicked: {err}"),
            }
        }
    });

    tx
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

    let tmp = path.with_extension(format!(
        "json.{}.tmp",
        TMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(tmp, path)
}
