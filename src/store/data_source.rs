use std::{io::ErrorKind, ops::Deref, path::Path};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use serde::{Deserialize, Serialize};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::{debug, info, warn};

use crate::error::WorklogError;

use super::{
    entities::{Log, TeamMember},
    fixture::{seed_logs, seed_team_members},
};

/// Interface the query and aggregation layers read records through.
pub trait DataSource {
    fn list_logs(&self) -> &[Log];

    fn list_team_members(&self) -> &[TeamMember];
}

impl<T: Deref> DataSource for T
where
    T::Target: DataSource,
{
    fn list_logs(&self) -> &[Log] {
        self.deref().list_logs()
    }

    fn list_team_members(&self) -> &[TeamMember] {
        self.deref().list_team_members()
    }
}

/// Serialized shape of a data set. Field names follow the web fixture so the same files can be
/// shared between the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub logs: Vec<Log>,
    pub team_members: Vec<TeamMember>,
}

impl Fixture {
    pub fn seed() -> Self {
        Self {
            logs: seed_logs(),
            team_members: seed_team_members(),
        }
    }

    /// Reads a fixture file holding a shared lock for the duration of the read.
    pub async fn load(path: &Path) -> Result<Self> {
        async fn extract(path: &Path) -> std::result::Result<String, std::io::Error> {
            debug!("Reading fixture {path:?}");
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut content = String::new();
            let read = file.read_to_string(&mut content).await;
            file.unlock_async().await?;
            read.map(|_| content)
        }

        let content = match extract(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Fixture {path:?} doesn't exist");
                return Err(e).with_context(|| format!("Fixture {} not found", path.display()));
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        serde_json::from_str(&content)
            .with_context(|| format!("{} is not a valid fixture", path.display()))
    }

    /// Writes the fixture as pretty printed json, replacing the file contents.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let buffer = serde_json::to_vec_pretty(self)?;
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .await?;
        // Truncate only once readers are locked out.
        file.lock_exclusive()?;
        let result = match file.set_len(0).await {
            Ok(()) => file.write_all(&buffer).await,
            Err(e) => Err(e),
        };
        file.flush().await?;
        file.unlock_async().await?;
        result?;
        info!("Saved fixture into {path:?}");
        Ok(())
    }
}

/// In-memory [DataSource]. Each process starts with a fresh copy of its fixture, so nothing done
/// through it outlives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    logs: Vec<Log>,
    team_members: Vec<TeamMember>,
}

impl MemoryStore {
    pub fn new(logs: Vec<Log>, team_members: Vec<TeamMember>) -> Self {
        Self { logs, team_members }
    }

    pub fn seeded() -> Self {
        Fixture::seed().into()
    }

    /// Swaps the stored log that has the same id as `log`.
    pub fn replace_log(&mut self, log: Log) -> Result<(), WorklogError> {
        let slot = self
            .logs
            .iter_mut()
            .find(|stored| stored.id == log.id)
            .ok_or_else(|| WorklogError::LogNotFound(log.id.clone()))?;
        debug!("Replacing log {}", log.id);
        *slot = log;
        Ok(())
    }

    pub fn insert_log(&mut self, log: Log) {
        debug!("Inserting log {}", log.id);
        self.logs.push(log);
    }

    pub fn to_fixture(&self) -> Fixture {
        Fixture {
            logs: self.logs.clone(),
            team_members: self.team_members.clone(),
        }
    }
}

impl From<Fixture> for MemoryStore {
    fn from(Fixture { logs, team_members }: Fixture) -> Self {
        Self::new(logs, team_members)
    }
}

impl DataSource for MemoryStore {
    fn list_logs(&self) -> &[Log] {
        &self.logs
    }

    fn list_team_members(&self) -> &[TeamMember] {
        &self.team_members
    }
}
