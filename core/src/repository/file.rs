use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::model::session::CalculationSession;
use crate::repository::traits::SessionRepository;

const DEFAULT_FILE_NAME: &str = "session.json";

// The working session lives in a single JSON file, ~/.sofcalc/session.json
// unless a base directory is given. Whatever the user last imported or
// edited survives between invocations.
#[derive(Clone)]
pub struct FileSessionRepository {
    file_path: PathBuf,
}

impl FileSessionRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".sofcalc")
            }
        };
        fs::create_dir_all(&path)?; // Ensure the directory exists
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &CalculationSession::default())?;
            writer.flush()?;
        }

        Ok(FileSessionRepository { file_path: path })
    }
}

impl SessionRepository for FileSessionRepository {
    fn load(&self) -> Result<CalculationSession> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let session = serde_json::from_reader(reader)?;
        Ok(session)
    }

    fn save(&self, session: &CalculationSession) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.flush()?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&CalculationSession::default())
    }
}
