use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::{ChatSession, Message};

pub const TRANSCRIPT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Transcript {
    pub fn from_session(session: &ChatSession) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            created_at: Utc::now(),
            messages: session.messages().to_vec(),
        }
    }
}

pub fn save_transcript(path: &Path, transcript: &Transcript) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, transcript)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn load_transcript(path: &Path) -> Result<Transcript> {
    let file = File::open(path)?;
    let transcript = serde_json::from_reader(BufReader::new(file))?;
    Ok(transcript)
}
