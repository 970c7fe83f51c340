use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use twostars_core::{BoardInfo, BoardLayout};

const BUILTIN: &str = include_str!("../boards.toml");

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "board")]
    boards: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    id: String,
    name: Option<String>,
    rows: Option<Vec<String>>,
    layout: Option<BoardLayout>,
}

impl CatalogEntry {
    fn into_info(self) -> Result<BoardInfo> {
        let layout = match (self.rows, self.layout) {
            (Some(rows), None) => {
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                BoardLayout::from_strs(&rows).with_context(|| format!("board {}", self.id))?
            }
            (None, Some(layout)) => layout,
            _ => bail!("board {} needs exactly one of `rows` or `layout`", self.id),
        };
        Ok(BoardInfo {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            layout,
        })
    }
}

/// Boards the player can pick from, in file order.
#[derive(Clone, Debug)]
pub struct Catalog {
    boards: Vec<BoardInfo>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN).context("built-in catalog")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing catalog {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        let mut boards: Vec<BoardInfo> = Vec::with_capacity(file.boards.len());
        for entry in file.boards {
            let info = entry.into_info()?;
            if boards.iter().any(|board| board.id == info.id) {
                bail!("duplicate board id {}", info.id);
            }
            boards.push(info);
        }
        if boards.is_empty() {
            bail!("catalog has no boards");
        }
        Ok(Self { boards })
    }

    pub fn boards(&self) -> &[BoardInfo] {
        &self.boards
    }

    pub fn find(&self, id: &str) -> Result<&BoardInfo> {
        match self.boards.iter().find(|board| board.id == id) {
            Some(board) => Ok(board),
            None => bail!("unknown board {id:?}, see `twostars list`"),
        }
    }
}
