use std::fs;
use std::path::Path;

use ratatui::style::Color;

use crate::error::StartupError;

/// Colors handed out to faces in catalog order; wraps for larger catalogs.
const PALETTE: [Color; 8] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
];

const BACK_COLOR: Color = Color::DarkGray;

/// Opaque identity of a tile face.  Two tiles match iff their symbols are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    pub const fn new(index: u8) -> Self {
        Symbol(index)
    }

    /// Position of this symbol in its catalog.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The first `pairs` symbols, in catalog order.
    pub fn catalog(pairs: usize) -> impl Iterator<Item = Symbol> {
        assert!(pairs <= u8::MAX as usize + 1, "Catalog too large");
        (0..pairs).map(|i| Symbol(i as u8))
    }
}

/// A drawable face: multi-line text art and the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Art {
    pub text: String,
    pub color: Color,
}

impl Art {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Art {
            text: text.into(),
            color,
        }
    }
}

/// Every face the board can show: one shared back face plus one face per symbol.
#[derive(Debug, Clone)]
pub struct Catalog {
    back: Art,
    faces: Vec<Art>,
}

impl Catalog {
    /// Load `image0.txt` (the back face) and `image1.txt ..= image{pairs}.txt`
    /// from `dir`.  Any missing or blank file is fatal.
    pub fn load(dir: &Path, pairs: usize) -> Result<Self, StartupError> {
        let back = load_art(dir, 0)?;
        let faces = (1..=pairs)
            .map(|i| load_art(dir, i))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(dir = %dir.display(), faces = faces.len(), "Loaded tile art");
        Ok(Self::from_art(back, faces))
    }

    /// Build a catalog from in-memory art.  Colors are assigned from the palette.
    pub fn from_art<S>(back: impl Into<String>, faces: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Catalog {
            back: Art::new(back, BACK_COLOR),
            faces: faces
                .into_iter()
                .enumerate()
                .map(|(i, text)| Art::new(text, PALETTE[i % PALETTE.len()]))
                .collect(),
        }
    }

    pub fn back(&self) -> &Art {
        &self.back
    }

    /// Face for `symbol`.  Panics if the symbol is not part of this catalog.
    pub fn face(&self, symbol: Symbol) -> &Art {
        &self.faces[symbol.index()]
    }

    /// Number of distinct faces (excluding the back).
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

fn load_art(dir: &Path, index: usize) -> Result<String, StartupError> {
    let path = dir.join(format!("image{}.txt", index));
    let text = fs::read_to_string(&path).map_err(|source| StartupError::MissingAsset {
        path: path.clone(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(StartupError::EmptyAsset { path });
    }
    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}
