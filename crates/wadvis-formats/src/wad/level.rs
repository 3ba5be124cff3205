//! Level marker discovery
//!
//! A level is stored as a zero-length marker lump (`E1M1`, `MAP01`)
//! followed by its geometry lumps in a fixed order. GL node builders write
//! a parallel marker (`GL_E1M1`, `GL_MAP01`) followed by the GL lumps. This
//! module finds those markers and the directory range each one owns.

use std::ops::Range;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::wad::name::LumpName;
use crate::wad::reader::WadReader;

/// Lumps that follow a map marker, in directory order
pub const MAP_LUMPS: [&str; 10] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS",
    "REJECT", "BLOCKMAP",
];

/// Lumps that follow a GL marker, in directory order
pub const GL_LUMPS: [&str; 5] = ["GL_VERT", "GL_SEGS", "GL_SSECT", "GL_NODES", "GL_PVS"];

/// Name of the potentially-visible-set lump written by a vis builder
pub const GL_PVS: &str = "GL_PVS";

#[allow(clippy::expect_used)]
static MAP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:E\dM\d|MAP\d\d)$").expect("static pattern")
});

#[allow(clippy::expect_used)]
static GL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^GL_(?:E\dM\d|MAP\d\d)$").expect("static pattern")
});

/// Which kind of marker introduced a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Classic map marker (`ExMy`, `MAPxx`)
    Map,
    /// GL node marker (`GL_ExMy`, `GL_MAPxx`)
    GlNodes,
}

impl MarkerKind {
    /// Classify a lump name, or `None` if it is not a marker
    pub fn of(name: &LumpName) -> Option<Self> {
        let raw = name.trimmed();
        if MAP_MARKER.is_match(raw) {
            Some(Self::Map)
        } else if GL_MARKER.is_match(raw) {
            Some(Self::GlNodes)
        } else {
            None
        }
    }

    /// Lump names that may follow a marker of this kind
    pub fn member_lumps(self) -> &'static [&'static str] {
        match self {
            Self::Map => &MAP_LUMPS,
            Self::GlNodes => &GL_LUMPS,
        }
    }
}

/// A level marker and the lumps it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMarker {
    /// Marker lump name
    pub name: LumpName,
    /// Marker kind
    pub kind: MarkerKind,
    /// Directory index of the marker lump
    pub index: usize,
    /// Directory indices of the lumps that belong to the level
    pub lumps: Range<usize>,
}

impl LevelMarker {
    /// Level name without the `GL_` prefix
    pub fn level_name(&self) -> LumpName {
        match self.kind {
            MarkerKind::Map => self.name,
            MarkerKind::GlNodes => LumpName::normalize(&self.name.trimmed()[3..]),
        }
    }

    /// Find a member lump by name inside this level's range
    pub fn find(&self, reader: &WadReader<'_>, name: &str) -> Option<usize> {
        let wanted = LumpName::normalize(name);
        self.lumps
            .clone()
            .rev()
            .find(|&i| reader.lump_name(i) == wanted)
    }
}

/// Scan the directory for level markers, in directory order
///
/// The lumps owned by a marker are the run of known member names directly
/// after it; the run ends at the first lump that is not a member or at the
/// next marker.
pub fn find_levels(reader: &WadReader<'_>) -> Vec<LevelMarker> {
    let records = reader.records();
    let mut levels = Vec::new();
    let mut i = 0;

    while i < records.len() {
        let Some(kind) = MarkerKind::of(&records[i].name) else {
            i += 1;
            continue;
        };

        let members = kind.member_lumps();
        let start = i + 1;
        let mut end = start;
        while end < records.len()
            && members.iter().any(|m| records[end].name == *m)
        {
            end += 1;
        }

        levels.push(LevelMarker {
            name: records[i].name,
            kind,
            index: i,
            lumps: start..end,
        });
        i = end;
    }

    levels
}
