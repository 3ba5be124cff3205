//! Visibility engine boundary.
//!
//! An engine reads GL-node geometry from an input archive and appends its
//! result lumps to an output archive. The session owns both archives; the
//! engine only ever sees a borrowed reader and a mutable writer.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info, trace};
use wadvis_formats::wad::level::GL_PVS;
use wadvis_formats::wad::{MarkerKind, find_levels};
use wadvis_formats::{WadReader, WadWriter};

use crate::error::EngineError;

/// Archives handed to an engine for one run.
#[derive(Debug)]
pub struct EngineInput<'a> {
    /// GL-node archive (`.gwa`), the primary input
    pub nodes: WadReader<'a>,
    /// Level archive the nodes were built from, when available
    pub source: Option<WadReader<'a>>,
}

impl<'a> EngineInput<'a> {
    /// Input with no source archive
    pub fn new(nodes: WadReader<'a>) -> Self {
        Self {
            nodes,
            source: None,
        }
    }

    /// Attach the level archive the nodes were built from
    #[must_use]
    pub fn with_source(mut self, source: WadReader<'a>) -> Self {
        self.source = Some(source);
        self
    }
}

/// A visibility builder.
///
/// Implementations must only append to `output`; the session finalizes it
/// after `build` returns `Ok`.
pub trait VisEngine {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Process `input` and append result lumps to `output`
    fn build(&mut self, input: &EngineInput<'_>, output: &mut WadWriter)
    -> Result<(), EngineError>;
}

impl<E: VisEngine + ?Sized> VisEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn build(
        &mut self,
        input: &EngineInput<'_>,
        output: &mut WadWriter,
    ) -> Result<(), EngineError> {
        (**self).build(input, output)
    }
}

/// Engine that passes the node archive through and marks every GL level
/// as fully visible.
///
/// Every input lump is copied in directory order. A GL level without a
/// `GL_PVS` lump gets a zero-length one appended after its last lump,
/// which GL-node consumers read as "no visibility data".
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderVisEngine;

impl PlaceholderVisEngine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl VisEngine for PlaceholderVisEngine {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn build(
        &mut self,
        input: &EngineInput<'_>,
        output: &mut WadWriter,
    ) -> Result<(), EngineError> {
        let nodes = &input.nodes;
        let levels = find_levels(nodes);
        if levels.is_empty() {
            return Err(EngineError::NoLevels);
        }

        if let Some(source) = &input.source {
            let maps: HashSet<_> = find_levels(source)
                .into_iter()
                .filter(|l| l.kind == MarkerKind::Map)
                .map(|l| l.name)
                .collect();
            for level in levels.iter().filter(|l| l.kind == MarkerKind::GlNodes) {
                let name = level.level_name();
                if !maps.contains(&name) {
                    return Err(EngineError::MissingLevel(name.to_string()));
                }
            }
        }

        // Directory index after which a GL_PVS placeholder goes
        let missing_pvs: BTreeSet<usize> = levels
            .iter()
            .filter(|l| l.kind == MarkerKind::GlNodes && l.find(nodes, GL_PVS).is_none())
            .map(|l| l.lumps.end.saturating_sub(1).max(l.index))
            .collect();

        for (index, record) in nodes.iter().enumerate() {
            let data = nodes.lump_data(index)?;
            trace!("Copying lump {} ({} bytes)", record.name, data.len());
            output.add_lump(record.name, data)?;

            if missing_pvs.contains(&index) {
                debug!("Adding empty {} after lump {}", GL_PVS, index);
                output.add_lump(GL_PVS, &[])?;
            }
        }

        info!(
            "Processed {} levels, added {} empty {} lumps",
            levels.len(),
            missing_pvs.len(),
            GL_PVS
        );
        Ok(())
    }
}
