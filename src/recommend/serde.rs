use std::io::{Read, Write};

use serde::{ser::SerializeStruct, Deserialize, Serialize};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::feature::FeatureBag;
use crate::recommend::Engine;
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::{FeatureVector, Vocabulary};

/// Deserialized form of an [`Engine`].
/// The name index is not stored; `into_engine` rebuilds it after checking
/// that every part agrees with the catalog size.
#[derive(Debug, Deserialize)]
pub struct EngineData {
    pub catalog: Catalog,
    pub bags: Vec<FeatureBag>,
    pub vocabulary: Vocabulary,
    pub vectors: Vec<FeatureVector>,
    pub similarity: SimilarityMatrix,
    pub config: EngineConfig,
}

impl EngineData {
    pub fn into_engine(self) -> Result<Engine> {
        let n = self.catalog.len();
        if self.bags.len() != n {
            return Err(EngineError::Snapshot(format!(
                "{} feature bags for {} rows",
                self.bags.len(),
                n
            )));
        }
        if self.vectors.len() != n {
            return Err(EngineError::Snapshot(format!(
                "{} vectors for {} rows",
                self.vectors.len(),
                n
            )));
        }
        if self.vectors.iter().any(|v| v.len() != self.vocabulary.len()) {
            return Err(EngineError::Snapshot(
                "vector dimension differs from vocabulary".to_string(),
            ));
        }
        if self.similarity.len() != n || !self.similarity.is_well_formed() {
            return Err(EngineError::Snapshot(format!(
                "similarity matrix of size {} for {} rows",
                self.similarity.len(),
                n
            )));
        }
        Ok(Engine::from_parts(
            self.catalog,
            self.bags,
            self.vocabulary,
            self.vectors,
            self.similarity,
            self.config,
        ))
    }
}

impl Serialize for Engine {
    /// Everything except the name index, which is derived from the catalog.
    /// Read it back through [`EngineData`].
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Engine", 6)?;
        state.serialize_field("catalog", &self.catalog)?;
        state.serialize_field("bags", &self.bags)?;
        state.serialize_field("vocabulary", &self.vocabulary)?;
        state.serialize_field("vectors", &self.vectors)?;
        state.serialize_field("similarity", &self.similarity)?;
        state.serialize_field("config", &self.config)?;
        state.end()
    }
}

impl Engine {
    /// Write a CBOR snapshot of the built engine.
    /// The writer is flushed before returning, so buffered write errors surface here.
    pub fn to_cbor_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_cbor::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Restore an engine from a CBOR snapshot without rebuilding it.
    pub fn from_cbor_reader<R: Read>(reader: R) -> Result<Self> {
        let data: EngineData = serde_cbor::from_reader(reader)?;
        let engine = data.into_engine()?;
        info!(rows = engine.len(), "engine restored from snapshot");
        Ok(engine)
    }
}
