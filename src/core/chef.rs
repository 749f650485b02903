//! The cook entry point: parse material and recipe, study, apply, output.
//!
//! A `Chef` owns one material, one recipe and one result. Cooking rebuilds
//! the result from an empty object; a failed cook leaves the previous result
//! untouched.

use super::digest;
use super::error::{CookError, CookResult};
use super::executor;
use super::studier;
use super::types::Action;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::info;

/// Holds a material and a recipe and cooks them into a result.
#[derive(Debug, Clone)]
pub struct Chef {
    material: Value,
    recipe: Value,
    result: Value,
}

impl Chef {
    /// Parse `material` and `recipe` as JSON.
    pub fn new(material: &[u8], recipe: &[u8]) -> CookResult<Self> {
        let material = serde_json::from_slice(material).map_err(CookError::MaterialParse)?;
        let recipe = serde_json::from_slice(recipe).map_err(CookError::RecipeParse)?;
        Ok(Self::from_values(material, recipe))
    }

    /// Build from already-parsed documents.
    pub fn from_values(material: Value, recipe: Value) -> Self {
        Self {
            material,
            recipe,
            result: Value::Object(Map::new()),
        }
    }

    /// Study the recipe without touching the material.
    pub fn study(&self) -> CookResult<Vec<Action>> {
        Ok(studier::study(&self.recipe)?)
    }

    /// Study the recipe and apply it to the material.
    pub fn cook(&mut self) -> CookResult<()> {
        let start = Instant::now();
        let actions = self.study()?;

        let mut result = Value::Object(Map::new());
        executor::apply(&actions, &self.material, &mut result)?;
        self.result = result;

        info!(
            actions = actions.len(),
            elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "cooked"
        );
        Ok(())
    }

    /// The result document.
    pub fn result(&self) -> &Value {
        &self.result
    }

    /// The result as compact JSON text.
    pub fn json_result(&self) -> String {
        self.result.to_string()
    }

    /// The result as compact JSON bytes.
    pub fn bytes_result(&self) -> Vec<u8> {
        self.json_result().into_bytes()
    }

    /// The result as indented JSON text.
    pub fn pretty_result(&self) -> String {
        serde_json::to_string_pretty(&self.result).unwrap_or_else(|_| self.json_result())
    }

    /// BLAKE3 digest of the compact result.
    pub fn digest(&self) -> String {
        digest::hash_string(&self.json_result())
    }
}
